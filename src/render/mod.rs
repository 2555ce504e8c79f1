pub mod context;
pub mod file;
pub mod placeholders;
pub mod walker;

pub use context::build_context;
pub use walker::{
    execute_plan, plan_render, render_bundle, GenerationPlan, PlannedEntry, PlannedKind,
    RenderOutcome,
};
