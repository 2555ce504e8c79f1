pub mod answers;
pub mod check;
pub mod config;
pub mod error;
pub mod path;
pub mod render;
pub mod report;
pub mod template;
pub mod validate;

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::answers::{prepare_answers, AnswersMap};
use crate::config::rules::{TemplateType, OUTPUT_DIR_KEY, TEMPLATE_KEY};
use crate::error::{Result, ScaffoldError};
use crate::path::{resolve_output_path, ResolvedOutputPath};
use crate::render::{execute_plan, plan_render, GenerationPlan};
use crate::report::{build_report, CreateOutput};
use crate::template::{resolve_template, TemplateStore};

/// One generation request, as assembled by the caller.
pub struct GenerateOptions {
    pub kind: TemplateType,
    pub answers: AnswersMap,
    /// Anchor for a relative `outputdir` answer.
    pub cwd: PathBuf,
    /// API version used when the answers carry none.
    pub default_api_version: Option<String>,
    /// Replace files that already exist instead of failing.
    pub force: bool,
}

/// Where a generation run is. Runs only move forward; any stage may end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    ResolvingTemplate,
    ResolvingPath,
    Rendering,
    Reporting,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::ResolvingTemplate => "resolving template",
            Stage::ResolvingPath => "resolving path",
            Stage::Rendering => "rendering",
            Stage::Reporting => "reporting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct Run {
    stage: Stage,
}

impl Run {
    fn at(stage: Stage) -> Self {
        debug!(%stage, "generation stage");
        Self { stage }
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "generation stage");
        self.stage = next;
    }

    /// Terminal transition; the error is handed back untouched.
    fn fail(&mut self, err: ScaffoldError) -> ScaffoldError {
        let next = Stage::Failed;
        debug!(from = %self.stage, to = %next, error = %err, "generation stage");
        self.stage = next;
        err
    }
}

/// Everything needed to write a generation that has been planned but not yet written.
pub struct FullGenerationPlan {
    pub kind: TemplateType,
    pub template: String,
    pub output_dir: ResolvedOutputPath,
    pub render_plan: GenerationPlan,
    pub force: bool,
}

/// Plan a generation: validate answers, resolve the bundle and output directory, and
/// render in memory.
///
/// Nothing is written to disk.
pub fn plan_generation(
    store: &dyn TemplateStore,
    options: GenerateOptions,
) -> Result<FullGenerationPlan> {
    let mut run = Run::at(Stage::Validating);
    let mut answers = prepare_answers(
        options.kind,
        &options.answers,
        options.default_api_version.as_deref(),
    )
    .map_err(|e| run.fail(e))?;

    run.advance(Stage::ResolvingTemplate);
    let template = answers
        .get(TEMPLATE_KEY)
        .cloned()
        .unwrap_or_else(|| options.kind.rule().default_template.to_string());
    let bundle = resolve_template(store, options.kind, &template).map_err(|e| run.fail(e))?;

    run.advance(Stage::ResolvingPath);
    let requested = answers.get(OUTPUT_DIR_KEY).cloned().unwrap_or_default();
    let output_dir = resolve_output_path(&requested, &options.cwd, &options.kind.rule())
        .map_err(|e| run.fail(e))?;
    answers.insert(OUTPUT_DIR_KEY.to_string(), output_dir.to_string());

    run.advance(Stage::Rendering);
    let render_plan = plan_render(&bundle, &answers).map_err(|e| run.fail(e))?;

    Ok(FullGenerationPlan {
        kind: options.kind,
        template,
        output_dir,
        render_plan,
        force: options.force,
    })
}

/// Write a planned generation and report what was created.
pub fn execute_generation(plan: FullGenerationPlan) -> Result<CreateOutput> {
    let mut run = Run::at(Stage::Rendering);
    let outcome =
        execute_plan(&plan.render_plan, &plan.output_dir, plan.force).map_err(|e| run.fail(e))?;

    run.advance(Stage::Reporting);
    let report = build_report(plan.output_dir.as_path(), &outcome.created, outcome.raw_log);

    run.advance(Stage::Done);
    Ok(report)
}

/// Generate a skeleton from the store's bundle for `options.kind`.
pub fn generate(store: &dyn TemplateStore, options: GenerateOptions) -> Result<CreateOutput> {
    let plan = plan_generation(store, options)?;
    execute_generation(plan)
}
