pub mod catalog;
pub mod store;

pub use catalog::{list_templates, list_templates_for, resolve_template, TemplateBundle};
pub use store::{BuiltinStore, BundleEntry, FsStore, MemoryStore, TemplateStore};
