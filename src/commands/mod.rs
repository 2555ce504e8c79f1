pub mod check;
pub mod list;
pub mod new;

use std::path::PathBuf;

use scaffold::config::UserConfig;
use scaffold::template::{BuiltinStore, FsStore, TemplateStore};

/// `--templates` wins over the user config; otherwise the built-in bundles are used.
pub fn open_store(flag: Option<PathBuf>, config: &UserConfig) -> Box<dyn TemplateStore> {
    match flag.or_else(|| config.templates_dir.clone()) {
        Some(root) => Box::new(FsStore::new(root)),
        None => Box::new(BuiltinStore),
    }
}
