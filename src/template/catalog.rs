use globset::Glob;
use tracing::debug;

use crate::config::rules::TemplateType;
use crate::error::{Result, ScaffoldError};
use crate::template::store::{BundleEntry, TemplateStore};

/// A bundle looked up for one template type. Its contents are fixed once resolved.
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    kind: TemplateType,
    name: String,
    entries: Vec<BundleEntry>,
}

impl TemplateBundle {
    pub fn kind(&self) -> TemplateType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in lexical order of their relative paths.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }
}

/// Names of the bundles for `kind` that contain a file whose name matches `filter`.
pub fn list_templates(
    store: &dyn TemplateStore,
    kind: TemplateType,
    filter: &str,
) -> Result<Vec<String>> {
    let matcher = Glob::new(filter)
        .map_err(|e| ScaffoldError::GlobPattern {
            pattern: filter.to_string(),
            source: e,
        })?
        .compile_matcher();

    let mut names = Vec::new();
    for name in store.bundle_names(kind)? {
        let Some(entries) = store.bundle_entries(kind, &name)? else {
            continue;
        };
        let offered = entries.iter().any(|entry| match entry {
            BundleEntry::File { path, .. } => path.file_name().is_some_and(|f| matcher.is_match(f)),
            BundleEntry::Dir(_) => false,
        });
        if offered {
            names.push(name);
        }
    }
    Ok(names)
}

/// [`list_templates`] with the type's own filter.
pub fn list_templates_for(store: &dyn TemplateStore, kind: TemplateType) -> Result<Vec<String>> {
    list_templates(store, kind, kind.rule().filter)
}

/// Look up the bundle called exactly `name` (case-sensitive) among the bundles of `kind`.
pub fn resolve_template(
    store: &dyn TemplateStore,
    kind: TemplateType,
    name: &str,
) -> Result<TemplateBundle> {
    let not_found = || ScaffoldError::TemplateNotFound {
        kind,
        name: name.to_string(),
        available: list_templates_for(store, kind).unwrap_or_default(),
    };

    // Case-insensitive filesystems would otherwise accept a differently cased name
    if !store.bundle_names(kind)?.iter().any(|n| n == name) {
        return Err(not_found());
    }

    let entries = store.bundle_entries(kind, name)?.ok_or_else(not_found)?;
    debug!(
        %kind,
        bundle = name,
        entries = entries.len(),
        source = %store.describe(),
        "resolved template bundle"
    );

    Ok(TemplateBundle {
        kind,
        name: name.to_string(),
        entries,
    })
}
