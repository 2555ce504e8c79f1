use crate::config::rules::TemplateType;
use crate::error::Result;
use crate::render::file::is_binary;
use crate::template::{list_templates_for, BundleEntry, TemplateStore};
use crate::validate::check_identifier;

/// Result of validating a template store.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub bundle_count: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate every bundle of every template type in `store`.
pub fn check_store(store: &dyn TemplateStore) -> Result<CheckResult> {
    let mut result = CheckResult::default();

    for kind in TemplateType::ALL {
        let rule = kind.rule();
        let names = store.bundle_names(kind)?;
        let offered = list_templates_for(store, kind)?;

        if !names.iter().any(|n| n == rule.default_template) {
            result.errors.push(format!(
                "{kind}: default template '{}' not found",
                rule.default_template
            ));
        }

        for name in &names {
            result.bundle_count += 1;

            if let Err(violation) = check_identifier(name) {
                result.warnings.push(format!(
                    "{kind}/{name}: bundle name cannot be selected ({violation})"
                ));
            }

            if !offered.contains(name) {
                result.warnings.push(format!(
                    "{kind}/{name}: no file matches '{}', the bundle is never offered",
                    rule.filter
                ));
            }

            let Some(entries) = store.bundle_entries(kind, name)? else {
                continue;
            };
            for entry in &entries {
                check_entry(kind, name, entry, &mut result.errors);
            }
        }
    }

    Ok(result)
}

fn check_entry(kind: TemplateType, bundle: &str, entry: &BundleEntry, errors: &mut Vec<String>) {
    let location = format!("{kind}/{bundle}/{}", entry.path().display());

    if let Some(file_name) = entry.path().file_name() {
        if let Err(e) = parse_template(&file_name.to_string_lossy()) {
            errors.push(format!("Tera syntax error in name of {location}: {e}"));
        }
    }

    let BundleEntry::File { content, .. } = entry else {
        return;
    };
    if is_binary(content) {
        return;
    }
    if let Ok(text) = std::str::from_utf8(content) {
        if let Err(e) = parse_template(text) {
            errors.push(format!("Tera syntax error in {location}: {e}"));
        }
    }
}

fn parse_template(text: &str) -> std::result::Result<(), String> {
    let mut tera = tera::Tera::default();
    tera.add_raw_template("__check__", text)
        .map_err(|e| e.to_string())?;
    Ok(())
}
