use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tera::Context;
use tracing::debug;

use crate::answers::AnswersMap;
use crate::error::{Result, ScaffoldError};
use crate::path::{LocationIssue, ResolvedOutputPath};
use crate::render::build_context;
use crate::render::file::{is_binary, render_file_content, render_path_component};
use crate::template::{BundleEntry, TemplateBundle};

/// Files written by a render, relative to the output directory, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    pub created: Vec<PathBuf>,
    /// One `create <path>` or `force <path>` line per written file.
    pub raw_log: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedKind {
    Dir,
    File {
        content: Vec<u8>,
        /// Copied verbatim (binary) rather than rendered.
        is_copy: bool,
    },
}

/// An entry that would be created during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    pub kind: PlannedKind,
}

/// A fully rendered bundle, sorted by relative path, not yet written.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub entries: Vec<PlannedEntry>,
}

impl GenerationPlan {
    pub fn files(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, PlannedKind::File { .. }))
    }

    /// Planned files that already exist under `output`.
    pub fn collisions<'a>(
        &'a self,
        output: &'a ResolvedOutputPath,
    ) -> impl Iterator<Item = &'a Path> {
        self.files()
            .map(|e| e.relative_path.as_path())
            .filter(move |rel| output.join(rel).exists())
    }
}

/// Render every entry of `bundle` into memory.
///
/// Names and contents are rendered here, so a placeholder without an answer is
/// reported before anything touches the disk.
pub fn plan_render(bundle: &TemplateBundle, answers: &AnswersMap) -> Result<GenerationPlan> {
    let context = build_context(answers);
    let mut entries = Vec::with_capacity(bundle.entries().len());

    for entry in bundle.entries() {
        let relative_path = render_relative_path(entry.path(), answers, &context)?;

        let kind = match entry {
            BundleEntry::Dir(_) => PlannedKind::Dir,
            BundleEntry::File { path, content } => {
                let text = if is_binary(content) {
                    None
                } else {
                    std::str::from_utf8(content).ok()
                };
                match text {
                    Some(text) => {
                        let file = path.to_string_lossy();
                        let rendered = render_file_content(&file, text, answers, &context)?;
                        PlannedKind::File {
                            content: rendered.into_bytes(),
                            is_copy: false,
                        }
                    }
                    None => PlannedKind::File {
                        content: content.clone(),
                        is_copy: true,
                    },
                }
            }
        };

        entries.push(PlannedEntry {
            relative_path,
            kind,
        });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(GenerationPlan { entries })
}

/// Write the entries of a generation plan under `output`.
///
/// Existing files are never replaced unless `force` is set. A collision stops the run;
/// files written before it stay on disk and are listed in the error.
pub fn execute_plan(
    plan: &GenerationPlan,
    output: &ResolvedOutputPath,
    force: bool,
) -> Result<RenderOutcome> {
    create_dir(output.as_path())?;

    let mut outcome = RenderOutcome::default();

    for entry in &plan.entries {
        let dest_path = output.join(&entry.relative_path);
        match &entry.kind {
            PlannedKind::Dir => create_dir(&dest_path)?,
            PlannedKind::File { content, .. } => {
                if let Some(parent) = dest_path.parent() {
                    create_dir(parent)?;
                }

                let overwritten = match write_file(&dest_path, content, force) {
                    Ok(overwritten) => overwritten,
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                        return Err(ScaffoldError::FileCollision {
                            path: dest_path,
                            written: outcome.created,
                        });
                    }
                    Err(e) => {
                        return Err(ScaffoldError::Io {
                            context: format!("writing {}", dest_path.display()),
                            source: e,
                        });
                    }
                };

                let action = if overwritten { "force" } else { "create" };
                debug!(path = %dest_path.display(), action, "wrote file");
                outcome.raw_log.push_str(&format!(
                    "{action} {}\n",
                    entry.relative_path.display()
                ));
                outcome.created.push(entry.relative_path.clone());
            }
        }
    }

    Ok(outcome)
}

/// Render `bundle` into `output`: plan in memory, then write in order.
pub fn render_bundle(
    bundle: &TemplateBundle,
    output: &ResolvedOutputPath,
    answers: &AnswersMap,
    force: bool,
) -> Result<RenderOutcome> {
    let plan = plan_render(bundle, answers)?;
    execute_plan(&plan, output, force)
}

/// Returns whether an existing file was replaced.
fn write_file(path: &Path, content: &[u8], force: bool) -> std::io::Result<bool> {
    if force {
        let existed = path.exists();
        std::fs::write(path, content)?;
        return Ok(existed);
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content)?;
    Ok(false)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| ScaffoldError::Io {
        context: format!("creating directory {}", path.display()),
        source: e,
    })
}

/// Render each component of a relative path through Tera.
fn render_relative_path(
    rel_path: &Path,
    answers: &AnswersMap,
    context: &Context,
) -> Result<PathBuf> {
    let file = rel_path.to_string_lossy();
    let mut rendered = PathBuf::new();
    for component in rel_path.components() {
        let part = component.as_os_str().to_string_lossy();
        let rendered_part = render_path_component(&part, &file, answers, context)?;

        let mut parts = Path::new(&rendered_part).components();
        let plain = matches!(
            (parts.next(), parts.next()),
            (Some(Component::Normal(_)), None)
        ) && !rendered_part.contains(['/', '\\']);
        if !plain {
            return Err(ScaffoldError::InvalidOutputLocation {
                path: rendered.join(&rendered_part),
                issue: LocationIssue::UnsafeName(rendered_part),
            });
        }

        rendered.push(rendered_part);
    }
    Ok(rendered)
}
