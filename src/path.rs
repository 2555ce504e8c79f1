use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::rules::TemplateRule;
use crate::error::{Result, ScaffoldError};

/// Why an output directory was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationIssue {
    /// The path lacks a directory segment the template type requires.
    MissingAncestor(&'static str),
    /// Relative output directories need an absolute working directory to anchor them.
    RelativeWorkingDir,
    NulByte,
    NotADirectory,
    /// A rendered file or directory name would leave the output directory.
    UnsafeName(String),
}

impl fmt::Display for LocationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationIssue::MissingAncestor(segment) => {
                write!(f, "files of this type must be placed under a directory named '{segment}'")
            }
            LocationIssue::RelativeWorkingDir => f.write_str("working directory is not absolute"),
            LocationIssue::NulByte => f.write_str("path contains a NUL byte"),
            LocationIssue::NotADirectory => f.write_str("path exists and is not a directory"),
            LocationIssue::UnsafeName(name) => {
                write!(f, "rendered name '{name}' is not a plain file name")
            }
        }
    }
}

/// A normalized, absolute output directory that passed placement checks.
///
/// Resolution never touches the directory itself; the renderer creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputPath(PathBuf);

impl ResolvedOutputPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl AsRef<Path> for ResolvedOutputPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedOutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolve `requested` against `cwd` and apply the placement rule of `rule`.
///
/// An empty request means the working directory itself.
pub fn resolve_output_path(
    requested: &str,
    cwd: &Path,
    rule: &TemplateRule,
) -> Result<ResolvedOutputPath> {
    let invalid = |path: PathBuf, issue| ScaffoldError::InvalidOutputLocation { path, issue };

    if requested.contains('\0') {
        return Err(invalid(PathBuf::from(requested), LocationIssue::NulByte));
    }

    let requested_path = Path::new(requested);
    let joined = if requested_path.is_absolute() {
        requested_path.to_path_buf()
    } else if cwd.is_absolute() {
        cwd.join(requested_path)
    } else {
        return Err(invalid(cwd.join(requested_path), LocationIssue::RelativeWorkingDir));
    };

    let normalized = normalize(&joined);

    if let Some(segment) = rule.required_ancestor {
        let has_segment = normalized
            .components()
            .any(|c| matches!(c, Component::Normal(part) if part == segment));
        if !has_segment {
            return Err(invalid(normalized, LocationIssue::MissingAncestor(segment)));
        }
    }

    if normalized.exists() && !normalized.is_dir() {
        return Err(invalid(normalized, LocationIssue::NotADirectory));
    }

    Ok(ResolvedOutputPath(normalized))
}

/// Lexically collapse `.` and `..` without consulting the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
