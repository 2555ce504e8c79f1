use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutput {
    pub output_dir: String,
    /// Paths relative to `output_dir`, in creation order.
    pub created: Vec<String>,
    pub raw_output: String,
}

pub fn build_report(output_dir: &Path, created: &[PathBuf], raw_log: String) -> CreateOutput {
    CreateOutput {
        output_dir: output_dir.display().to_string(),
        created: created.iter().map(|p| p.display().to_string()).collect(),
        raw_output: raw_log,
    }
}
