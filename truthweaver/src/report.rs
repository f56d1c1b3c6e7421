use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::intelligence::{Contradiction, TruthProfile};

/// Everything concluded about one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectReport {
    pub shadow_id: String,
    pub revealed_truth: TruthProfile,
    pub deception_patterns: Vec<Contradiction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub subjects: Vec<SubjectReport>,
}

impl Report {
    pub fn new(mut subjects: Vec<SubjectReport>) -> Self {
        subjects.sort_by(|a, b| a.shadow_id.cmp(&b.shadow_id));
        Self { subjects }
    }

    pub fn subject(&self, shadow_id: &str) -> Option<&SubjectReport> {
        self.subjects.iter().find(|s| s.shadow_id == shadow_id)
    }

    pub fn deception_count(&self) -> usize {
        self.subjects.iter().map(|s| s.deception_patterns.len()).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()? + "\n")?;
        info!(
            path = %path.display(),
            subjects = self.subjects.len(),
            "Wrote report"
        );
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
