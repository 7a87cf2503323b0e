use chrono::DateTime;
use chrono::Utc;
use mls_core::*;
use mls_forest::Forest;
use mls_tracking::Run;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// A fitted model and where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub model: Forest,
    pub features: Vec<String>,
    pub accuracy: Probability,
    pub trained_at: DateTime<Utc>,
    pub experiment: String,
    pub run: ID<Run>,
}

impl Artifact {
    /// File name keyed by training time, with the random tail of the run
    /// id to keep same-millisecond trainings apart. Sorts chronologically.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}_{}.{}",
            ARTIFACT_PREFIX,
            self.trained_at.format("%Y%m%d_%H%M%S_%3f"),
            self.run.short(),
            ARTIFACT_EXTENSION
        )
    }
}

/// Persistence contract for model artifacts.
pub trait Store: Send + Sync {
    /// Write the artifact and return where it landed.
    fn save(&self, artifact: &Artifact) -> anyhow::Result<PathBuf>;
    /// Read an artifact back. A missing file is `Ok(None)`, not an error.
    fn load(&self, path: &Path) -> anyhow::Result<Option<Artifact>>;
    /// Path of the most recently trained artifact, if any.
    fn latest(&self) -> anyhow::Result<Option<PathBuf>>;
}
