use chrono::DateTime;
use chrono::Utc;
use mls_artifacts::Artifact;
use mls_core::*;
use mls_forest::Forest;
use mls_tracking::Run;
use std::path::Path;
use std::path::PathBuf;

/// Provenance of the served model.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub accuracy: Probability,
    pub trained_at: DateTime<Utc>,
    pub features: Vec<String>,
    pub model_path: PathBuf,
    pub experiment: String,
    pub run: ID<Run>,
}

/// Everything a reader needs, frozen at the moment a training run finished.
///
/// `reference` is `None` for snapshots restored from disk: the baseline
/// rows are not part of the artifact.
#[derive(Debug)]
pub struct Snapshot {
    model: Forest,
    reference: Option<Vec<Vec<Feature>>>,
    metrics: Metrics,
}

impl Snapshot {
    /// Wrap a persisted artifact. Artifacts restored from disk carry no
    /// drift baseline.
    pub fn from_artifact(artifact: Artifact, path: &Path, reference: Option<Vec<Vec<Feature>>>) -> Self {
        Self {
            metrics: Metrics {
                accuracy: artifact.accuracy,
                trained_at: artifact.trained_at,
                features: artifact.features,
                model_path: path.to_path_buf(),
                experiment: artifact.experiment,
                run: artifact.run,
            },
            model: artifact.model,
            reference,
        }
    }
    pub fn model(&self) -> &Forest {
        &self.model
    }
    pub fn reference(&self) -> Option<&[Vec<Feature>]> {
        self.reference.as_deref()
    }
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
