use mls_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Drift verdict for one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub name: String,
    pub ks_statistic: Statistic,
    pub p_value: Statistic,
    pub psi: Statistic,
    pub wasserstein: Statistic,
    pub reference_mean: Statistic,
    pub current_mean: Statistic,
    pub drift_detected: bool,
}

/// Output of one reference/current comparison.
///
/// Callers are expected to pass this through untouched; its shape is owned
/// by the analyser, not by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub method: String,
    pub p_value_threshold: Statistic,
    pub share_threshold: Statistic,
    pub reference_rows: usize,
    pub current_rows: usize,
    pub n_features: usize,
    pub n_drifted: usize,
    pub share_drifted: Statistic,
    pub dataset_drift: bool,
    pub features: Vec<FeatureDrift>,
}

impl DriftReport {
    pub fn drifted(&self) -> impl Iterator<Item = &FeatureDrift> {
        self.features.iter().filter(|f| f.drift_detected)
    }
}
