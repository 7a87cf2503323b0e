use super::*;
use mls_core::*;

/// What the service needs from a trained model.
///
/// `proba` is optional: classifiers without calibrated probabilities return
/// `None` and callers fall back to a fixed confidence.
pub trait Classifier: Send + Sync {
    /// Model family name reported to clients.
    fn name(&self) -> &'static str;
    /// Fit on the full dataset, replacing any previous fit.
    fn fit(&mut self, data: &Dataset) -> anyhow::Result<()>;
    /// Predicted class for one row.
    fn predict(&self, row: &[Feature]) -> anyhow::Result<Label>;
    /// Per-class probabilities for one row, if the model can produce them.
    fn proba(&self, row: &[Feature]) -> Option<anyhow::Result<Vec<Probability>>> {
        let _ = row;
        None
    }
    /// Number of features the fitted model expects.
    fn width(&self) -> usize;
}
