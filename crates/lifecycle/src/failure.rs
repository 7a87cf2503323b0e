use mls_dto::Invalid;

pub const NO_MODEL: &str = "No model available";
pub const NO_MODEL_TRAIN_FIRST: &str = "No model available. Please train a model first.";
pub const NO_BASELINE: &str = "No reference data available. Train a model first.";

/// Why a lifecycle operation did not succeed.
///
/// Callers can tell bad input apart from an operation issued in the wrong
/// lifecycle state, and both apart from collaborator faults.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Malformed or out-of-range input. Nothing was touched.
    #[error("{0}")]
    Validation(String),
    /// The operation needs state that does not exist yet. Nothing was touched.
    #[error("{0}")]
    Precondition(String),
    /// A collaborator failed. For `train` the previous snapshot stays active.
    #[error("{context}: {cause:#}")]
    Internal {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl Failure {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Precondition(_) => "precondition_error",
            Self::Internal { .. } => "internal_error",
        }
    }
    /// Adapter for `map_err` that tags an internal error with the failing operation.
    pub fn internal<E>(context: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        move |e| Self::Internal {
            context,
            cause: e.into(),
        }
    }
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

impl From<Invalid> for Failure {
    fn from(invalid: Invalid) -> Self {
        Self::Validation(invalid.to_string())
    }
}
