/// A request field failed its schema check.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct Invalid {
    pub field: &'static str,
    pub reason: String,
}

impl Invalid {
    pub fn new(field: &'static str, reason: impl ToString) -> Self {
        Self {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Schema-level checks a request must pass before it reaches the manager.
pub trait Validate {
    fn validate(&self) -> Result<(), Invalid>;
}
