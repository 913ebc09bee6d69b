//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the scheduling engine.
///
/// Infeasibility is never an error; only structurally invalid input is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid schedule constraints: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

impl SolveError {
    /// The validation problems behind this error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
        }
    }
}
