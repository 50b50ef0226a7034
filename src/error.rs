use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("diagram has {} validation error(s), first: {}", .0.len(), first_of(.0))]
    Invalid(Vec<ValidationError>),
}

fn first_of(errors: &[ValidationError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}
