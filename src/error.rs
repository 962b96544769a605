//! Crate error types. Kept small and specific — one enum per fallible
//! subsystem rather than a single catch-all error.

use thiserror::Error;

/// Failure loading a touchmap file. Callers log the error and leave the
/// existing touchmap in place rather than propagating the failure; the
/// enum exists so the parsing logic itself stays unit-testable.
#[derive(Debug, Error)]
pub enum TouchmapError {
    #[error("failed to open touchmap file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse touchmap JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("touchmap is missing required field `{0}`")]
    MissingField(&'static str),
}
