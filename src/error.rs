use crate::dto::attendance_dto::ValidationReport;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Expected, user-facing gate failure (role, non-work-day, punch state).
    /// Carries the message shown to the user; never retried automatically.
    #[error("{0}")]
    Precondition(String),

    /// A rejected edit submission. Carries every finding across all rows so
    /// the user can correct the whole batch in one pass.
    #[error("Validation failed with {} finding(s)", .0.findings.len())]
    Validation(ValidationReport),

    /// Corrupt persisted state (e.g. a malformed stored time). Persisted
    /// values are written by this engine, so this aborts instead of guessing.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
