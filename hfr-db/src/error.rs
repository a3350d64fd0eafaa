use thiserror::Error;

/// Failures of the wave store.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// The store could not be opened, or a statement failed to prepare or run.
    #[error("wave store unavailable: {0}")]
    Connectivity(#[from] rusqlite::Error),

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid value {value:?} for column {column}")]
    Parse { column: &'static str, value: String },

    /// A thread panicked while holding the connection.
    #[error("wave store connection lock poisoned")]
    Poisoned,
}
