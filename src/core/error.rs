use thiserror::Error;

use crate::concurrency::{ConcurrencyConflict, DriverError};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Column '{column}' of '{table}' has no parameter prototype")]
    UnknownColumn { table: String, column: String },

    #[error("Statement for '{table}' would have an empty {clause} clause")]
    EmptyClause { table: String, clause: &'static str },

    #[error("Request carries no query text")]
    MissingQueryText,

    #[error("Parameter '{0}' is not bound on the command")]
    UnknownParameter(String),

    #[error("Provider metadata has no server side text for '{0}'")]
    MissingServerSideText(String),

    #[error("Provider metadata has no {0} stored procedure name")]
    MissingProcedureName(&'static str),

    #[error("Concurrency conflict: {0}")]
    Concurrency(#[from] ConcurrencyConflict),

    #[error("Execution error: {0}")]
    Execution(DriverError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl DbError {
    /// True when the error signals a stale row rather than a generic failure.
    pub fn is_concurrency(&self) -> bool {
        matches!(self, Self::Concurrency(_))
    }
}
