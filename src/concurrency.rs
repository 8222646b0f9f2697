use log::warn;
use thiserror::Error;

use crate::config::Dialect;
use crate::core::DbError;

/// One entry of a driver error's error list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSubError {
    pub native_error: i32,
    pub message: String,
    /// Component that raised the error
    pub origin: Option<String>,
}

impl DriverSubError {
    pub fn new(native_error: i32, message: impl Into<String>) -> Self {
        Self {
            native_error,
            message: message.into(),
            origin: None,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Error raised by the external executor.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
    pub errors: Vec<DriverSubError>,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: DriverSubError) -> Self {
        self.errors.push(error);
        self
    }

    /// Classify into a stale-row conflict or a pass-through execution error
    pub fn into_db_error(self, dialect: &Dialect) -> DbError {
        match check_for_concurrency_conflict(&self, dialect.concurrency_error_code) {
            Some(conflict) => DbError::Concurrency(conflict),
            None => DbError::Execution(self),
        }
    }
}

/// The row being written was changed or removed since it was read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConcurrencyConflict {
    pub message: String,
    pub origin: Option<String>,
    #[source]
    pub cause: DriverError,
}

/// Look for the sub-error carrying the dialect's conflict code
///
/// Returns `None` for every other driver error, including one with an empty
/// error list.
pub fn check_for_concurrency_conflict(err: &DriverError, code: i32) -> Option<ConcurrencyConflict> {
    let matched = err.errors.iter().find(|sub| sub.native_error == code)?;

    warn!("concurrency conflict ({}): {}", code, matched.message);

    Some(ConcurrencyConflict {
        message: matched.message.clone(),
        origin: matched.origin.clone(),
        cause: err.clone(),
    })
}
