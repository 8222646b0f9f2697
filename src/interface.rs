use async_trait::async_trait;
use log::debug;

use crate::command::Command;
use crate::concurrency::DriverError;
use crate::config::Dialect;
use crate::core::Result;
use crate::result::ResultSet;

/// What an executed command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    RowsAffected(u64),
    Rows(ResultSet),
}

impl ExecutionOutcome {
    pub fn rows_affected(&self) -> u64 {
        match self {
            Self::RowsAffected(n) => *n,
            Self::Rows(rs) => rs.row_count() as u64,
        }
    }
}

/// The driver that actually runs built commands.
///
/// Implementations bind parameter values, honour the command timeout and
/// write output and input/output parameter values back onto the command.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &mut Command) -> std::result::Result<ExecutionOutcome, DriverError>;
}

/// Run a command, turning a driver error into either a concurrency conflict
/// or a pass-through execution error
pub async fn execute_checked<E>(executor: &E, command: &mut Command, dialect: &Dialect) -> Result<ExecutionOutcome>
where
    E: CommandExecutor + ?Sized,
{
    match executor.execute(command).await {
        Ok(outcome) => {
            debug!("executed: {} ({} rows)", command.text, outcome.rows_affected());
            Ok(outcome)
        }
        Err(err) => Err(err.into_db_error(dialect)),
    }
}
