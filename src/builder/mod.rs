// ============================================================================
// Command Builders
// ============================================================================
//
// Each builder consumes a request's column metadata plus the names of the
// modified columns and yields a ready-to-execute command. Builders never
// execute SQL; the property bag written back into the request tells the
// caller what to re-read afterwards.
//
// ============================================================================

pub mod classify;
pub mod naming;

mod binder;
mod delete;
mod insert;
mod procedure;
mod update;

use std::sync::Arc;

use crate::cache::{ParameterCache, ParameterSet};
use crate::command::{Command, CommandKind};
use crate::config::Dialect;
use crate::core::Result;
use crate::metadata::DataRequest;

pub use classify::{ColumnRole, Statement, classify};
pub use naming::{full_procedure_name, full_query_name, full_table_name};

/// Builds commands for one dialect against a shared parameter cache.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    dialect: Dialect,
    cache: Arc<ParameterCache>,
}

impl CommandBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_cache(dialect, Arc::new(ParameterCache::new()))
    }

    /// Build against a cache shared with other builders, possibly of other dialects
    pub fn with_cache(dialect: Dialect, cache: Arc<ParameterCache>) -> Self {
        Self { dialect, cache }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn cache(&self) -> &Arc<ParameterCache> {
        &self.cache
    }

    fn parameters(&self, request: &DataRequest) -> Result<Arc<ParameterSet>> {
        self.cache.parameters_for(request, &self.dialect)
    }

    fn new_command(&self, request: &DataRequest, kind: CommandKind) -> Command {
        Command::new(kind, request.command_timeout)
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}
