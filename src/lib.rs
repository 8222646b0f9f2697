// ============================================================================
// dmlforge Library
// ============================================================================
//
// Compiles table metadata plus a set of changed columns into parameterized
// INSERT / UPDATE / DELETE statements and stored procedure calls, with the
// optimistic concurrency, identity and server-default handling a save loop
// needs. Execution is left to an external driver.
//
// ============================================================================

pub mod builder;
pub mod cache;
pub mod command;
pub mod concurrency;
pub mod config;
pub mod core;
pub mod interface;
pub mod metadata;
pub mod result;
pub mod row;

// Re-export main types for convenience
pub use builder::CommandBuilder;
pub use cache::{ParameterCache, ParameterSet, SchemaKey};
pub use command::{Command, CommandKind, Parameter, ParameterDirection, PropertyBag, SourceVersion};
pub use concurrency::{ConcurrencyConflict, DriverError, DriverSubError, check_for_concurrency_conflict};
pub use config::Dialect;
pub use core::{DbError, ProviderType, Result, Value};
pub use interface::{CommandExecutor, ExecutionOutcome, execute_checked};
pub use metadata::{
    ColumnMetadata, ColumnMetadataCollection, DataRequest, DynamicQuery, ProviderMetadata,
    QueryParameter, QueryType, SpecialColumn, SpecialKind,
};
pub use result::ResultSet;
pub use row::{DataRow, PendingChanges, RowState, RowStateSource};
