//! Delimited, qualified names for tables and stored procedures.
//!
//! The catalog part is only written when a schema is also present, so a name
//! is one of `[table]`, `[schema].[table]` or `[catalog].[schema].[table]`.

use crate::config::Dialect;
use crate::metadata::{DataRequest, DynamicQuery, QueryType};

fn qualify(catalog: Option<&str>, schema: Option<&str>, name: String, dialect: &Dialect) -> String {
    let mut full = String::new();

    if let (Some(catalog), Some(_)) = (catalog, schema) {
        full.push_str(&dialect.table(catalog));
        full.push('.');
    }

    if let Some(schema) = schema {
        full.push_str(&dialect.table(schema));
        full.push('.');
    }

    full.push_str(&name);
    full
}

/// Name of the table a request writes to
///
/// Catalog and schema resolve request override first, then the request's
/// dynamic query, then provider metadata. The table part is the dynamic
/// query source when set, the query text of a `TableDirect` request, and
/// the provider destination otherwise.
pub fn full_table_name(request: &DataRequest, dialect: &Dialect) -> String {
    let query = request.dynamic_query.as_ref();
    let meta = &request.provider_metadata;

    let catalog = request
        .catalog
        .as_deref()
        .or_else(|| query.and_then(|q| q.catalog.as_deref()))
        .or(meta.catalog.as_deref());
    let schema = request
        .schema
        .as_deref()
        .or_else(|| query.and_then(|q| q.schema.as_deref()))
        .or(meta.schema.as_deref());

    let table = match (query.and_then(|q| q.query_source.as_deref()), &request.query_text) {
        (Some(source), _) => source,
        (None, Some(text)) if request.query_type == QueryType::TableDirect => text.as_str(),
        _ => meta.destination.as_str(),
    };

    qualify(catalog, schema, dialect.table(table), dialect)
}

/// Name of the source a dynamic query object reads from
pub fn full_query_name(request: &DataRequest, query: &DynamicQuery, dialect: &Dialect) -> String {
    let meta = &request.provider_metadata;

    let catalog = request
        .catalog
        .as_deref()
        .or(query.catalog.as_deref())
        .or(meta.catalog.as_deref());
    let schema = request
        .schema
        .as_deref()
        .or(query.schema.as_deref())
        .or(meta.schema.as_deref());
    let table = query.query_source.as_deref().unwrap_or(&meta.destination);

    qualify(catalog, schema, dialect.table(table), dialect)
}

/// Name of a stored procedure, delimited with the procedure delimiters
pub fn full_procedure_name(request: &DataRequest, procedure: &str, dialect: &Dialect) -> String {
    let meta = &request.provider_metadata;

    let catalog = request.catalog.as_deref().or(meta.catalog.as_deref());
    let schema = request.schema.as_deref().or(meta.schema.as_deref());

    qualify(catalog, schema, dialect.procedure(procedure), dialect)
}
