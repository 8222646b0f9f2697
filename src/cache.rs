use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;

use crate::command::Parameter;
use crate::config::Dialect;
use crate::core::{DbError, Result};
use crate::metadata::{ColumnMetadataCollection, DataRequest};

/// Identity of a table schema snapshot as seen through one dialect.
///
/// The parameter prefix is part of the key because prototype names carry it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub destination: String,
    pub param_prefix: String,
}

impl SchemaKey {
    pub fn for_request(request: &DataRequest, dialect: &Dialect) -> Self {
        let meta = &request.provider_metadata;
        Self {
            catalog: request.catalog.clone().or_else(|| meta.catalog.clone()),
            schema: request.schema.clone().or_else(|| meta.schema.clone()),
            destination: meta.destination.clone(),
            param_prefix: dialect.param_prefix.clone(),
        }
    }
}

/// Parameter prototypes for one table, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    table: String,
    prototypes: HashMap<String, Parameter>,
}

impl ParameterSet {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            prototypes: HashMap::new(),
        }
    }

    pub fn from_columns(table: &str, columns: &ColumnMetadataCollection, dialect: &Dialect) -> Self {
        let prototypes = columns
            .iter()
            .map(|col| (col.name.clone(), Parameter::prototype(col, dialect)))
            .collect();
        Self {
            table: table.to_string(),
            prototypes,
        }
    }

    pub fn with_prototype(mut self, column: impl Into<String>, parameter: Parameter) -> Self {
        self.prototypes.insert(column.into(), parameter);
        self
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Look up the prototype; a missing column is a metadata contract violation
    pub fn prototype(&self, column: &str) -> Result<&Parameter> {
        self.prototypes
            .get(column)
            .ok_or_else(|| DbError::UnknownColumn {
                table: self.table.clone(),
                column: column.to_string(),
            })
    }

    /// A fresh copy of the prototype, owned by the caller
    pub fn clone_parameter(&self, column: &str) -> Result<Parameter> {
        self.prototype(column).cloned()
    }
}

/// Lazily populated parameter prototypes, one set per schema.
///
/// A set is written once, on first use or through [`ParameterCache::insert`],
/// and only read afterwards; readers get a shared `Arc` and never see a set
/// change under them. Builders with different dialects may share a cache.
#[derive(Debug, Default)]
pub struct ParameterCache {
    sets: RwLock<HashMap<SchemaKey, Arc<ParameterSet>>>,
}

impl ParameterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with a set built elsewhere
    pub fn insert(&self, key: SchemaKey, set: ParameterSet) -> Result<Arc<ParameterSet>> {
        let set = Arc::new(set);
        self.sets.write()?.insert(key, Arc::clone(&set));
        Ok(set)
    }

    pub fn get(&self, key: &SchemaKey) -> Result<Option<Arc<ParameterSet>>> {
        Ok(self.sets.read()?.get(key).cloned())
    }

    /// Return the set for the request's schema, building it from the request
    /// columns on first use
    pub fn parameters_for(&self, request: &DataRequest, dialect: &Dialect) -> Result<Arc<ParameterSet>> {
        let key = SchemaKey::for_request(request, dialect);

        if let Some(set) = self.sets.read()?.get(&key) {
            return Ok(Arc::clone(set));
        }

        let mut sets = self.sets.write()?;
        let set = sets.entry(key).or_insert_with_key(|key| {
            debug!(
                "populating parameter cache for {} ({} columns)",
                key.destination,
                request.columns.len()
            );
            Arc::new(ParameterSet::from_columns(
                &key.destination,
                &request.columns,
                dialect,
            ))
        });
        Ok(Arc::clone(set))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.sets.read()?.len())
    }

    pub fn clear(&self) -> Result<()> {
        self.sets.write()?.clear();
        Ok(())
    }
}
