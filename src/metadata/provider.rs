use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::column::SpecialKind;
use crate::core::{DbError, Result};

/// Authoritative naming and dialect text for one table, as published by the
/// schema catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderMetadata {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    /// Table written to by generated commands
    pub destination: String,
    /// Table or view read from; reported back when generated values need re-fetching
    pub source: String,
    pub sp_insert: Option<String>,
    pub sp_update: Option<String>,
    pub sp_delete: Option<String>,
    /// Free-form provider text, e.g. `"DateAdded.ServerSideText" -> "CURRENT TIMESTAMP"`
    pub properties: HashMap<String, String>,
}

impl ProviderMetadata {
    pub fn new(destination: impl Into<String>) -> Self {
        let destination = destination.into();
        Self {
            source: destination.clone(),
            destination,
            ..Self::default()
        }
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn procedures(
        mut self,
        insert: impl Into<String>,
        update: impl Into<String>,
        delete: impl Into<String>,
    ) -> Self {
        self.sp_insert = Some(insert.into());
        self.sp_update = Some(update.into());
        self.sp_delete = Some(delete.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// SQL expression that computes an audit column on the server
    pub fn server_side_text(&self, kind: SpecialKind) -> Result<&str> {
        let key = kind.server_side_key();
        self.get(&key).ok_or(DbError::MissingServerSideText(key))
    }
}
