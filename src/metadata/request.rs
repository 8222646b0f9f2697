use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ColumnMetadataCollection, ProviderMetadata};
use crate::command::{ParameterDirection, PropertyBag};
use crate::core::{ProviderType, Value};

/// How free-form request text is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryType {
    #[default]
    Text,
    StoredProcedure,
    /// The query text names a table to read or write directly
    TableDirect,
}

/// A caller-supplied parameter for free-form query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub direction: ParameterDirection,
    #[serde(default)]
    pub provider_type: Option<ProviderType>,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub scale: u8,
    #[serde(default)]
    pub precision: u8,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            direction: ParameterDirection::Input,
            provider_type: None,
            size: 0,
            scale: 0,
            precision: 0,
        }
    }

    pub fn output(name: impl Into<String>, provider_type: ProviderType, size: i64) -> Self {
        Self {
            direction: ParameterDirection::Output,
            provider_type: Some(provider_type),
            size,
            ..Self::new(name, Value::Null)
        }
    }

    pub fn direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }
}

/// Naming overrides carried by a dynamic query object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicQuery {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    /// Table or view the query reads instead of the provider destination
    pub query_source: Option<String>,
}

/// The unit of work for one command build.
///
/// Owned by a single build call; the produced property bag is written back
/// into `properties`.
#[derive(Debug, Clone, Default)]
pub struct DataRequest {
    /// Request-level catalog override
    pub catalog: Option<String>,
    /// Request-level schema override
    pub schema: Option<String>,
    pub provider_metadata: ProviderMetadata,
    pub columns: ColumnMetadataCollection,
    pub command_timeout: Option<Duration>,
    pub query_type: QueryType,
    pub query_text: Option<String>,
    pub parameters: Vec<QueryParameter>,
    pub dynamic_query: Option<DynamicQuery>,
    pub properties: PropertyBag,
}

impl DataRequest {
    pub fn new(provider_metadata: ProviderMetadata, columns: ColumnMetadataCollection) -> Self {
        Self {
            provider_metadata,
            columns,
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

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    pub fn query(mut self, query_type: QueryType, text: impl Into<String>) -> Self {
        self.query_type = query_type;
        self.query_text = Some(text.into());
        self
    }

    pub fn parameter(mut self, parameter: QueryParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn dynamic_query(mut self, query: DynamicQuery) -> Self {
        self.dynamic_query = Some(query);
        self
    }
}
