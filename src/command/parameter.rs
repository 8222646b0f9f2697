use serde::{Deserialize, Serialize};

use crate::config::Dialect;
use crate::core::{ProviderType, Value};
use crate::metadata::ColumnMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

impl ParameterDirection {
    /// Directions whose value flows back to the caller after execution
    pub fn returns_value(&self) -> bool {
        !matches!(self, Self::Input)
    }

    /// Directions whose value is sent to the server
    pub fn sends_value(&self) -> bool {
        matches!(self, Self::Input | Self::InputOutput)
    }
}

/// Which row image a parameter reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceVersion {
    #[default]
    Current,
    Original,
}

/// A command parameter.
///
/// The parameter cache holds one prototype per column; commands only ever
/// hold clones, so binding a value on a command never reaches the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub provider_type: ProviderType,
    pub size: i64,
    pub scale: u8,
    pub precision: u8,
    pub direction: ParameterDirection,
    pub value: Value,
    /// Row column the value is read from; `None` for literal values
    pub source_column: Option<String>,
    pub source_version: SourceVersion,
}

impl Parameter {
    pub fn new(name: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            name: name.into(),
            provider_type,
            size: 0,
            scale: 0,
            precision: 0,
            direction: ParameterDirection::Input,
            value: Value::Null,
            source_column: None,
            source_version: SourceVersion::Current,
        }
    }

    /// Derive the prototype parameter for a column
    pub fn prototype(col: &ColumnMetadata, dialect: &Dialect) -> Self {
        let logical: String = col.name.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            size: col.character_max_length.max(0),
            scale: col.numeric_scale,
            precision: col.numeric_precision,
            source_column: Some(col.name.clone()),
            ..Self::new(dialect.parameter(&logical), col.provider_type)
        }
    }

    /// Bind a literal value, detaching the parameter from row binding
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self.source_column = None;
        self
    }

    pub fn with_version(mut self, version: SourceVersion) -> Self {
        self.source_version = version;
        self
    }

    pub fn with_direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_from_column() {
        let col = ColumnMetadata::new("Unit Price", ProviderType::Decimal).precision(19, 4);
        let p = Parameter::prototype(&col, &Dialect::default());

        assert_eq!(p.name, "@UnitPrice");
        assert_eq!(p.source_column.as_deref(), Some("Unit Price"));
        assert_eq!((p.precision, p.scale), (19, 4));
        assert_eq!(p.direction, ParameterDirection::Input);
        assert_eq!(p.source_version, SourceVersion::Current);
    }

    #[test]
    fn test_clones_do_not_alias() {
        let col = ColumnMetadata::new("Total", ProviderType::Money);
        let prototype = Parameter::prototype(&col, &Dialect::default());

        let mut first = prototype.clone();
        let second = prototype.clone();
        first.value = Value::Float(10.5);

        assert_eq!(first.value, Value::Float(10.5));
        assert!(second.value.is_null());
        assert!(prototype.value.is_null());
    }

    #[test]
    fn test_literal_detaches_from_row() {
        let col = ColumnMetadata::new("Version", ProviderType::Integer);
        let p = Parameter::prototype(&col, &Dialect::default()).with_value(1);
        assert_eq!(p.value, Value::Integer(1));
        assert!(p.source_column.is_none());
    }

    #[test]
    fn test_direction_categories() {
        assert!(!ParameterDirection::Input.returns_value());
        assert!(ParameterDirection::InputOutput.returns_value());
        assert!(ParameterDirection::InputOutput.sends_value());
        assert!(!ParameterDirection::Output.sends_value());
        assert!(!ParameterDirection::ReturnValue.sends_value());
    }
}
