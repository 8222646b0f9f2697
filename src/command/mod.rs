pub mod parameter;
pub mod properties;

use std::time::Duration;

use serde::Serialize;

use crate::core::{DbError, Result};
use crate::row::DataRow;

pub use parameter::{Parameter, ParameterDirection, SourceVersion};
pub use properties::PropertyBag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CommandKind {
    #[default]
    Text,
    StoredProcedure,
}

/// A ready-to-execute command. Produced fresh per build and owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Command {
    pub text: String,
    pub kind: CommandKind,
    pub parameters: Vec<Parameter>,
    pub timeout: Option<Duration>,
}

impl Command {
    pub fn new(kind: CommandKind, timeout: Option<Duration>) -> Self {
        Self {
            kind,
            timeout,
            ..Self::default()
        }
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }

    /// Fill row-bound parameters from the row image each one asks for
    ///
    /// Literal parameters keep their value and output-only parameters are
    /// left untouched.
    pub fn bind_row(&mut self, row: &DataRow) -> Result<()> {
        for param in &mut self.parameters {
            if !param.direction.sends_value() {
                continue;
            }
            let Some(column) = &param.source_column else {
                continue;
            };
            let value = row.value(column, param.source_version).ok_or_else(|| {
                DbError::UnknownColumn {
                    table: "row".to_string(),
                    column: column.clone(),
                }
            })?;
            param.value = value.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProviderType, Value};
    use crate::row::DataRow;

    fn bound(name: &str, column: &str) -> Parameter {
        Parameter {
            source_column: Some(column.to_string()),
            ..Parameter::new(name, ProviderType::Integer)
        }
    }

    #[test]
    fn test_bind_row_uses_requested_version() {
        let mut row = DataRow::unchanged([("Id", Value::Integer(7)), ("Qty", Value::Integer(1))]);
        row.set("Qty", 5);

        let mut cmd = Command::new(CommandKind::Text, None);
        cmd.add_parameter(bound("@Qty", "Qty"));
        cmd.add_parameter(bound("@Qty_Original", "Qty").with_version(SourceVersion::Original));
        cmd.add_parameter(Parameter::new("@Version", ProviderType::Integer).with_value(1));

        cmd.bind_row(&row).unwrap();

        assert_eq!(cmd.parameter("@Qty").unwrap().value, Value::Integer(5));
        assert_eq!(cmd.parameter("@Qty_Original").unwrap().value, Value::Integer(1));
        assert_eq!(cmd.parameter("@Version").unwrap().value, Value::Integer(1));
    }

    #[test]
    fn test_bind_row_skips_output_parameters() {
        let row = DataRow::added([("Id", Value::Null)]);
        let mut cmd = Command::new(CommandKind::StoredProcedure, None);
        cmd.add_parameter(bound("@Missing", "Missing").with_direction(ParameterDirection::Output));

        assert!(cmd.bind_row(&row).is_ok());
    }

    #[test]
    fn test_bind_row_missing_column() {
        let row = DataRow::added([("Id", Value::Integer(1))]);
        let mut cmd = Command::new(CommandKind::Text, None);
        cmd.add_parameter(bound("@Name", "Name"));

        assert!(matches!(
            cmd.bind_row(&row),
            Err(DbError::UnknownColumn { column, .. }) if column == "Name"
        ));
    }
}
