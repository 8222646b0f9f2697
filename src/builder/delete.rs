use log::debug;

use super::CommandBuilder;
use super::naming::full_table_name;
use crate::command::{Command, CommandKind, PropertyBag};
use crate::core::{DbError, Result};
use crate::metadata::DataRequest;

impl CommandBuilder {
    /// Build a parameterized DELETE keyed on primary key and application
    /// concurrency columns, each bound to the row's current value
    pub fn build_delete(&self, request: &mut DataRequest) -> Result<Command> {
        request.properties = PropertyBag::new();

        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::Text);
        let mut predicates = Vec::new();

        for col in &request.columns {
            if col.is_in_primary_key || col.is_entity_spaces_concurrency {
                let p = types.clone_parameter(&col.name)?;
                predicates.push(format!("{} = {}", self.dialect.column(&col.name), p.name));
                cmd.add_parameter(p);
            }
        }

        let name = full_table_name(request, &self.dialect);
        if predicates.is_empty() {
            return Err(DbError::EmptyClause { table: name, clause: "WHERE" });
        }

        cmd.text = format!("DELETE FROM {} WHERE {}", name, predicates.join(" AND "));

        debug!("delete command: {} ({} parameters)", cmd.text, cmd.parameters.len());
        Ok(cmd)
    }
}
