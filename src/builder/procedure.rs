use log::debug;

use super::CommandBuilder;
use super::naming::full_procedure_name;
use crate::cache::ParameterSet;
use crate::command::{Command, CommandKind, ParameterDirection, PropertyBag, SourceVersion};
use crate::core::{DbError, Result};
use crate::metadata::{ColumnMetadata, DataRequest};

impl CommandBuilder {
    /// Build a stored procedure INSERT call
    ///
    /// Identifier defaults, computed, identity and application concurrency
    /// columns become input/output so the caller may pre-assign them or
    /// receive the generated value.
    pub fn build_insert_procedure(&self, request: &mut DataRequest) -> Result<Command> {
        request.properties = PropertyBag::new();

        let procedure = request
            .provider_metadata
            .sp_insert
            .as_deref()
            .ok_or(DbError::MissingProcedureName("insert"))?;
        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::StoredProcedure);
        cmd.text = full_procedure_name(request, procedure, &self.dialect);

        self.populate_procedure_parameters(&mut cmd, request, &types)?;

        for col in &request.columns {
            if col.has_identifier_default()
                || col.is_computed
                || col.is_auto_increment
                || col.is_entity_spaces_concurrency
            {
                make_input_output(&mut cmd, &types, col)?;
            }
        }

        debug!("insert procedure: {} ({} parameters)", cmd.text, cmd.parameters.len());
        Ok(cmd)
    }

    /// Build a stored procedure UPDATE call
    pub fn build_update_procedure(&self, request: &mut DataRequest) -> Result<Command> {
        request.properties = PropertyBag::new();

        let procedure = request
            .provider_metadata
            .sp_update
            .as_deref()
            .ok_or(DbError::MissingProcedureName("update"))?;
        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::StoredProcedure);
        cmd.text = full_procedure_name(request, procedure, &self.dialect);

        self.populate_procedure_parameters(&mut cmd, request, &types)?;

        for col in &request.columns {
            if col.is_computed || col.is_concurrency || col.is_entity_spaces_concurrency {
                make_input_output(&mut cmd, &types, col)?;
            }
        }

        debug!("update procedure: {} ({} parameters)", cmd.text, cmd.parameters.len());
        Ok(cmd)
    }

    /// Build a stored procedure DELETE call
    ///
    /// Only keys (current value) and concurrency tokens (original value)
    /// are passed.
    pub fn build_delete_procedure(&self, request: &mut DataRequest) -> Result<Command> {
        request.properties = PropertyBag::new();

        let procedure = request
            .provider_metadata
            .sp_delete
            .as_deref()
            .ok_or(DbError::MissingProcedureName("delete"))?;
        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::StoredProcedure);
        cmd.text = full_procedure_name(request, procedure, &self.dialect);

        for col in &request.columns {
            if col.is_in_primary_key {
                let p = types
                    .clone_parameter(&col.name)?
                    .with_version(SourceVersion::Current);
                cmd.add_parameter(p);
            } else if col.is_concurrency || col.is_entity_spaces_concurrency {
                let p = types
                    .clone_parameter(&col.name)?
                    .with_version(SourceVersion::Original);
                cmd.add_parameter(p);
            }
        }

        debug!("delete procedure: {} ({} parameters)", cmd.text, cmd.parameters.len());
        Ok(cmd)
    }

    /// One current-value parameter per column, in schema order
    fn populate_procedure_parameters(
        &self,
        cmd: &mut Command,
        request: &DataRequest,
        types: &ParameterSet,
    ) -> Result<()> {
        for col in &request.columns {
            let mut p = types
                .clone_parameter(&col.name)?
                .with_version(SourceVersion::Current);

            if p.provider_type.is_row_version() {
                p.direction = ParameterDirection::InputOutput;
            }

            if col.is_computed && col.character_max_length > 0 {
                p.size = col.character_max_length;
            }

            cmd.add_parameter(p);
        }
        Ok(())
    }
}

fn make_input_output(cmd: &mut Command, types: &ParameterSet, col: &ColumnMetadata) -> Result<()> {
    let name = &types.prototype(&col.name)?.name;
    let p = cmd
        .parameter_mut(name)
        .ok_or_else(|| DbError::UnknownParameter(name.clone()))?;
    p.direction = ParameterDirection::InputOutput;
    Ok(())
}
