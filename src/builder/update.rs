use log::debug;

use super::CommandBuilder;
use super::classify::{ColumnRole, Statement, classify, is_modified};
use super::naming::full_table_name;
use crate::command::{Command, CommandKind, PropertyBag, SourceVersion};
use crate::core::{DbError, Result};
use crate::metadata::DataRequest;

impl CommandBuilder {
    /// Build a parameterized UPDATE for the modified columns
    ///
    /// Key and concurrency predicates bind the row's original values and
    /// their parameters follow the SET parameters. An application
    /// concurrency column increments itself. The statement ends with `;`.
    pub fn build_update(&self, request: &mut DataRequest, modified: &[&str]) -> Result<Command> {
        request.properties = PropertyBag::new();

        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::Text);
        let mut props = PropertyBag::new();
        let mut sets = Vec::new();
        let mut predicates = Vec::new();
        let mut where_params = Vec::new();
        let mut key_columns = Vec::new();

        let cols = &request.columns;
        let meta = &request.provider_metadata;

        for col in cols {
            // Keys locate the row; they are never reassigned
            let settable = is_modified(modified, col) && !col.is_in_primary_key;

            match classify(col, cols, Statement::Update, settable) {
                ColumnRole::Bound => {
                    let p = types.clone_parameter(&col.name)?;
                    sets.push(format!("{} = {}", self.dialect.column(&col.name), p.name));
                    cmd.add_parameter(p);
                }
                ColumnRole::ServerConcurrency => {
                    let p = types
                        .clone_parameter(&col.name)?
                        .with_version(SourceVersion::Original);
                    predicates.push(format!("{} = {}", self.dialect.column(&col.name), p.name));
                    where_params.push(p);
                }
                ColumnRole::AppConcurrency => {
                    props.concurrency = Some(col.name.clone());
                    let column = self.dialect.column(&col.name);
                    let p = types
                        .clone_parameter(&col.name)?
                        .with_version(SourceVersion::Original);
                    sets.push(format!("{} = {} + 1", column, column));
                    predicates.push(format!("{} = {}", column, p.name));
                    where_params.push(p);
                }
                ColumnRole::AutoIncrement
                | ColumnRole::Computed
                | ColumnRole::Special
                | ColumnRole::Defaulted
                | ColumnRole::Skip => {}
            }

            if col.is_in_primary_key {
                let p = types
                    .clone_parameter(&col.name)?
                    .with_version(SourceVersion::Original);
                predicates.push(format!("{} = {}", self.dialect.column(&col.name), p.name));
                where_params.push(p);
                key_columns.push(col.name.clone());
            }
        }

        for (kind, special) in cols.server_side_specials() {
            if !kind.touched_on_update() {
                continue;
            }
            sets.push(format!(
                "{} = {}",
                self.dialect.column(&special.column_name),
                meta.server_side_text(kind)?
            ));
            props.defaults.push(special.column_name.clone());
        }

        let name = full_table_name(request, &self.dialect);
        if sets.is_empty() {
            return Err(DbError::EmptyClause { table: name, clause: "SET" });
        }
        if predicates.is_empty() {
            return Err(DbError::EmptyClause { table: name, clause: "WHERE" });
        }

        if props.needs_reselect() {
            props.where_columns = key_columns;
        }

        for p in where_params {
            cmd.add_parameter(p);
        }

        cmd.text = format!(
            "UPDATE {} SET {} WHERE {};",
            name,
            sets.join(", "),
            predicates.join(" AND ")
        );

        debug!("update command: {} ({} parameters)", cmd.text, cmd.parameters.len());

        request.properties = props;
        Ok(cmd)
    }
}
