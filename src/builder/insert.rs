use log::debug;

use super::CommandBuilder;
use super::classify::{ColumnRole, Statement, classify, is_modified};
use super::naming::full_table_name;
use crate::command::{Command, CommandKind, PropertyBag};
use crate::core::Result;
use crate::metadata::DataRequest;

impl CommandBuilder {
    /// Build a parameterized INSERT for the modified columns
    ///
    /// Identity and timestamp columns are left to the server and reported in
    /// the property bag. An application concurrency column always starts at
    /// 1. With nothing to write the statement falls back to `DEFAULT VALUES`.
    pub fn build_insert(&self, request: &mut DataRequest, modified: &[&str]) -> Result<Command> {
        request.properties = PropertyBag::new();

        let types = self.parameters(request)?;
        let mut cmd = self.new_command(request, CommandKind::Text);
        let mut props = PropertyBag::new();
        let mut into = Vec::new();
        let mut values = Vec::new();
        let mut where_columns = Vec::new();

        let cols = &request.columns;
        let meta = &request.provider_metadata;

        for col in cols {
            match classify(col, cols, Statement::Insert, is_modified(modified, col)) {
                ColumnRole::Bound => {
                    let p = types.clone_parameter(&col.name)?;
                    into.push(self.dialect.column(&col.name));
                    values.push(p.name.clone());
                    cmd.add_parameter(p);
                }
                ColumnRole::AutoIncrement => {
                    props.auto_increment = Some(col.name.clone());
                    props.source = Some(meta.source.clone());
                }
                ColumnRole::ServerConcurrency => {
                    props.timestamp = Some(col.name.clone());
                    props.source = Some(meta.source.clone());
                }
                ColumnRole::AppConcurrency => {
                    props.concurrency = Some(col.name.clone());
                    into.push(self.dialect.column(&col.name));
                    values.push("1".to_string());
                    cmd.add_parameter(types.clone_parameter(&col.name)?.with_value(1));
                }
                ColumnRole::Defaulted => props.defaults.push(col.name.clone()),
                ColumnRole::Computed | ColumnRole::Special | ColumnRole::Skip => {}
            }

            if col.is_in_primary_key {
                where_columns.push(col.name.clone());
            }
        }

        for (kind, special) in cols.server_side_specials() {
            into.push(self.dialect.column(&special.column_name));
            values.push(meta.server_side_text(kind)?.to_string());
            props.defaults.push(special.column_name.clone());
        }

        if props.needs_reselect() {
            props.where_columns = where_columns;
        }

        let name = full_table_name(request, &self.dialect);
        cmd.text = if into.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", name)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                name,
                into.join(", "),
                values.join(", ")
            )
        };

        debug!("insert command: {} ({} parameters)", cmd.text, cmd.parameters.len());

        request.properties = props;
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DbError, ProviderType, Value};
    use crate::metadata::{
        ColumnMetadata, ColumnMetadataCollection, ProviderMetadata, SpecialColumn, SpecialKind,
    };

    fn orders() -> DataRequest {
        DataRequest::new(
            ProviderMetadata::new("Orders"),
            ColumnMetadataCollection::new(vec![
                ColumnMetadata::new("OrderID", ProviderType::Integer)
                    .primary_key()
                    .auto_increment(),
                ColumnMetadata::new("CustomerID", ProviderType::Integer),
                ColumnMetadata::new("RowVersion", ProviderType::TimeStamp).concurrency(),
                ColumnMetadata::new("Total", ProviderType::Money),
            ]),
        )
    }

    #[test]
    fn test_insert_skips_identity_and_timestamp() {
        let builder = CommandBuilder::default();
        let mut req = orders();

        let cmd = builder.build_insert(&mut req, &["CustomerID", "Total"]).unwrap();

        assert_eq!(
            cmd.text,
            "INSERT INTO [Orders] ([CustomerID], [Total]) VALUES (@CustomerID, @Total)"
        );
        let names: Vec<_> = cmd.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["@CustomerID", "@Total"]);
        assert_eq!(cmd.kind, CommandKind::Text);
        assert_eq!(req.properties.auto_increment.as_deref(), Some("OrderID"));
        assert_eq!(req.properties.timestamp.as_deref(), Some("RowVersion"));
        assert_eq!(req.properties.source.as_deref(), Some("Orders"));
        assert!(req.properties.defaults.is_empty());
        assert!(req.properties.where_columns.is_empty());
    }

    #[test]
    fn test_insert_nothing_modified_uses_default_values() {
        let builder = CommandBuilder::default();
        let mut req = orders();

        let cmd = builder.build_insert(&mut req, &[]).unwrap();

        assert_eq!(cmd.text, "INSERT INTO [Orders] DEFAULT VALUES");
        assert!(cmd.parameters.is_empty());
        assert!(!cmd.text.ends_with(';'));
    }

    #[test]
    fn test_insert_application_concurrency_starts_at_one() {
        let builder = CommandBuilder::default();
        let mut req = DataRequest::new(
            ProviderMetadata::new("Items"),
            ColumnMetadataCollection::new(vec![
                ColumnMetadata::new("ItemID", ProviderType::Integer).primary_key(),
                ColumnMetadata::new("Version", ProviderType::Integer).entity_spaces_concurrency(),
            ]),
        );

        let cmd = builder.build_insert(&mut req, &["ItemID", "Version"]).unwrap();

        assert_eq!(
            cmd.text,
            "INSERT INTO [Items] ([ItemID], [Version]) VALUES (@ItemID, 1)"
        );
        let version = cmd.parameter("@Version").unwrap();
        assert_eq!(version.value, Value::Integer(1));
        assert!(version.source_column.is_none());
        assert_eq!(req.properties.concurrency.as_deref(), Some("Version"));
    }

    #[test]
    fn test_insert_defaults_and_server_side_audit() {
        let builder = CommandBuilder::default();
        let mut req = DataRequest::new(
            ProviderMetadata::new("Orders")
                .property("DateAdded.ServerSideText", "CURRENT TIMESTAMP")
                .property("AddedBy.ServerSideText", "CURRENT USER"),
            ColumnMetadataCollection::new(vec![
                ColumnMetadata::new("OrderID", ProviderType::UniqueIdentifier)
                    .primary_key()
                    .with_default("newid()"),
                ColumnMetadata::new("Status", ProviderType::VarChar).with_default("'open'"),
                ColumnMetadata::new("Created", ProviderType::DateTime),
                ColumnMetadata::new("CreatedBy", ProviderType::VarChar),
            ])
            .with_special(SpecialKind::DateAdded, SpecialColumn::server_side("Created"))
            .with_special(SpecialKind::AddedBy, SpecialColumn::server_side("CreatedBy")),
        );

        let cmd = builder.build_insert(&mut req, &["Created"]).unwrap();

        assert_eq!(
            cmd.text,
            "INSERT INTO [Orders] ([Created], [CreatedBy]) VALUES (CURRENT TIMESTAMP, CURRENT USER)"
        );
        assert!(cmd.parameters.is_empty());
        assert_eq!(
            req.properties.defaults,
            vec!["OrderID", "Status", "Created", "CreatedBy"]
        );
        assert_eq!(req.properties.where_columns, vec!["OrderID"]);
    }

    #[test]
    fn test_insert_missing_server_side_text() {
        let builder = CommandBuilder::default();
        let mut req = orders();
        req.columns = req
            .columns
            .clone()
            .with_special(SpecialKind::DateModified, SpecialColumn::server_side("Changed"));

        let err = builder.build_insert(&mut req, &["Total"]).unwrap_err();
        assert!(matches!(err, DbError::MissingServerSideText(key) if key == "DateModified.ServerSideText"));
        assert!(req.properties.is_empty());
    }

    #[test]
    fn test_insert_replaces_stale_property_bag() {
        let builder = CommandBuilder::default();
        let mut req = DataRequest::new(
            ProviderMetadata::new("Notes"),
            ColumnMetadataCollection::new(vec![ColumnMetadata::new("Body", ProviderType::VarChar)]),
        );
        req.properties.auto_increment = Some("Stale".into());

        builder.build_insert(&mut req, &["Body"]).unwrap();
        assert!(req.properties.is_empty());
    }

    #[test]
    fn test_insert_carries_timeout() {
        let builder = CommandBuilder::default();
        let mut req = orders().command_timeout(std::time::Duration::from_secs(45));

        let cmd = builder.build_insert(&mut req, &["Total"]).unwrap();
        assert_eq!(cmd.timeout, Some(std::time::Duration::from_secs(45)));
    }
}
