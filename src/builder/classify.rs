use crate::metadata::{ColumnMetadata, ColumnMetadataCollection, SpecialKind};

/// What a column contributes to a generated INSERT or UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Modified ordinary column: written through a bound parameter
    Bound,
    AutoIncrement,
    /// Server timestamp/rowversion token
    ServerConcurrency,
    /// Application integer token
    AppConcurrency,
    Computed,
    /// Occupies an audit slot; written by the slot handling, if at all
    Special,
    /// Unmodified column with a server default, re-read after insert
    Defaulted,
    Skip,
}

/// The statement a column is being classified for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Insert,
    Update,
}

impl Statement {
    /// True when this statement writes the audit slot from its server expression
    pub fn writes_server_side(&self, kind: SpecialKind) -> bool {
        match self {
            Self::Insert => true,
            Self::Update => kind.touched_on_update(),
        }
    }
}

/// Place a column in exactly one role
///
/// Roles are tested in priority order. A server-side audit column that the
/// statement writes from its server expression is always `Special`, even
/// when modified; any other audit column follows the ordinary order.
pub fn classify(
    col: &ColumnMetadata,
    columns: &ColumnMetadataCollection,
    statement: Statement,
    modified: bool,
) -> ColumnRole {
    let ordinary = !col.is_auto_increment && !col.is_concurrency && !col.is_entity_spaces_concurrency;

    if is_server_written(col, columns, statement) {
        ColumnRole::Special
    } else if modified && ordinary {
        ColumnRole::Bound
    } else if col.is_auto_increment {
        ColumnRole::AutoIncrement
    } else if col.is_concurrency {
        ColumnRole::ServerConcurrency
    } else if col.is_entity_spaces_concurrency {
        ColumnRole::AppConcurrency
    } else if col.is_computed {
        ColumnRole::Computed
    } else if columns.is_special_column(col) {
        ColumnRole::Special
    } else if col.has_default {
        ColumnRole::Defaulted
    } else {
        ColumnRole::Skip
    }
}

fn is_server_written(col: &ColumnMetadata, columns: &ColumnMetadataCollection, statement: Statement) -> bool {
    columns
        .server_side_specials()
        .any(|(kind, special)| special.column_name == col.name && statement.writes_server_side(kind))
}

/// Membership test over the caller's modified-column names
pub(crate) fn is_modified(modified: &[&str], col: &ColumnMetadata) -> bool {
    modified.iter().any(|name| *name == col.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProviderType;
    use crate::metadata::{SpecialColumn, SpecialKind};

    fn cols() -> ColumnMetadataCollection {
        ColumnMetadataCollection::new(vec![]).with_special(
            SpecialKind::DateAdded,
            SpecialColumn::server_side("Created"),
        )
    }

    #[test]
    fn test_modified_ordinary_is_bound() {
        let col = ColumnMetadata::new("Total", ProviderType::Money);
        assert_eq!(classify(&col, &cols(), Statement::Insert, true), ColumnRole::Bound);
        assert_eq!(classify(&col, &cols(), Statement::Insert, false), ColumnRole::Skip);
    }

    #[test]
    fn test_tokens_are_never_bound() {
        let identity = ColumnMetadata::new("Id", ProviderType::Integer).auto_increment();
        let stamp = ColumnMetadata::new("Stamp", ProviderType::TimeStamp).concurrency();
        let version = ColumnMetadata::new("Version", ProviderType::Integer).entity_spaces_concurrency();

        assert_eq!(classify(&identity, &cols(), Statement::Insert, true), ColumnRole::AutoIncrement);
        assert_eq!(classify(&stamp, &cols(), Statement::Insert, true), ColumnRole::ServerConcurrency);
        assert_eq!(classify(&version, &cols(), Statement::Insert, true), ColumnRole::AppConcurrency);
    }

    #[test]
    fn test_computed_beats_default() {
        let col = ColumnMetadata::new("FullName", ProviderType::VarChar)
            .computed()
            .with_default("''");
        assert_eq!(classify(&col, &cols(), Statement::Insert, false), ColumnRole::Computed);
    }

    #[test]
    fn test_insert_keeps_server_side_special_when_modified() {
        let col = ColumnMetadata::new("Created", ProviderType::DateTime).with_default("now()");
        assert_eq!(classify(&col, &cols(), Statement::Insert, true), ColumnRole::Special);
    }

    #[test]
    fn test_update_binds_server_side_slot_it_does_not_refresh() {
        let cols = cols().with_special(SpecialKind::DateModified, SpecialColumn::server_side("Changed"));
        let created = ColumnMetadata::new("Created", ProviderType::DateTime);
        let changed = ColumnMetadata::new("Changed", ProviderType::DateTime);

        assert_eq!(classify(&created, &cols, Statement::Update, true), ColumnRole::Bound);
        assert_eq!(classify(&created, &cols, Statement::Update, false), ColumnRole::Special);
        assert_eq!(classify(&changed, &cols, Statement::Update, true), ColumnRole::Special);
    }

    #[test]
    fn test_client_side_special_can_be_bound() {
        let cols = cols().with_special(SpecialKind::AddedBy, SpecialColumn::new("CreatedBy"));
        let col = ColumnMetadata::new("CreatedBy", ProviderType::VarChar).with_default("user");

        assert_eq!(classify(&col, &cols, Statement::Insert, true), ColumnRole::Bound);
        assert_eq!(classify(&col, &cols, Statement::Insert, false), ColumnRole::Special);
    }

    #[test]
    fn test_unmodified_default() {
        let col = ColumnMetadata::new("Status", ProviderType::VarChar).with_default("'new'");
        assert_eq!(classify(&col, &cols(), Statement::Insert, false), ColumnRole::Defaulted);
    }
}
