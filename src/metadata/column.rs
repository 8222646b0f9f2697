use serde::{Deserialize, Serialize};

use crate::core::ProviderType;

/// Schema description of one column.
///
/// Read-only to the command builders; owned by whatever catalog source
/// produced the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMetadata {
    pub name: String,
    pub provider_type: ProviderType,
    pub is_auto_increment: bool,
    /// Server-maintained timestamp/rowversion token
    pub is_concurrency: bool,
    /// Application-maintained integer token, starts at 1 and increments per update
    pub is_entity_spaces_concurrency: bool,
    pub is_computed: bool,
    pub has_default: bool,
    pub is_in_primary_key: bool,
    /// Server-side default expression text
    pub default: String,
    pub character_max_length: i64,
    pub numeric_precision: u8,
    pub numeric_scale: u8,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            name: name.into(),
            provider_type,
            ..Self::default()
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_in_primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn concurrency(mut self) -> Self {
        self.is_concurrency = true;
        self
    }

    pub fn entity_spaces_concurrency(mut self) -> Self {
        self.is_entity_spaces_concurrency = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.is_computed = true;
        self
    }

    pub fn with_default(mut self, expression: impl Into<String>) -> Self {
        self.has_default = true;
        self.default = expression.into();
        self
    }

    pub fn max_length(mut self, length: i64) -> Self {
        self.character_max_length = length;
        self
    }

    pub fn precision(mut self, precision: u8, scale: u8) -> Self {
        self.numeric_precision = precision;
        self.numeric_scale = scale;
        self
    }

    /// True when the default expression generates a unique identifier on the server
    pub fn has_identifier_default(&self) -> bool {
        if !self.has_default {
            return false;
        }
        let default = self.default.to_lowercase();
        default.contains("newid") || default.contains("newsequentialid")
    }
}

/// One of the four audit slots (added/modified date and user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialColumn {
    pub column_name: String,
    /// Value is produced by a dialect expression instead of a bound parameter
    #[serde(default)]
    pub is_server_side: bool,
}

impl SpecialColumn {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            is_server_side: false,
        }
    }

    pub fn server_side(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            is_server_side: true,
        }
    }
}

/// The audit slot kinds, each keyed in provider metadata as `"<Name>.ServerSideText"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    DateAdded,
    DateModified,
    AddedBy,
    ModifiedBy,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 4] = [
        SpecialKind::DateAdded,
        SpecialKind::DateModified,
        SpecialKind::AddedBy,
        SpecialKind::ModifiedBy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DateAdded => "DateAdded",
            Self::DateModified => "DateModified",
            Self::AddedBy => "AddedBy",
            Self::ModifiedBy => "ModifiedBy",
        }
    }

    pub fn server_side_key(&self) -> String {
        format!("{}.ServerSideText", self.name())
    }

    /// Slots that an UPDATE refreshes
    pub fn touched_on_update(&self) -> bool {
        matches!(self, Self::DateModified | Self::ModifiedBy)
    }
}

/// Ordered column list plus the audit slots.
///
/// Iteration order is schema order and drives clause order in every
/// generated statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMetadataCollection {
    columns: Vec<ColumnMetadata>,
    pub date_added: Option<SpecialColumn>,
    pub date_modified: Option<SpecialColumn>,
    pub added_by: Option<SpecialColumn>,
    pub modified_by: Option<SpecialColumn>,
}

impl ColumnMetadataCollection {
    pub fn new(columns: Vec<ColumnMetadata>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_special(mut self, kind: SpecialKind, column: SpecialColumn) -> Self {
        *self.slot_mut(kind) = Some(column);
        self
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnMetadata> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn special(&self, kind: SpecialKind) -> Option<&SpecialColumn> {
        match kind {
            SpecialKind::DateAdded => self.date_added.as_ref(),
            SpecialKind::DateModified => self.date_modified.as_ref(),
            SpecialKind::AddedBy => self.added_by.as_ref(),
            SpecialKind::ModifiedBy => self.modified_by.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: SpecialKind) -> &mut Option<SpecialColumn> {
        match kind {
            SpecialKind::DateAdded => &mut self.date_added,
            SpecialKind::DateModified => &mut self.date_modified,
            SpecialKind::AddedBy => &mut self.added_by,
            SpecialKind::ModifiedBy => &mut self.modified_by,
        }
    }

    /// Server-side audit slots in their fixed emission order
    pub fn server_side_specials(&self) -> impl Iterator<Item = (SpecialKind, &SpecialColumn)> {
        SpecialKind::ALL.into_iter().filter_map(move |kind| {
            self.special(kind)
                .filter(|special| special.is_server_side)
                .map(|special| (kind, special))
        })
    }

    /// True when the column occupies one of the audit slots
    pub fn is_special_column(&self, col: &ColumnMetadata) -> bool {
        SpecialKind::ALL.into_iter().any(|kind| {
            self.special(kind)
                .is_some_and(|special| special.column_name == col.name)
        })
    }
}

impl<'a> IntoIterator for &'a ColumnMetadataCollection {
    type Item = &'a ColumnMetadata;
    type IntoIter = std::slice::Iter<'a, ColumnMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_default_detection() {
        let guid = ColumnMetadata::new("Id", ProviderType::UniqueIdentifier).with_default("NEWID()");
        assert!(guid.has_identifier_default());

        let seq = ColumnMetadata::new("Id", ProviderType::UniqueIdentifier)
            .with_default("(newsequentialid())");
        assert!(seq.has_identifier_default());

        let other = ColumnMetadata::new("Created", ProviderType::DateTime).with_default("getdate()");
        assert!(!other.has_identifier_default());
    }

    #[test]
    fn test_special_column_lookup() {
        let cols = ColumnMetadataCollection::new(vec![
            ColumnMetadata::new("Id", ProviderType::Integer),
            ColumnMetadata::new("Created", ProviderType::DateTime),
        ])
        .with_special(SpecialKind::DateAdded, SpecialColumn::server_side("Created"))
        .with_special(SpecialKind::AddedBy, SpecialColumn::new("CreatedBy"));

        assert!(cols.is_special_column(&cols.columns()[1]));
        assert!(!cols.is_special_column(&cols.columns()[0]));

        let server_side: Vec<_> = cols.server_side_specials().map(|(kind, _)| kind).collect();
        assert_eq!(server_side, vec![SpecialKind::DateAdded]);
    }

    #[test]
    fn test_server_side_key() {
        assert_eq!(SpecialKind::ModifiedBy.server_side_key(), "ModifiedBy.ServerSideText");
        assert!(SpecialKind::DateModified.touched_on_update());
        assert!(!SpecialKind::AddedBy.touched_on_update());
    }
}
