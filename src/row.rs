// ============================================================================
// Row State Tracking
// ============================================================================
//
// A changed row carries its state plus two images: the values as last read
// (original) and the values as they are now (current). Commands bind
// key and concurrency predicates to the original image and new values to
// the current one.
//
// ============================================================================

use std::collections::HashMap;

use crate::command::SourceVersion;
use crate::core::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowState {
    Added,
    Modified,
    Deleted,
    Unchanged,
}

/// Anything that can report a pending row state.
pub trait RowStateSource {
    fn row_state(&self) -> RowState;
}

impl RowStateSource for RowState {
    fn row_state(&self) -> RowState {
        *self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    state: RowState,
    current: HashMap<String, Value>,
    original: HashMap<String, Value>,
}

impl DataRow {
    /// A freshly created row; it has no original image
    pub fn added<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            state: RowState::Added,
            current: collect_image(values),
            original: HashMap::new(),
        }
    }

    /// A row as read from the database
    pub fn unchanged<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let image = collect_image(values);
        Self {
            state: RowState::Unchanged,
            current: image.clone(),
            original: image,
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// Change a current value; an unchanged row becomes modified
    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.current.insert(column.to_string(), value.into());
        if self.state == RowState::Unchanged {
            self.state = RowState::Modified;
        }
    }

    pub fn delete(&mut self) {
        self.state = RowState::Deleted;
    }

    /// Mark current values as persisted
    pub fn accept_changes(&mut self) {
        self.original = self.current.clone();
        self.state = RowState::Unchanged;
    }

    /// Read a column from the requested image
    ///
    /// A deleted row no longer has a current image and answers from the
    /// original; an added row has no original and answers from the current.
    pub fn value(&self, column: &str, version: SourceVersion) -> Option<&Value> {
        let image = match (version, self.state) {
            (SourceVersion::Current, RowState::Deleted) => &self.original,
            (SourceVersion::Original, RowState::Added) => &self.current,
            (SourceVersion::Current, _) => &self.current,
            (SourceVersion::Original, _) => &self.original,
        };
        image.get(column)
    }

    /// Names of columns whose current value differs from the original
    pub fn modified_columns(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .current
            .iter()
            .filter(|(name, value)| self.original.get(*name) != Some(*value))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl RowStateSource for DataRow {
    fn row_state(&self) -> RowState {
        self.state
    }
}

fn collect_image<K, V>(values: impl IntoIterator<Item = (K, V)>) -> HashMap<String, Value>
where
    K: Into<String>,
    V: Into<Value>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Which assemblers a batch of rows needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
}

impl PendingChanges {
    pub fn of_row<R: RowStateSource + ?Sized>(row: &R) -> Self {
        let mut pending = Self::default();
        pending.record(row.row_state());
        pending
    }

    pub fn of_rows<'a, R, I>(rows: I) -> Self
    where
        R: RowStateSource + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut pending = Self::default();
        for row in rows {
            pending.record(row.row_state());
        }
        pending
    }

    fn record(&mut self, state: RowState) {
        match state {
            RowState::Added => self.insert = true,
            RowState::Modified => self.update = true,
            RowState::Deleted => self.delete = true,
            RowState::Unchanged => {}
        }
    }

    pub fn any(&self) -> bool {
        self.insert || self.update || self.delete
    }
}
