use serde::Serialize;

use crate::config::Dialect;

/// Columns the caller must re-read after executing a generated command.
///
/// Created empty by every build call, so a caller never sees a bag left
/// over from an earlier build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyBag {
    /// Identity column whose generated value must be fetched
    pub auto_increment: Option<String>,
    /// Table or view to re-read generated values from
    pub source: Option<String>,
    /// Server timestamp/rowversion column
    pub timestamp: Option<String>,
    /// Application concurrency column
    pub concurrency: Option<String>,
    /// Columns filled by server defaults or server-side audit text
    pub defaults: Vec<String>,
    /// Primary key columns that locate the row for the re-select
    pub where_columns: Vec<String>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the row must be re-selected to pick up server defaults
    pub fn needs_reselect(&self) -> bool {
        !self.defaults.is_empty()
    }

    /// Keyed view as consumed by re-select steps that predate the typed bag
    ///
    /// `Defaults` lists delimited column names, `Where` the bare names.
    pub fn entries(&self, dialect: &Dialect) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();

        if let Some(col) = &self.auto_increment {
            entries.push(("AutoInc", col.clone()));
        }
        if let Some(col) = &self.timestamp {
            entries.push(("Timestamp", col.clone()));
        }
        if let Some(source) = &self.source {
            entries.push(("Source", source.clone()));
        }
        if let Some(col) = &self.concurrency {
            entries.push(("EntitySpacesConcurrency", col.clone()));
        }
        if self.needs_reselect() {
            let defaults: Vec<String> = self.defaults.iter().map(|c| dialect.column(c)).collect();
            entries.push(("Defaults", defaults.join(",")));
            entries.push(("Where", self.where_columns.join(",")));
        }

        entries
    }

    pub fn get(&self, key: &str, dialect: &Dialect) -> Option<String> {
        self.entries(dialect)
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}
