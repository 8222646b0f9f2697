use serde::{Deserialize, Serialize};

use crate::core::{DbError, Result};

/// Native error code the SQL Anywhere driver raises when an UPDATE or DELETE
/// matched no row.
pub const SQL_ANYWHERE_ROW_NOT_FOUND: i32 = 532;

/// Per-database constants used while composing command text
///
/// Fixed for one target database and supplied as configuration, never
/// chosen per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Opening delimiter for catalog, schema and table names
    pub table_open: String,

    /// Closing delimiter for catalog, schema and table names
    pub table_close: String,

    /// Opening delimiter for column names
    pub column_open: String,

    /// Closing delimiter for column names
    pub column_close: String,

    /// Opening delimiter for stored procedure names
    pub procedure_open: String,

    /// Closing delimiter for stored procedure names
    pub procedure_close: String,

    /// Prefix of named parameters
    pub param_prefix: String,

    /// Anonymous placeholder substituted for positional `{n}` tokens
    pub positional_placeholder: String,

    /// Native driver error code meaning "row not found / conflicting update"
    pub concurrency_error_code: i32,
}

impl Dialect {
    /// Create the SQL Anywhere dialect
    pub fn new() -> Self {
        Self {
            table_open: "[".to_string(),
            table_close: "]".to_string(),
            column_open: "[".to_string(),
            column_close: "]".to_string(),
            procedure_open: "[".to_string(),
            procedure_close: "]".to_string(),
            param_prefix: "@".to_string(),
            positional_placeholder: "?".to_string(),
            concurrency_error_code: SQL_ANYWHERE_ROW_NOT_FOUND,
        }
    }

    /// Set table delimiters
    pub fn table_delimiters(mut self, open: &str, close: &str) -> Self {
        self.table_open = open.to_string();
        self.table_close = close.to_string();
        self
    }

    /// Set column delimiters
    pub fn column_delimiters(mut self, open: &str, close: &str) -> Self {
        self.column_open = open.to_string();
        self.column_close = close.to_string();
        self
    }

    /// Set stored procedure name delimiters
    pub fn procedure_delimiters(mut self, open: &str, close: &str) -> Self {
        self.procedure_open = open.to_string();
        self.procedure_close = close.to_string();
        self
    }

    /// Set the named parameter prefix
    pub fn param_prefix(mut self, prefix: &str) -> Self {
        self.param_prefix = prefix.to_string();
        self
    }

    /// Set the positional placeholder
    pub fn positional_placeholder(mut self, placeholder: &str) -> Self {
        self.positional_placeholder = placeholder.to_string();
        self
    }

    /// Set the concurrency conflict error code
    pub fn concurrency_error_code(mut self, code: i32) -> Self {
        self.concurrency_error_code = code;
        self
    }

    /// Parse from a JSON document; missing keys keep their SQL Anywhere defaults
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmlforge::Dialect;
    /// let dialect = Dialect::from_json(r#"{ "param_prefix": ":" }"#).unwrap();
    /// assert_eq!(dialect.param_prefix, ":");
    /// assert_eq!(dialect.table_open, "[");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let dialect: Self = serde_json::from_str(json)?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Wrap a column name in column delimiters
    pub fn column(&self, name: &str) -> String {
        format!("{}{}{}", self.column_open, name, self.column_close)
    }

    /// Wrap a catalog, schema or table name in table delimiters
    pub fn table(&self, name: &str) -> String {
        format!("{}{}{}", self.table_open, name, self.table_close)
    }

    /// Wrap a stored procedure name in procedure delimiters
    pub fn procedure(&self, name: &str) -> String {
        format!("{}{}{}", self.procedure_open, name, self.procedure_close)
    }

    /// Prefix a logical parameter name
    pub fn parameter(&self, name: &str) -> String {
        format!("{}{}", self.param_prefix, name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.param_prefix.is_empty() {
            return Err(DbError::Config("param_prefix cannot be empty".to_string()));
        }

        if self.positional_placeholder.is_empty() {
            return Err(DbError::Config(
                "positional_placeholder cannot be empty".to_string(),
            ));
        }

        // Delimiters come in pairs: both empty (undelimited) or both set
        let pairs = [
            ("table", &self.table_open, &self.table_close),
            ("column", &self.column_open, &self.column_close),
            ("procedure", &self.procedure_open, &self.procedure_close),
        ];
        for (kind, open, close) in pairs {
            if open.is_empty() != close.is_empty() {
                return Err(DbError::Config(format!(
                    "{} delimiters must both be set or both be empty",
                    kind
                )));
            }
        }

        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new()
    }
}
