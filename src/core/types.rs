use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;

/// Driver-level parameter type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProviderType {
    Bit,
    TinyInt,
    SmallInt,
    #[default]
    Integer,
    BigInt,
    Decimal,
    Numeric,
    Money,
    Real,
    Double,
    Char,
    VarChar,
    NChar,
    NVarChar,
    LongVarChar,
    Date,
    Time,
    DateTime,
    /// Server-maintained row version. Parameters of this type are always input/output.
    TimeStamp,
    UniqueIdentifier,
    Binary,
    VarBinary,
    LongBinary,
    Xml,
}

impl ProviderType {
    pub fn is_row_version(&self) -> bool {
        matches!(self, Self::TimeStamp)
    }

    /// Type a driver would infer for a value bound without metadata
    pub fn for_value(value: &Value) -> Self {
        match value {
            Value::Null | Value::Text(_) => Self::VarChar,
            Value::Boolean(_) => Self::Bit,
            Value::Integer(_) => Self::BigInt,
            Value::Float(_) => Self::Double,
            Value::Uuid(_) => Self::UniqueIdentifier,
            Value::Timestamp(_) => Self::DateTime,
            Value::Bytes(_) => Self::VarBinary,
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Money => "MONEY",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::NChar => "NCHAR",
            Self::NVarChar => "NVARCHAR",
            Self::LongVarChar => "LONG VARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::TimeStamp => "TIMESTAMP",
            Self::UniqueIdentifier => "UNIQUEIDENTIFIER",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::LongBinary => "LONG BINARY",
            Self::Xml => "XML",
        };
        write!(f, "{}", name)
    }
}
