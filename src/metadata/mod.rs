pub mod column;
pub mod provider;
pub mod request;

pub use column::{ColumnMetadata, ColumnMetadataCollection, SpecialColumn, SpecialKind};
pub use provider::ProviderMetadata;
pub use request::{DataRequest, DynamicQuery, QueryParameter, QueryType};
