pub mod error;
pub mod types;
pub mod value;

pub use error::{DbError, Result};
pub use types::ProviderType;
pub use value::Value;
