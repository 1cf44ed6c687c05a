//! Domain models and types for Portico.

pub mod errors;
pub mod result;
pub mod row;
pub mod value;

pub use errors::PorticoError;
pub use result::Result;
pub use row::Row;
pub use value::Value;
