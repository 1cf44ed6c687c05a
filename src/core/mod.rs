//! Core export engine: catalog, reconciliation, serialization, writing,
//! session lifecycle, and source verification.

pub mod mapping;
pub mod schema;
pub mod serialize;
pub mod session;
pub mod verify;
pub mod writer;
