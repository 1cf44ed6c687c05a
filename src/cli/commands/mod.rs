//! CLI command implementations.

pub mod export;
pub mod init;
pub mod tables;
pub mod validate;
pub mod verify;
