//! Configuration management for Portico.
//!
//! TOML-based configuration loading, parsing, and validation with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Environment overrides via the `PORTICO_*` prefix
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! source_label = "WBB 3.x"
//! compress = true
//!
//! [source]
//! root = "./dump"
//! prefix = "wbb_"
//!
//! [[tables]]
//! name = "User"
//! file = "wcf1_user.jsonl"
//!
//! [tables.mapping]
//! userID = "UserID"
//! username = "Name"
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportSettings, LoggingConfig, PorticoConfig, SourceConfig, TableConfig,
};
