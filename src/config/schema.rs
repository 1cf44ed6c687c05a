//! Configuration schema types
//!
//! This module defines the configuration structure for Portico. It maps
//! one-to-one onto the `portico.toml` file.

use crate::core::mapping::MappingSet;
use crate::core::verify::RequiredTable;
use serde::{Deserialize, Serialize};

/// Main Portico configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PorticoConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export output settings
    #[serde(default)]
    pub export: ExportSettings,

    /// Source data settings
    pub source: SourceConfig,

    /// Tables to export, in order
    #[serde(default, rename = "tables")]
    pub tables: Vec<TableConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PorticoConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.source.validate()?;
        for table in &self.tables {
            table.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Export file path; a timestamped filename is derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Source-tool tag recorded in the document header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,

    /// Gzip the output file (file sink only)
    #[serde(default = "default_true")]
    pub compress: bool,

    /// Stream the document to stdout with attachment framing instead of
    /// writing a file
    #[serde(default)]
    pub streaming: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            path: None,
            source_label: None,
            compress: default_true(),
            streaming: false,
        }
    }
}

impl ExportSettings {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err("export.path must not be blank when set".to_string());
            }
        }
        Ok(())
    }
}

/// Source data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the source `.jsonl` table files
    pub root: String,

    /// Filename prefix shared by the source table files, the analog of
    /// a database table prefix
    #[serde(default)]
    pub prefix: String,

    /// Tables and columns that must exist in the source before an
    /// export is worth starting (`portico verify`)
    #[serde(default)]
    pub required_tables: Vec<RequiredTable>,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("source.root is required".to_string());
        }
        Ok(())
    }
}

/// One table export: canonical table name, source file, and the column
/// mapping applied to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Canonical table name (e.g. "User", "Discussion")
    pub name: String,

    /// Source file relative to source.root; defaults to
    /// `<prefix><name>.jsonl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source-column to canonical-column mapping directives
    #[serde(default)]
    pub mapping: MappingSet,
}

impl TableConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("tables[].name must not be blank".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation: "daily" or "hourly"
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid = ["daily", "hourly"];
        if !valid.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}
