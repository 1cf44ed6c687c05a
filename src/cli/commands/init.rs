//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "portico.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Portico configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your source layout", self.output);
                println!("  2. Run 'portico tables' to see the canonical columns");
                println!("  3. Run 'portico verify' to check the source");
                println!("  4. Run 'portico export'");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# Portico configuration

[application]
# trace, debug, info, warn, error
log_level = "info"

[export]
# Export file path; remove to derive a timestamped filename.
path = "forum-export.txt.gz"
# Source product tag recorded in the document header.
source_label = "Example Forum 1.0"
# Gzip the output file.
compress = true
# Stream to stdout with attachment framing instead of writing a file.
streaming = false

[source]
# Directory with one .jsonl file per source table.
root = "./dump"
# Shared filename prefix, the analog of a database table prefix.
prefix = ""

# Tables/columns that must exist for 'portico verify' to pass.
[[source.required_tables]]
name = "users"
columns = ["userID", "username", "email"]

# One [[tables]] block per canonical table, in output order.
[[tables]]
name = "User"
file = "users.jsonl"

[tables.mapping]
userID = "UserID"
username = "Name"
email = "Email"
# Declare a non-canonical column by type label:
# lastIp = "varchar(40)"
# ...or rename and type it explicitly:
# lastIp = { column = "LastIPAddress", type = "varchar(40)" }

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config: crate::config::PorticoConfig =
            toml::from_str(InitArgs::sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.tables.len(), 1);
        assert_eq!(config.tables[0].name, "User");
    }
}
