//! Verify command implementation
//!
//! Runs the read-only source precondition check before anyone commits to
//! a full export run.

use crate::adapters::source::JsonlCatalog;
use crate::config::load_config;
use crate::core::verify::verify_source;
use clap::Args;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Verifying source");

        let config = load_config(config_path)?;

        if config.source.required_tables.is_empty() {
            println!("⚠️  No required tables configured under [source]; nothing to verify");
            return Ok(0);
        }

        let catalog = JsonlCatalog::new(&config.source.root, &config.source.prefix);
        let report = verify_source(&catalog, &config.source.required_tables)?;

        if report.is_ok() {
            println!("✅ {report}");
            Ok(0)
        } else {
            println!("❌ {report}");
            Ok(1) // Precondition failure exit code
        }
    }
}
