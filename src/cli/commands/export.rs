//! Export command implementation
//!
//! Thin consumer of the export engine: loads the configuration, opens a
//! row source per configured table, and drives the session lifecycle.

use crate::adapters::source::JsonlSource;
use crate::config::load_config;
use crate::core::serialize::format_elapsed;
use crate::core::session::{default_filename, ExportOptions, ExportSession};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override the export file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Stream the document to stdout instead of writing a file
    #[arg(long)]
    pub stream: bool,

    /// Override the source-tool tag recorded in the header
    #[arg(long)]
    pub source_label: Option<String>,

    /// Disable gzip compression of the output file
    #[arg(long)]
    pub no_compress: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding export path from CLI");
            config.export.path = Some(output.clone());
        }
        if let Some(label) = &self.source_label {
            config.export.source_label = Some(label.clone());
        }
        if self.no_compress {
            config.export.compress = false;
        }
        if self.stream {
            config.export.streaming = true;
        }

        if config.tables.is_empty() {
            tracing::warn!("No tables configured; the export will contain no table blocks");
        }

        let root = PathBuf::from(&config.source.root);

        let mut session = if config.export.streaming {
            let filename = config
                .export
                .path
                .clone()
                .unwrap_or_else(|| default_filename(false));
            ExportSession::begin_streaming(
                Box::new(std::io::stdout()),
                &filename,
                config.export.source_label.as_deref(),
            )?
        } else {
            ExportSession::begin(ExportOptions {
                path: config.export.path.clone().map(PathBuf::from),
                source_label: config.export.source_label.clone(),
                compress: config.export.compress,
            })?
        };

        for table in &config.tables {
            let file = source_file(&root, &config.source.prefix, table);

            // A missing source file is a per-table condition, not a
            // session-fatal one: record it in the artifact and move on.
            let mut source = match JsonlSource::open(&file) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(table = %table.name, file = %file.display(), error = %e, "Skipping table");
                    session.comment(&format!("Error: skipping {}: {e}", table.name))?;
                    continue;
                }
            };

            session.export_table(&table.name, &mut source, &table.mapping)?;
        }

        let summary = session.end()?;

        println!("✅ Export complete");
        for table in &summary.tables {
            if table.skipped {
                println!("  {} skipped (not a canonical table)", table.table);
            } else {
                println!(
                    "  {} ({} rows, {})",
                    table.table,
                    table.rows,
                    format_elapsed(table.elapsed)
                );
            }
        }
        if let Some(path) = &summary.path {
            println!("  Output: {}", path.display());
        }
        println!("  Elapsed: {}", format_elapsed(summary.elapsed));

        Ok(0)
    }
}

fn source_file(root: &Path, prefix: &str, table: &crate::config::TableConfig) -> PathBuf {
    match &table.file {
        Some(file) => root.join(file),
        None => root.join(format!("{prefix}{}.jsonl", table.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;

    #[test]
    fn test_source_file_explicit_and_derived() {
        let explicit = TableConfig {
            name: "User".to_string(),
            file: Some("wcf1_user.jsonl".to_string()),
            mapping: Default::default(),
        };
        let derived = TableConfig {
            name: "Role".to_string(),
            file: None,
            mapping: Default::default(),
        };

        let root = Path::new("/dump");
        assert_eq!(
            source_file(root, "wbb_", &explicit),
            Path::new("/dump/wcf1_user.jsonl")
        );
        assert_eq!(
            source_file(root, "wbb_", &derived),
            Path::new("/dump/wbb_Role.jsonl")
        );
    }
}
