//! Tables command implementation
//!
//! Prints the canonical table catalog so mapping authors can see the
//! exact column names and types an export must target.

use crate::core::schema::CanonicalSchema;
use clap::Args;

/// Arguments for the tables command
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Show only the table names
    #[arg(long)]
    pub names_only: bool,
}

impl TablesArgs {
    /// Execute the tables command
    pub fn execute(&self) -> anyhow::Result<i32> {
        for table in CanonicalSchema::tables() {
            println!("{}", table.name());
            if self.names_only {
                continue;
            }
            for (column, type_label) in table.columns() {
                println!("  {column}: {type_label}");
            }
            println!();
        }
        Ok(0)
    }
}
