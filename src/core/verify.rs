//! Source precondition verification
//!
//! A read-only check run before an export begins: every required source
//! table must exist and carry every required column. The report keeps
//! whole-table absence separate from present-tables-missing-columns so
//! the operator can tell a wrong database/prefix apart from a version
//! mismatch.

use crate::adapters::source::SchemaProbe;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One required source table and the columns the export needs from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl RequiredTable {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Aggregate result of a verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    required_tables: usize,
    missing_tables: Vec<String>,
    missing_columns: BTreeMap<String, Vec<String>>,
}

impl VerifyReport {
    /// True when every required table and column is present.
    pub fn is_ok(&self) -> bool {
        self.missing_tables.is_empty() && self.missing_columns.is_empty()
    }

    /// True when not a single required table exists, which usually means
    /// the wrong database or table prefix was configured.
    pub fn all_tables_missing(&self) -> bool {
        self.required_tables > 0 && self.missing_tables.len() == self.required_tables
    }

    /// Tables absent from the source entirely.
    pub fn missing_tables(&self) -> &[String] {
        &self.missing_tables
    }

    /// Required columns absent from tables that do exist.
    pub fn missing_columns(&self) -> &BTreeMap<String, Vec<String>> {
        &self.missing_columns
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "All required tables and columns are present.");
        }
        if self.all_tables_missing() {
            return write!(
                f,
                "The required tables are not present in the source. \
                 Make sure you entered the correct database name and prefix and try again."
            );
        }

        let mut parts = Vec::new();
        if !self.missing_tables.is_empty() {
            parts.push(format!(
                "Missing required source tables: {}",
                self.missing_tables.join(", ")
            ));
        }
        if !self.missing_columns.is_empty() {
            let columns: Vec<String> = self
                .missing_columns
                .iter()
                .map(|(table, columns)| format!("{table} ({})", columns.join(", ")))
                .collect();
            parts.push(format!("Missing required columns: {}", columns.join("; ")));
        }
        write!(f, "{}", parts.join(". "))
    }
}

/// Checks every required table and column against the source schema.
///
/// Probe failures (broken source) propagate; absence is data, not an
/// error.
pub fn verify_source(probe: &dyn SchemaProbe, required: &[RequiredTable]) -> Result<VerifyReport> {
    let mut missing_tables = Vec::new();
    let mut missing_columns: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for requirement in required {
        match probe.table_columns(&requirement.name)? {
            None => {
                tracing::debug!(table = %requirement.name, "Required table absent");
                missing_tables.push(requirement.name.clone());
            }
            Some(present) => {
                let absent: Vec<String> = requirement
                    .columns
                    .iter()
                    .filter(|column| !present.contains(column))
                    .cloned()
                    .collect();
                if !absent.is_empty() {
                    tracing::debug!(
                        table = %requirement.name,
                        columns = ?absent,
                        "Required columns absent"
                    );
                    missing_columns.insert(requirement.name.clone(), absent);
                }
            }
        }
    }

    Ok(VerifyReport {
        required_tables: required.len(),
        missing_tables,
        missing_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::source::MemoryCatalog;

    #[test]
    fn test_everything_present() {
        let catalog = MemoryCatalog::new().with_table("user", &["id", "name", "email"]);
        let required = vec![RequiredTable::new("user", &["id", "email"])];

        let report = verify_source(&catalog, &required).unwrap();
        assert!(report.is_ok());
        assert_eq!(
            report.to_string(),
            "All required tables and columns are present."
        );
    }

    #[test]
    fn test_all_tables_missing_is_distinguished() {
        let catalog = MemoryCatalog::new();
        let required = vec![
            RequiredTable::new("user", &["id"]),
            RequiredTable::new("post", &["id"]),
        ];

        let report = verify_source(&catalog, &required).unwrap();
        assert!(!report.is_ok());
        assert!(report.all_tables_missing());
        assert!(report.to_string().contains("correct database name and prefix"));
    }

    #[test]
    fn test_partial_absence_reports_both_kinds() {
        // One table entirely absent, one present with a missing column.
        let catalog = MemoryCatalog::new().with_table("post", &["id", "body"]);
        let required = vec![
            RequiredTable::new("user", &["id"]),
            RequiredTable::new("post", &["id", "authorID"]),
        ];

        let report = verify_source(&catalog, &required).unwrap();
        assert!(!report.is_ok());
        assert!(!report.all_tables_missing());
        assert_eq!(report.missing_tables(), &["user".to_string()]);
        assert_eq!(
            report.missing_columns().get("post"),
            Some(&vec!["authorID".to_string()])
        );

        let message = report.to_string();
        assert!(message.contains("Missing required source tables: user"));
        assert!(message.contains("Missing required columns: post (authorID)"));
    }

    #[test]
    fn test_missing_columns_only() {
        let catalog = MemoryCatalog::new().with_table("user", &["id"]);
        let required = vec![RequiredTable::new("user", &["id", "email", "joined"])];

        let report = verify_source(&catalog, &required).unwrap();
        assert!(!report.is_ok());
        assert!(!report.all_tables_missing());
        assert_eq!(
            report.to_string(),
            "Missing required columns: user (email, joined)"
        );
    }
}
