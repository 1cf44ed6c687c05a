//! Column mapping and reconciliation
//!
//! Callers describe how a foreign schema's columns translate into the
//! canonical catalog with per-column [`MappingDirective`]s. Reconciliation
//! happens in two phases:
//!
//! 1. [`normalize_mapping`] resolves every directive against the canonical
//!    table into an immutable [`NormalizedMapping`].
//! 2. [`reconcile`] walks the first data row and locks the output column
//!    order for the whole table export.
//!
//! The same `NormalizedMapping` is later used by the row serializer to
//! resolve destination columns back to source columns, so nothing is
//! mutated between phases.

use crate::core::schema::CanonicalTable;
use crate::domain::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One caller-supplied mapping rule, keyed by source column name.
///
/// The string form is deliberately overloaded, matching the importer's
/// configuration conventions:
/// - a canonical column name means "rename the source column to this";
/// - any other string is a type label and declares a brand-new output
///   column that keeps the source column's own name.
///
/// The table form names both the new column and its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingDirective {
    /// Canonical column name or type label.
    Target(String),
    /// Explicit column rename plus type declaration.
    Fresh {
        column: String,
        #[serde(rename = "type")]
        type_label: String,
    },
}

/// Raw mapping set as it arrives from configuration.
pub type MappingSet = BTreeMap<String, MappingDirective>;

/// A directive resolved against the canonical table.
///
/// `type_label` is `None` when the target is a canonical column whose
/// type comes from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub column: String,
    pub type_label: Option<String>,
}

/// Mapping set with every directive resolved to a destination column.
///
/// Immutable once built; shared by reconciliation and row serialization.
#[derive(Debug, Clone, Default)]
pub struct NormalizedMapping {
    targets: Vec<(String, ResolvedTarget)>,
}

impl NormalizedMapping {
    /// An empty mapping (export with canonical column names only).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolved target for a source column.
    pub fn target_for(&self, source: &str) -> Option<&ResolvedTarget> {
        self.targets
            .iter()
            .find(|(column, _)| column == source)
            .map(|(_, target)| target)
    }

    /// Reverse lookup: which source column feeds a destination column.
    ///
    /// Used during row serialization when the destination name has no
    /// exact match in the row.
    pub fn source_for(&self, dest: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|(_, target)| target.column == dest)
            .map(|(source, _)| source.as_str())
    }
}

/// Resolves a raw mapping set against a canonical table.
///
/// String directives that name a canonical column become renames with
/// the type deferred to the catalog; any other string is a type label
/// declaring a new column under the source column's own name.
pub fn normalize_mapping(raw: &MappingSet, table: &CanonicalTable) -> NormalizedMapping {
    let mut targets = Vec::with_capacity(raw.len());
    for (source, directive) in raw {
        let resolved = match directive {
            MappingDirective::Target(value) => {
                if table.has_column(value) {
                    ResolvedTarget {
                        column: value.clone(),
                        type_label: None,
                    }
                } else {
                    ResolvedTarget {
                        column: source.clone(),
                        type_label: Some(value.clone()),
                    }
                }
            }
            MappingDirective::Fresh { column, type_label } => ResolvedTarget {
                column: column.clone(),
                type_label: Some(type_label.clone()),
            },
        };
        targets.push((source.clone(), resolved));
    }
    NormalizedMapping { targets }
}

/// One output column locked in by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledColumn {
    /// Output column name.
    pub name: String,
    /// Resolved type label.
    pub type_label: String,
    /// Whether `name` belongs to the canonical table. Canonical columns
    /// appear bare in the header; synthesized columns carry `name:type`.
    pub canonical: bool,
}

/// The finalized, ordered output column list for one table export.
///
/// Computed exactly once from the table's first data row and applied
/// unchanged to every subsequent row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledStructure {
    columns: Vec<ReconciledColumn>,
}

impl ReconciledStructure {
    /// Output columns in locked order.
    pub fn columns(&self) -> &[ReconciledColumn] {
        &self.columns
    }

    /// Number of output columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the first row had no resolvable columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header tokens in column order: bare names for canonical columns,
    /// `name:type` for synthesized ones.
    pub fn header_tokens(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                if column.canonical {
                    column.name.clone()
                } else {
                    format!("{}:{}", column.name, column.type_label)
                }
            })
            .collect()
    }
}

/// Computes the output structure for a table from its first data row.
///
/// Walks the row's columns in source order. A column resolves through
/// the mapping first, then by canonical name match; anything else is
/// dropped. Each destination column is inserted at most once, first
/// occurrence wins, so the output order is deterministic for a fixed
/// row order and mapping.
pub fn reconcile(
    row: &Row,
    table: &CanonicalTable,
    mapping: &NormalizedMapping,
) -> ReconciledStructure {
    let mut columns: Vec<ReconciledColumn> = Vec::new();

    for (source_column, _) in row.iter() {
        let (dest_column, type_label) = if let Some(target) = mapping.target_for(source_column) {
            let type_label = match &target.type_label {
                Some(label) => label.clone(),
                None => table
                    .column_type(&target.column)
                    .unwrap_or_default()
                    .to_string(),
            };
            (target.column.clone(), type_label)
        } else if let Some(canonical_type) = table.column_type(source_column) {
            (source_column.to_string(), canonical_type.to_string())
        } else {
            // Unresolved source column, dropped from the output.
            continue;
        };

        if columns.iter().any(|column| column.name == dest_column) {
            continue;
        }

        let canonical = table.has_column(&dest_column);
        columns.push(ReconciledColumn {
            name: dest_column,
            type_label,
            canonical,
        });
    }

    ReconciledStructure { columns }
}
