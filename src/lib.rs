// Portico - Forum Database Export Tool
// Copyright (c) 2026 Portico Contributors
// Licensed under the MIT License

//! # Portico - Forum Database Export
//!
//! Portico migrates data from arbitrary third-party forum database
//! schemas into a single canonical, versioned, delimited text format
//! that a downstream importer can consume.
//!
//! ## Overview
//!
//! The core is the export engine: it takes heterogeneous rows from a
//! foreign schema, reconciles them against a fixed canonical table
//! catalog plus a caller-supplied column mapping, and serializes the
//! result into a strict textual wire format with deterministic column
//! ordering, type coercion, and escaping.
//!
//! ## Architecture
//!
//! Portico follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (catalog, reconciliation, serialization,
//!   writing, session lifecycle, source verification)
//! - [`adapters`] - Data sources feeding the pipeline
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portico::adapters::source::MemorySource;
//! use portico::core::mapping::MappingSet;
//! use portico::core::session::{ExportOptions, ExportSession};
//! use portico::domain::Row;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = ExportSession::begin(ExportOptions {
//!         path: Some("export.txt".into()),
//!         source_label: Some("Example Forum".to_string()),
//!         compress: false,
//!     })?;
//!
//!     let rows = vec![Row::from_iter([("UserID", 1i64), ("RoleID", 2i64)])];
//!     let mut source = MemorySource::new(rows);
//!     session.export_table("UserRole", &mut source, &MappingSet::new())?;
//!
//!     let summary = session.end()?;
//!     println!("Exported {} tables", summary.tables.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Wire format
//!
//! One document per export run:
//!
//! ```text
//! Portico Export: 1.0, Source: WBB 3.x
//!
//! // Export Started: 2026-08-30 12:00:00
//! Table: User
//! UserID,Name,lastIp:varchar(40)
//! 1,"alice","10.0.0.1"
//!
//! // Exported Table: User (1 rows, 00:00.01)
//! // Export Completed: 2026-08-30 12:00:01
//! // Elapsed Time: 00:01.00
//! ```
//!
//! Lines starting with `// ` are informational comments importers must
//! skip. Canonical columns appear bare in table headers; synthesized
//! columns carry a `name:type` token so the importer can materialize
//! them.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
