//! Wire-format record serialization
//!
//! Converts reconciled rows into the delimited text records the importer
//! consumes. The format contract is byte-exact: delimiter `,`, quote
//! `"`, escape `\`, line terminator `\n`, null sentinel `\N`, comment
//! marker `//`.

use crate::core::mapping::{NormalizedMapping, ReconciledStructure};
use crate::domain::{Row, Value};
use std::time::Duration;

/// Field delimiter.
pub const DELIMITER: char = ',';
/// String quote character.
pub const QUOTE: char = '"';
/// Escape character.
pub const ESCAPE: char = '\\';
/// Record terminator.
pub const NEWLINE: char = '\n';
/// Token emitted for absent/null values.
pub const NULL_TOKEN: &str = "\\N";
/// Marker prefixing informational comment lines.
pub const COMMENT_MARKER: &str = "//";

/// Escapes a string field body.
///
/// Each of the escape character, delimiter, newline, and quote is
/// replaced by the escape character followed by the original. The single
/// pass is equivalent to substituting the escape character first and the
/// rest afterwards; substituting in any other order would double-escape
/// the inserted escape characters.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ESCAPE | DELIMITER | NEWLINE | QUOTE => {
                escaped.push(ESCAPE);
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serializes a single value into its wire token.
///
/// Numbers and booleans are unquoted; strings are quoted and escaped.
/// The `Other` arm is the deliberate lossy-degrade policy: values the
/// wire format cannot represent become the null sentinel rather than
/// failing the export.
pub fn serialize_field(value: &Value) -> String {
    match value {
        Value::Null => NULL_TOKEN.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => {
            if *b {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        Value::Text(s) => format!("{QUOTE}{}{QUOTE}", escape(s)),
        Value::Other(_) => NULL_TOKEN.to_string(),
    }
}

/// Serializes one row against the locked structure.
///
/// For each output column the value resolves by exact name match first,
/// then through the mapping's destination-to-source index, then to null.
/// A row missing a column therefore yields the null sentinel in place,
/// never a shifted record: every record has exactly as many fields as
/// the header.
pub fn serialize_row(
    row: &Row,
    structure: &ReconciledStructure,
    mapping: &NormalizedMapping,
) -> String {
    let mut record = String::new();
    for (index, column) in structure.columns().iter().enumerate() {
        if index > 0 {
            record.push(DELIMITER);
        }
        let value = row.get(&column.name).or_else(|| {
            mapping
                .source_for(&column.name)
                .and_then(|source| row.get(source))
        });
        record.push_str(&serialize_field(value.unwrap_or(&Value::Null)));
    }
    record
}

/// Formats an elapsed duration as `mm:ss.ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let minutes = (total / 60.0).floor();
    let seconds = total - minutes * 60.0;
    format!("{:02}:{:05.2}", minutes as u64, seconds)
}
