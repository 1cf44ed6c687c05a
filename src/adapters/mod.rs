//! External integrations: data sources feeding the export pipeline.

pub mod source;
