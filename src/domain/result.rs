//! Result type alias for Portico
//!
//! This module provides a convenient Result type alias that uses
//! PorticoError as the error type.

use super::errors::PorticoError;

/// Result type alias for Portico operations
///
/// This is a convenience type alias that uses `PorticoError` as the error
/// type. Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, PorticoError>;
