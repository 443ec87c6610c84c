//! Loading command-line descriptions from JSON files.
//!
//! The description file mirrors [`crate::model::Parser`] field for field;
//! absent fields take their defaults, so a minimal description is just a
//! name and a short description.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Parser;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read description: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("description has no program name")]
    MissingName,
}

/// Load a command-line description from a JSON file.
pub fn load_description(path: &Path) -> Result<Parser, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_description(&raw)
}

/// Parse a JSON command-line description.
pub fn parse_description(raw: &str) -> Result<Parser, LoadError> {
    let parser: Parser = serde_json::from_str(raw)?;
    if parser.name.is_empty() {
        return Err(LoadError::MissingName);
    }
    Ok(parser)
}
