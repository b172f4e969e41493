//! Error types for hitannot-rs
//!
//! Every failure is fatal to the run except the custom-schema case in the
//! summary, which is reported as `SummaryOutcome::CustomSchema` instead.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HitAnnotError>;

#[derive(Error, Debug)]
pub enum HitAnnotError {
    /// I/O and gzip decoding errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header line missing or lacking required columns
    #[error("Malformed header in '{path}': {reason}")]
    MalformedHeader { path: PathBuf, reason: String },

    /// Hit row that cannot be mapped onto the fixed prefix
    #[error("Malformed hit at line {line}: {reason}")]
    MalformedHit { line: usize, reason: String },

    /// Classified hit whose key is absent from the annotation table
    #[error("No annotation for key '{key}' (hits line {line})")]
    MissingAnnotation { key: String, line: usize },

    /// Required column absent from an annotated hits header
    #[error("Required column '{column}' missing from '{path}'")]
    MissingColumn { column: String, path: PathBuf },

    /// No data rows to compute percentages from
    #[error("No sequences found in '{0}'")]
    EmptyInput(PathBuf),
}
