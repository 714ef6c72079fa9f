//! Error types for qelves-core
//!
//! Ingestion itself is infallible: malformed bodies degrade to "no events".
//! These errors cover the file-facing edges (loading captures, writing exports).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for qelves-core
#[derive(Error, Debug)]
pub enum QelvesError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors loading captured traffic
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to read capture file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid HAR document: {0}")]
    InvalidHar(#[from] serde_json::Error),
}

/// Errors producing export bundles
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize bundle: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write bundle to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QelvesError>;
