//! Error types for the effectful edges: catalog loading and chime export.
//!
//! The quote rotation itself never fails; these only cover I/O and
//! malformed input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no categories")]
    Empty,

    #[error("category key must not be blank")]
    BlankKey,

    #[error("category '{0}' appears more than once")]
    DuplicateKey(String),

    #[error("category '{0}' has a blank display name")]
    BlankName(String),
}

#[derive(Error, Debug)]
pub enum ChimeError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sample rate {rate} Hz is outside {min}..={max} Hz")]
    SampleRateOutOfRange { rate: u32, min: u32, max: u32 },

    #[error("{samples} samples do not fit in a WAV data chunk")]
    TooLong { samples: usize },
}
