//! Dataset loading.
//!
//! The dataset is a single JSON document with `airports` and `flights`
//! arrays. It is read once at startup; any failure here is fatal and
//! prevents the index from being built.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Airport, Flight};

/// Errors that can occur when loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading the file failed
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid dataset
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw airports and flights, as parsed from the source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub airports: Vec<Airport>,
    #[serde(default)]
    pub flights: Vec<Flight>,
}

impl Dataset {
    /// Parse a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
