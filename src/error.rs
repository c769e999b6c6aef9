//! @ai:module:intent Define error types for the srr report engine
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all report operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch standards catalog from {url}: {source}")]
    CatalogFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Standards checklist not found for category '{category}' at {path}")]
    ChecklistMissing { category: String, path: PathBuf },

    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid package manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Failed to open viewer for {path}: {source}")]
    Viewer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
