//! Error types for vista_widget

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while setting up a viewer
///
/// Model load failures are not errors here: they are reported through the
/// swap controller's report sink and the previous model stays on screen.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Failed to read a config file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ViewerConfig`](crate::ViewerConfig)
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written as TOML
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config parsed but holds unusable values
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for vista_widget operations
pub type Result<T> = std::result::Result<T, ViewerError>;
