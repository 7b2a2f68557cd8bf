//! Error types for loading tool output documents

use std::path::PathBuf;
use thiserror::Error;

/// Failure while fetching or decoding a JSON resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Resource names are plain file names relative to the source root
    #[error("invalid resource name '{0}'")]
    InvalidName(String),

    #[error("expected a JSON object in {0}")]
    NotAnObject(String),
}
