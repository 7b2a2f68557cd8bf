//! Tool output sources

use crate::error::FetchError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Something that can return the parsed JSON body of a named resource
pub trait ToolOutputSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<Value, FetchError>;
}

/// Reads resources from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FetchError> {
        let invalid = name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..");
        if invalid {
            return Err(FetchError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl ToolOutputSource for DirectorySource {
    fn fetch(&self, name: &str) -> Result<Value, FetchError> {
        let path = self.resolve(name)?;
        let contents = fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| FetchError::Parse { path, source })
    }
}
