//! External service interactions
//!
//! - tool output sources (directory on disk)
//! - background fetching of the mapper and tool outputs

pub mod fetcher;
pub mod source;

pub use fetcher::{FetchMessage, Fetcher};
pub use source::{DirectorySource, ToolOutputSource};
