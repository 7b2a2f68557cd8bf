//! Tool-to-view mapper document
//!
//! The mapper file associates each tool output with the view that renders
//! it: `{ "<tool>": { "<componentType>": "<componentName>" } }`.

use crate::error::FetchError;
use serde_json::Value;

/// Name of the mapper resource inside the tool output directory
pub const MAPPER_FILE: &str = "componen-tool-mapper.json";

/// Files offered when the mapper cannot be loaded
pub fn fallback_files() -> Vec<String> {
    vec!["sample_tool.json".to_string(), "sample_tool_2.json".to_string()]
}

/// Resolved view configuration for a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    pub component_type: String,
    pub name: String,
}

/// One mapper entry; `config` is `None` when the inner object is empty or malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperEntry {
    pub tool: String,
    pub config: Option<ComponentConfig>,
}

/// Parsed mapper document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapper {
    entries: Vec<MapperEntry>,
}

impl Mapper {
    /// Build from a parsed document; only a top-level object is accepted
    pub fn from_value(value: &Value) -> Result<Self, FetchError> {
        let tools = value
            .as_object()
            .ok_or_else(|| FetchError::NotAnObject(MAPPER_FILE.to_string()))?;

        let entries = tools
            .iter()
            .map(|(tool, inner)| MapperEntry {
                tool: tool.clone(),
                config: Self::first_config(inner),
            })
            .collect();

        Ok(Self { entries })
    }

    /// The first key of the inner object is authoritative
    fn first_config(inner: &Value) -> Option<ComponentConfig> {
        let (component_type, name) = inner.as_object()?.iter().next()?;
        Some(ComponentConfig {
            component_type: component_type.clone(),
            name: name.as_str()?.to_string(),
        })
    }

    /// Selectable files: `<tool>.json` for every tool
    pub fn file_list(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}.json", entry.tool))
            .collect()
    }

    /// Entry for a tool name, if the mapper lists it
    pub fn entry(&self, tool: &str) -> Option<&MapperEntry> {
        self.entries.iter().find(|entry| entry.tool == tool)
    }

    /// View configuration for a tool, if the mapper resolves it
    pub fn config_for(&self, tool: &str) -> Option<&ComponentConfig> {
        self.entry(tool).and_then(|entry| entry.config.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Tool name for a file: the name with a trailing `.json` removed
pub fn tool_name(file: &str) -> &str {
    file.strip_suffix(".json").unwrap_or(file)
}
