//! Session state for the resolver and dispatcher
//!
//! All transitions go through [`AppState::reduce`], which consumes the state
//! and an event and returns the next state without touching the terminal,
//! the filesystem or the logger.

use super::mapper::{tool_name, ComponentConfig, Mapper};
use serde_json::Value;

/// Mapper load progress; the mapper is applied at most once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapperStatus {
    #[default]
    Pending,
    Loaded,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    MapperLoaded(Mapper),
    MapperFailed { fallback: Vec<String> },
    FileRequested { file: String, request_id: u64 },
    FileLoaded { file: String, request_id: u64, body: Value },
    FileFailed { file: String, request_id: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Selectable tool output files
    pub files: Vec<String>,
    pub mapper: Mapper,
    pub mapper_status: MapperStatus,
    /// Configuration of the most recently selected tool the mapper resolves
    pub active: Option<ComponentConfig>,
    /// Body of the most recently applied tool output
    pub dataset: Option<Value>,
    /// File whose body is in `dataset`; only a successful load moves it
    pub dataset_file: Option<String>,
    /// File currently loading, cleared when its response arrives
    pub pending_file: Option<String>,
    /// Id of the newest tool output request; older responses are dropped
    pub latest_request: u64,
    /// Bumped on every applied dataset so views rebuild their state
    pub dataset_revision: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id to attach to the next tool output request
    pub fn next_request_id(&self) -> u64 {
        self.latest_request + 1
    }

    /// Whether a response carrying `request_id` would be applied
    pub fn is_current(&self, request_id: u64) -> bool {
        request_id == self.latest_request
    }

    pub fn reduce(self, event: StateEvent) -> Self {
        match event {
            StateEvent::MapperLoaded(mapper) => self.mapper_loaded(mapper),
            StateEvent::MapperFailed { fallback } => self.mapper_failed(fallback),
            StateEvent::FileRequested { file, request_id } => self.file_requested(file, request_id),
            StateEvent::FileLoaded {
                file,
                request_id,
                body,
            } => self.file_loaded(file, request_id, body),
            StateEvent::FileFailed { request_id, .. } => self.file_failed(request_id),
        }
    }

    fn mapper_loaded(self, mapper: Mapper) -> Self {
        if self.mapper_status != MapperStatus::Pending {
            return self;
        }
        Self {
            files: mapper.file_list(),
            mapper,
            mapper_status: MapperStatus::Loaded,
            ..self
        }
    }

    fn mapper_failed(self, fallback: Vec<String>) -> Self {
        if self.mapper_status != MapperStatus::Pending {
            return self;
        }
        Self {
            files: fallback,
            mapper: Mapper::default(),
            mapper_status: MapperStatus::Fallback,
            ..self
        }
    }

    fn file_requested(self, file: String, request_id: u64) -> Self {
        if file.is_empty() {
            return self;
        }

        let active = self
            .mapper
            .config_for(tool_name(&file))
            .cloned()
            .or(self.active);

        Self {
            active,
            pending_file: Some(file),
            latest_request: request_id.max(self.latest_request),
            ..self
        }
    }

    fn file_loaded(self, file: String, request_id: u64, body: Value) -> Self {
        if !self.is_current(request_id) {
            return self;
        }
        Self {
            dataset: Some(body),
            dataset_file: Some(file),
            pending_file: None,
            dataset_revision: self.dataset_revision + 1,
            ..self
        }
    }

    fn file_failed(self, request_id: u64) -> Self {
        if !self.is_current(request_id) {
            return self;
        }
        Self {
            pending_file: None,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded_state() -> AppState {
        let mapper = Mapper::from_value(&json!({
            "products": {"ProductList": "ProductList"},
            "attrs": {"AttributeList": "AttributeList"},
            "broken": {}
        }))
        .unwrap();
        AppState::new().reduce(StateEvent::MapperLoaded(mapper))
    }

    fn request(state: AppState, file: &str) -> (AppState, u64) {
        let request_id = state.next_request_id();
        let state = state.reduce(StateEvent::FileRequested {
            file: file.to_string(),
            request_id,
        });
        (state, request_id)
    }

    #[test]
    fn test_mapper_loaded_derives_files() {
        let state = loaded_state();
        assert_eq!(state.files, vec!["products.json", "attrs.json", "broken.json"]);
        assert_eq!(state.mapper_status, MapperStatus::Loaded);
    }

    #[test]
    fn test_mapper_applies_once() {
        let state = loaded_state().reduce(StateEvent::MapperFailed {
            fallback: vec!["other.json".to_string()],
        });
        assert_eq!(state.mapper_status, MapperStatus::Loaded);
        assert_eq!(state.files.len(), 3);
    }

    #[test]
    fn test_mapper_failure_uses_fallback() {
        let state = AppState::new().reduce(StateEvent::MapperFailed {
            fallback: vec!["sample_tool.json".to_string(), "sample_tool_2.json".to_string()],
        });
        assert_eq!(state.files, vec!["sample_tool.json", "sample_tool_2.json"]);
        assert!(state.mapper.is_empty());
        assert_eq!(state.mapper_status, MapperStatus::Fallback);
    }

    #[test]
    fn test_request_sets_active_config() {
        let (state, _) = request(loaded_state(), "products.json");
        assert_eq!(state.active.as_ref().map(|c| c.name.as_str()), Some("ProductList"));
        assert_eq!(state.pending_file.as_deref(), Some("products.json"));
    }

    #[test]
    fn test_absent_tool_keeps_active_config() {
        let (state, _) = request(loaded_state(), "products.json");
        let (state, _) = request(state, "unknown.json");
        assert_eq!(state.active.as_ref().map(|c| c.name.as_str()), Some("ProductList"));

        let (state, _) = request(state, "broken.json");
        assert_eq!(state.active.as_ref().map(|c| c.name.as_str()), Some("ProductList"));
    }

    #[test]
    fn test_empty_file_is_noop() {
        let before = loaded_state();
        let after = before.clone().reduce(StateEvent::FileRequested {
            file: String::new(),
            request_id: 1,
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_loaded_body_becomes_dataset() {
        let (state, id) = request(loaded_state(), "products.json");
        let state = state.reduce(StateEvent::FileLoaded {
            file: "products.json".to_string(),
            request_id: id,
            body: json!({"products": []}),
        });
        assert_eq!(state.dataset, Some(json!({"products": []})));
        assert_eq!(state.dataset_revision, 1);
        assert!(state.pending_file.is_none());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let (state, first) = request(loaded_state(), "products.json");
        let (state, second) = request(state, "attrs.json");

        let state = state.reduce(StateEvent::FileLoaded {
            file: "attrs.json".to_string(),
            request_id: second,
            body: json!({"attributes": []}),
        });
        let state = state.reduce(StateEvent::FileLoaded {
            file: "products.json".to_string(),
            request_id: first,
            body: json!({"products": []}),
        });

        assert_eq!(state.dataset, Some(json!({"attributes": []})));
        assert_eq!(state.dataset_file.as_deref(), Some("attrs.json"));
        assert_eq!(state.dataset_revision, 1);
    }

    #[test]
    fn test_failure_keeps_previous_dataset() {
        let (state, id) = request(loaded_state(), "products.json");
        let state = state.reduce(StateEvent::FileLoaded {
            file: "products.json".to_string(),
            request_id: id,
            body: json!({"products": [{"title": "A"}]}),
        });
        let (state, id) = request(state, "missing.json");
        let state = state.reduce(StateEvent::FileFailed {
            file: "missing.json".to_string(),
            request_id: id,
        });

        assert_eq!(state.dataset, Some(json!({"products": [{"title": "A"}]})));
        assert_eq!(state.dataset_revision, 1);
        assert!(state.pending_file.is_none());
    }
}
