//! Background fetcher
//!
//! Each request runs on its own worker thread and reports back over an mpsc
//! channel. The app drains the channel on every tick, so the UI loop never
//! blocks on disk.

use super::source::ToolOutputSource;
use crate::error::FetchError;
use crate::model::mapper::{Mapper, MAPPER_FILE};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// Result of a background request
#[derive(Debug)]
pub enum FetchMessage {
    Mapper(Result<Mapper, FetchError>),
    ToolOutput {
        file: String,
        request_id: u64,
        result: Result<Value, FetchError>,
    },
}

pub struct Fetcher {
    source: Arc<dyn ToolOutputSource>,
    sender: Sender<FetchMessage>,
    receiver: Receiver<FetchMessage>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn ToolOutputSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
        }
    }

    /// Load and parse the mapper document
    pub fn spawn_mapper_load(&self) {
        let source = Arc::clone(&self.source);
        let tx = self.sender.clone();

        thread::spawn(move || {
            debug!(file = MAPPER_FILE, "fetching mapper");
            let result = source
                .fetch(MAPPER_FILE)
                .and_then(|value| Mapper::from_value(&value));
            let _ = tx.send(FetchMessage::Mapper(result));
        });
    }

    /// Load the body of a tool output file
    pub fn spawn_file_load(&self, request_id: u64, file: String) {
        let source = Arc::clone(&self.source);
        let tx = self.sender.clone();

        thread::spawn(move || {
            debug!(%file, request_id, "fetching tool output");
            let result = source.fetch(&file);
            let _ = tx.send(FetchMessage::ToolOutput {
                file,
                request_id,
                result,
            });
        });
    }

    /// Drain every message that has arrived since the last poll
    pub fn poll(&self) -> Vec<FetchMessage> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}
