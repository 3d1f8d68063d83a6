// SPDX-License-Identifier: MPL-2.0
//! Event-stream framing and database event decoding.

use serde::Deserialize;
use serde_json::Value;

/// One dispatched `text/event-stream` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    pub event: String,
    pub data: String,
}

/// Incremental `text/event-stream` parser.
///
/// Bytes may be fed in arbitrary chunks; a message is emitted once its
/// terminating blank line has been received.
#[derive(Debug, Default)]
pub struct SseParser {
    pending: Vec<u8>,
    event: String,
    data: Vec<String>,
}

impl SseParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a chunk and returns every message it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.pending.extend_from_slice(chunk);

        let mut messages = Vec::new();
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(message) = self.process_line(&line) {
                messages.push(message);
            }
        }
        messages
    }

    fn process_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = value.to_string(),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        let event = std::mem::take(&mut self.event);
        let data = std::mem::take(&mut self.data);
        if event.is_empty() && data.is_empty() {
            return None;
        }
        Some(SseMessage {
            event: if event.is_empty() {
                "message".to_string()
            } else {
                event
            },
            data: data.join("\n"),
        })
    }
}

/// Decoded database stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    /// The server stopped the stream, usually because security rules no
    /// longer allow reading the path.
    Cancel(String),
    AuthRevoked,
    /// Unknown event name or undecodable payload; ignored by the client.
    Ignored(String),
}

#[derive(Deserialize)]
struct Payload {
    path: String,
    #[serde(default)]
    data: Value,
}

impl From<SseMessage> for StreamEvent {
    fn from(message: SseMessage) -> Self {
        match message.event.as_str() {
            "put" | "patch" => match serde_json::from_str::<Payload>(&message.data) {
                Ok(payload) if message.event == "put" => StreamEvent::Put {
                    path: payload.path,
                    data: payload.data,
                },
                Ok(payload) => StreamEvent::Patch {
                    path: payload.path,
                    data: payload.data,
                },
                Err(e) => StreamEvent::Ignored(format!("bad {} payload: {e}", message.event)),
            },
            "keep-alive" => StreamEvent::KeepAlive,
            "cancel" => StreamEvent::Cancel(
                serde_json::from_str::<String>(&message.data).unwrap_or(message.data),
            ),
            "auth_revoked" => StreamEvent::AuthRevoked,
            other => StreamEvent::Ignored(other.to_string()),
        }
    }
}
