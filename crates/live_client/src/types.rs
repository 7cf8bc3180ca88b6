use std::time::Duration;

use live_core::ProgressPayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Destination of messages meant for every connected client.
pub const BROADCAST: &str = "broadcast";

pub const DOWNLOAD_PROGRESS: &str = "downloadProgress";
pub const DOWNLOAD_COMPLETE: &str = "downloadComplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DownloadProgress,
    DownloadComplete,
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DownloadCompletePayload {
    #[serde(default)]
    pub videos: Vec<Value>,
}

/// Payload of an inbound message, discriminated by its `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    DownloadProgress(ProgressPayload),
    DownloadComplete(DownloadCompletePayload),
    /// A `type` this client has no schema for; kept raw so filters can still
    /// select it.
    Other { kind: String, payload: Value },
}

impl ServerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::DownloadProgress(_) => EventKind::DownloadProgress,
            ServerEvent::DownloadComplete(_) => EventKind::DownloadComplete,
            ServerEvent::Other { .. } => EventKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub destination: String,
    pub source: Option<String>,
    pub event: ServerEvent,
}

impl Envelope {
    pub fn is_broadcast(&self) -> bool {
        self.destination == BROADCAST
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    /// Socket is down; the next attempt starts after `retry_in`.
    Closed { retry_in: Duration },
    Stopped,
}
