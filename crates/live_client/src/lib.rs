//! Realtime connection to the Youtarr server.
//!
//! One WebSocket per [`ConnectionManager`], reopened with capped exponential
//! backoff, with inbound messages fanned out to filtered subscribers.

mod backoff;
mod connection;
mod decode;
mod endpoint;
mod error;
mod notify;
mod registry;
mod types;

pub use backoff::{Backoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY};
pub use connection::{ConnectionManager, ConnectionSettings};
pub use decode::{decode_binary_frame, decode_frame};
pub use endpoint::Endpoint;
pub use error::{ClientError, DecodeError};
pub use notify::{
    completion_notification, CompletionNotifier, Notification, Notifier, NotifyOutcome,
    Permission, NOTIFICATION_TITLE,
};
pub use registry::{broadcast_of, Callback, Filter, SubscriberRegistry, SubscriptionId};
pub use types::{
    ConnectionState, DownloadCompletePayload, Envelope, EventKind, ServerEvent, BROADCAST,
    DOWNLOAD_COMPLETE, DOWNLOAD_PROGRESS,
};
