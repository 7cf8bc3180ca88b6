use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

/// Why an inbound frame was dropped before dispatch.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not a message envelope: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("payload of `{kind}` does not match its shape: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("binary frame is not valid UTF-8")]
    NotUtf8,
}
