use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::types::{
    DownloadCompletePayload, Envelope, ServerEvent, DOWNLOAD_COMPLETE, DOWNLOAD_PROGRESS,
};

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

/// Parses one text frame and validates its payload against the `type`.
pub fn decode_frame(text: &str) -> Result<Envelope, DecodeError> {
    let raw: RawEnvelope = serde_json::from_str(text).map_err(DecodeError::Envelope)?;
    let event = decode_event(raw.kind, raw.payload)?;
    Ok(Envelope {
        destination: raw.destination.unwrap_or_default(),
        source: raw.source,
        event,
    })
}

/// Binary frames are accepted when they carry UTF-8 JSON.
pub fn decode_binary_frame(bytes: Vec<u8>) -> Result<Envelope, DecodeError> {
    let text = String::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
    decode_frame(&text)
}

fn decode_event(kind: String, payload: Value) -> Result<ServerEvent, DecodeError> {
    // A missing payload decodes like an empty object.
    let payload = match payload {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    match kind.as_str() {
        DOWNLOAD_PROGRESS => serde_json::from_value(payload)
            .map(ServerEvent::DownloadProgress)
            .map_err(|source| DecodeError::Payload { kind, source }),
        DOWNLOAD_COMPLETE => serde_json::from_value::<DownloadCompletePayload>(payload)
            .map(ServerEvent::DownloadComplete)
            .map_err(|source| DecodeError::Payload { kind, source }),
        _ => Ok(ServerEvent::Other { kind, payload }),
    }
}
