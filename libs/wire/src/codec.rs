//! Content-type handling and Call/Event encode/decode.
//!
//! Two content types are recognized, `application/json` and
//! `application/x-protobuf`. Matching is case-insensitive and ignores
//! media-type parameters. The chosen type is fixed for the lifetime of a
//! stream; encoding is symmetric across both formats.

use prost::Message as _;

use crate::call::Call;
use crate::error::WireError;
use crate::event::Event;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_PROTOBUF: &str = "application/x-protobuf";

/// Serialization format of a request body or event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Protobuf,
}

impl ContentType {
    /// Parses a `Content-Type` header value.
    ///
    /// Returns `None` for anything other than the two recognized types.
    pub fn from_header(value: &str) -> Option<Self> {
        let media_type = value.split(';').next().unwrap_or(value).trim();
        if media_type.eq_ignore_ascii_case(APPLICATION_JSON) {
            Some(ContentType::Json)
        } else if media_type.eq_ignore_ascii_case(APPLICATION_PROTOBUF) {
            Some(ContentType::Protobuf)
        } else {
            None
        }
    }

    /// Negotiates the response content type from an `Accept` header.
    ///
    /// JSON is preferred, protobuf is the fallback. An absent, empty, or
    /// wildcard `Accept` defaults to JSON. Returns `None` when neither
    /// recognized type is acceptable.
    pub fn negotiate(accept: Option<&str>) -> Option<Self> {
        let Some(accept) = accept else {
            return Some(ContentType::Json);
        };
        if accept.trim().is_empty() {
            return Some(ContentType::Json);
        }

        let mut protobuf_acceptable = false;
        for range in accept.split(',') {
            let media_range = range.split(';').next().unwrap_or(range).trim();
            if media_range.eq_ignore_ascii_case(APPLICATION_JSON)
                || media_range == "*/*"
                || media_range.eq_ignore_ascii_case("application/*")
            {
                return Some(ContentType::Json);
            }
            if media_range.eq_ignore_ascii_case(APPLICATION_PROTOBUF) {
                protobuf_acceptable = true;
            }
        }

        protobuf_acceptable.then_some(ContentType::Protobuf)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => APPLICATION_JSON,
            ContentType::Protobuf => APPLICATION_PROTOBUF,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decodes a request body into a [`Call`].
pub fn decode_call(content_type: ContentType, body: &[u8]) -> Result<Call, WireError> {
    match content_type {
        ContentType::Json => Ok(serde_json::from_slice(body)?),
        ContentType::Protobuf => Ok(Call::decode(body)?),
    }
}

/// Encodes a [`Call`] for transmission; the inverse of [`decode_call`].
pub fn encode_call(content_type: ContentType, call: &Call) -> Result<Vec<u8>, WireError> {
    match content_type {
        ContentType::Json => Ok(serde_json::to_vec(call)?),
        ContentType::Protobuf => Ok(call.encode_to_vec()),
    }
}

/// Encodes an [`Event`] for one record of the event stream.
pub fn encode_event(content_type: ContentType, event: &Event) -> Result<Vec<u8>, WireError> {
    match content_type {
        ContentType::Json => Ok(serde_json::to_vec(event)?),
        ContentType::Protobuf => Ok(event.encode_to_vec()),
    }
}

/// Decodes one record of the event stream into an [`Event`].
pub fn decode_event(content_type: ContentType, record: &[u8]) -> Result<Event, WireError> {
    match content_type {
        ContentType::Json => Ok(serde_json::from_slice(record)?),
        ContentType::Protobuf => Ok(Event::decode(record)?),
    }
}
