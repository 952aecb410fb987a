//! Error types for wire encoding and framing.

use thiserror::Error;

/// Errors that can occur when encoding, decoding, or framing messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// A JSON body could not be parsed or serialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A protobuf body could not be decoded.
    #[error("invalid protobuf: {0}")]
    Protobuf(#[from] prost::DecodeError),

    /// A RecordIO record header is malformed.
    #[error("corrupt record header: {0}")]
    CorruptRecord(String),

    /// A RecordIO record exceeds the configured maximum size.
    #[error("record of {length} bytes exceeds maximum of {max} bytes")]
    RecordTooLarge { length: usize, max: usize },

    /// An I/O error surfaced through the framing layer.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
