//! RecordIO framing.
//!
//! Each record on the wire is the payload length rendered as ASCII
//! decimal, a single LF, then the payload bytes. There is no trailing
//! delimiter:
//!
//! ```text
//! +---------------------+------+-----------------+
//! | Length (ASCII dec.) | '\n' | Payload         |
//! +---------------------+------+-----------------+
//! ```
//!
//! The codec plugs into [`tokio_util::codec`] for stream-based consumers;
//! producers that frame one record at a time can call
//! [`Encoder::encode`] with a scratch `BytesMut`.
//!
//! The decode path validates the length header before allocating, so a
//! peer cannot force a large allocation with a bogus header.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::WireError;

/// Maximum record payload accepted by the decoder (16 MiB).
pub const MAX_RECORD_SIZE: usize = 16 * 1024 * 1024;

/// Longest length header the decoder will buffer before giving up.
const MAX_HEADER_LEN: usize = 20;

/// RecordIO encoder/decoder.
#[derive(Debug, Clone)]
pub struct RecordIoCodec {
    max_record_size: usize,
}

impl RecordIoCodec {
    pub fn new() -> Self {
        Self {
            max_record_size: MAX_RECORD_SIZE,
        }
    }
}

impl Default for RecordIoCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<Bytes> for RecordIoCodec {
    type Error = WireError;

    fn encode(&mut self, payload: Bytes, dst: &mut BytesMut) -> Result<(), WireError> {
        let header = payload.len().to_string();
        dst.reserve(header.len() + 1 + payload.len());
        dst.put_slice(header.as_bytes());
        dst.put_u8(b'\n');
        dst.put_slice(&payload);
        Ok(())
    }
}

impl Decoder for RecordIoCodec {
    type Item = Bytes;
    type Error = WireError;

    /// Decodes one record from the input buffer.
    ///
    /// Returns `Ok(None)` when more data is needed, and an error when the
    /// header is not a plain decimal number or announces a record larger
    /// than [`MAX_RECORD_SIZE`].
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, WireError> {
        let Some(newline) = src.iter().position(|&b| b == b'\n') else {
            if src.len() > MAX_HEADER_LEN {
                return Err(WireError::CorruptRecord(
                    "no record delimiter within header bounds".to_string(),
                ));
            }
            return Ok(None);
        };

        let header = &src[..newline];
        if header.is_empty() || !header.iter().all(u8::is_ascii_digit) {
            return Err(WireError::CorruptRecord(format!(
                "invalid record length header: {:?}",
                String::from_utf8_lossy(header)
            )));
        }

        // All-digit ASCII, so the utf8 conversion cannot fail; a value too
        // large for usize is simply over the size cap.
        let length = std::str::from_utf8(header)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(usize::MAX);

        if length > self.max_record_size {
            return Err(WireError::RecordTooLarge {
                length,
                max: self.max_record_size,
            });
        }

        let frame_len = newline + 1 + length;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(newline + 1);
        Ok(Some(src.split_to(length).freeze()))
    }
}
