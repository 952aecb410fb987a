//! Streaming HTTP connection to a single resource provider.
//!
//! The connection owns the writer half of an in-process pipe. The reader
//! half becomes the body of the provider's subscribe response; events
//! written here appear on the provider's chunked stream, one RecordIO
//! record per event.

use bytes::{Bytes, BytesMut};
use tokio::sync::{mpsc, watch};
use tokio_util::codec::Encoder as _;
use tracing::error;
use uuid::Uuid;

use provd_wire::{codec, ContentType, Event, RecordIoCodec};

/// Writer side of one provider's event stream.
pub struct HttpConnection {
    writer: Option<mpsc::UnboundedSender<Bytes>>,
    pub content_type: ContentType,
    pub stream_id: Uuid,
    encoder: RecordIoCodec,
    /// Tracks the reader half; see [`HttpConnection::closed`].
    reader_alive: watch::Receiver<()>,
}

/// Reader side of one provider's event stream.
///
/// Yields framed records as they are sent and ends once the writer is
/// closed. Dropping the reader (the peer disconnected, or the response
/// finished) is what the writer's `closed()` future observes.
pub struct PipeReader {
    records: mpsc::UnboundedReceiver<Bytes>,
    _alive: watch::Sender<()>,
}

impl PipeReader {
    /// Receives the next framed record, or `None` once the writer is
    /// closed and all buffered records are drained.
    pub async fn recv(&mut self) -> Option<Bytes> {
        self.records.recv().await
    }
}

impl HttpConnection {
    /// Opens a new pipe, returning the connection and the reader half.
    pub fn open(content_type: ContentType, stream_id: Uuid) -> (Self, PipeReader) {
        let (writer, records) = mpsc::unbounded_channel();
        let (alive, reader_alive) = watch::channel(());
        (
            Self {
                writer: Some(writer),
                content_type,
                stream_id,
                encoder: RecordIoCodec::new(),
                reader_alive,
            },
            PipeReader {
                records,
                _alive: alive,
            },
        )
    }

    /// Serializes the event and writes one record.
    ///
    /// Returns `false` iff the connection is closed, locally via
    /// [`HttpConnection::close`] or because the reader half is gone (the
    /// peer disconnected or the response was dropped). Never blocks.
    pub fn send(&mut self, event: &Event) -> bool {
        let Some(writer) = self.writer.as_ref() else {
            return false;
        };

        let payload = match codec::encode_event(self.content_type, event) {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "Failed to encode event");
                return false;
            }
        };

        let mut frame = BytesMut::with_capacity(payload.len() + 12);
        if self
            .encoder
            .encode(Bytes::from(payload), &mut frame)
            .is_err()
        {
            return false;
        }

        writer.send(frame.freeze()).is_ok()
    }

    /// Closes the writer half.
    ///
    /// The reader observes EOF once buffered records drain; subsequent
    /// sends return `false`.
    pub fn close(&mut self) {
        self.writer = None;
    }

    /// Resolves once the reader half observes EOF or error (peer
    /// disconnect or local close).
    pub fn closed(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut alive = self.reader_alive.clone();
        async move {
            // No value is ever sent on the channel; changed() errors
            // exactly when the reader half has been dropped.
            while alive.changed().await.is_ok() {}
        }
    }
}
