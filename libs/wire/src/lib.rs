//! # provd-wire
//!
//! Wire protocol for the resource provider control plane.
//!
//! ## Design Principles
//!
//! - One message type per direction: a `Call` travels provider → manager,
//!   an `Event` travels manager → provider
//! - Both directions are encodable as JSON (`application/json`) and as
//!   binary protobuf (`application/x-protobuf`); the two encodings carry
//!   identical information and round-trip losslessly
//! - Events are multiplexed over a single chunked HTTP response using
//!   RecordIO framing (`<decimal-length>\n<payload>`)
//! - UUID-valued fields travel as raw bytes on the wire (base64 in JSON)
//!   and are parsed at the edge
//!
//! ## Modules
//!
//! - `call`: provider → manager messages
//! - `event`: manager → provider messages
//! - `resource`: shared value types (ids, resources, operations)
//! - `codec`: content-type negotiation and Call/Event encode/decode
//! - `recordio`: RecordIO framing codec

pub mod call;
pub mod codec;
pub mod event;
pub mod recordio;
pub mod resource;

mod error;
mod json;

pub use call::{Call, CallType, PublishStatus};
pub use codec::ContentType;
pub use error::WireError;
pub use event::{Event, EventType};
pub use recordio::RecordIoCodec;
pub use resource::{
    FrameworkId, OfferOperation, OperationState, OperationStatus, Resource, ResourceError,
    ResourceProviderId, ResourceProviderInfo,
};
