//! Resource Provider Manager
//!
//! The manager mediates between the agent and a fleet of external
//! resource providers connected over long-lived streaming HTTP. It
//! terminates the bidirectional control-plane protocol, tracks
//! per-provider subscription state, forwards operation, reconciliation,
//! and publish events to providers, correlates asynchronous provider
//! replies back to in-flight caller futures, and pushes lifecycle
//! messages onto an outbound queue consumed by the rest of the agent.
//!
//! ## Architecture
//!
//! ```text
//! provider ── POST /api/v1/resource_provider ──▶ front controller
//!                                                    │ commands
//!                                                    ▼
//! agent ── apply/acknowledge/reconcile/publish ─▶ manager actor ─▶ outbound queue
//!                                                    │
//!                          events (RecordIO stream)  ▼
//! provider ◀──────────────────────────────── HttpConnection
//! ```
//!
//! A single actor task serializes every state mutation; see
//! [`manager::ResourceProviderManager`].
//!
//! ## Modules
//!
//! - `api`: HTTP front controller and routing
//! - `connection`: per-provider streaming connection
//! - `manager`: the actor and its public handle
//! - `messages`: agent-facing message types and the outbound queue
//! - `validation`: protocol-level call validation

pub mod api;
pub mod config;
pub mod connection;
pub mod manager;
pub mod messages;
pub mod validation;

pub use config::Config;
pub use connection::{HttpConnection, PipeReader};
pub use manager::{ManagerError, ResourceProviderManager, SubscribeReply};
pub use messages::ResourceProviderMessage;
