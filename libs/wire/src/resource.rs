//! Shared value types: identifiers, resources, and offer operations.
//!
//! These types appear in both directions of the protocol. They are
//! hand-written prost messages so the binary encoding matches a canonical
//! protobuf schema, with serde derives producing the equivalent JSON.

use prost::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a resource provider.
///
/// Manager-assigned values are random UUIDs rendered as text, but values
/// received from the outside are treated as opaque strings.
#[derive(Clone, PartialEq, Eq, Hash, Message, Serialize, Deserialize)]
pub struct ResourceProviderId {
    #[prost(string, tag = "1")]
    pub value: String,
}

impl ResourceProviderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ResourceProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifier of the framework that initiated an offer operation.
#[derive(Clone, PartialEq, Eq, Hash, Message, Serialize, Deserialize)]
pub struct FrameworkId {
    #[prost(string, tag = "1")]
    pub value: String,
}

impl std::fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identity record of a resource provider.
///
/// `id` is unset on a first subscription; the manager assigns one. `type`
/// and `name` are provider-controlled labels.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ResourceProviderInfo {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceProviderId>,

    #[prost(string, tag = "2")]
    pub r#type: String,

    #[prost(string, tag = "3")]
    pub name: String,
}

/// A single resource owned by a provider.
///
/// Resources without a `provider_id` belong to the agent itself and are
/// outside the manager's jurisdiction.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Resource {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ResourceProviderId>,

    #[prost(string, tag = "2")]
    pub name: String,

    #[prost(double, tag = "3")]
    pub value: f64,
}

/// State of an offer operation as reported by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperationState {
    OperationUnknown = 0,
    OperationPending = 1,
    OperationFinished = 2,
    OperationFailed = 3,
}

impl OperationState {
    /// String value of the enum field name, as used in JSON.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            OperationState::OperationUnknown => "OPERATION_UNKNOWN",
            OperationState::OperationPending => "OPERATION_PENDING",
            OperationState::OperationFinished => "OPERATION_FINISHED",
            OperationState::OperationFailed => "OPERATION_FAILED",
        }
    }

    /// Creates an enum from field names used in JSON.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "OPERATION_UNKNOWN" => Some(OperationState::OperationUnknown),
            "OPERATION_PENDING" => Some(OperationState::OperationPending),
            "OPERATION_FINISHED" => Some(OperationState::OperationFinished),
            "OPERATION_FAILED" => Some(OperationState::OperationFailed),
            _ => None,
        }
    }
}

/// Status of an offer operation.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct OperationStatus {
    #[prost(enumeration = "OperationState", tag = "1")]
    #[serde(default, with = "crate::json::operation_state")]
    pub state: i32,

    #[prost(string, tag = "2")]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Identifies this status update among possibly many updates for the
    /// same operation.
    #[prost(bytes = "vec", tag = "3")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub status_uuid: Vec<u8>,
}

/// An offer operation: a tentative mutation of offered resources.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct OfferOperation {
    /// Framework-assigned operation identifier, used in diagnostics.
    #[prost(string, tag = "1")]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The resources the operation affects.
    #[prost(message, repeated, tag = "2")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    #[prost(bytes = "vec", tag = "3")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub operation_uuid: Vec<u8>,
}

/// Errors raised while inspecting resources and operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// An operation's resources reference more than one resource provider.
    #[error("operation resources reference multiple resource providers: {first} and {second}")]
    HeterogeneousProviders { first: String, second: String },
}

impl OfferOperation {
    /// Derives the resource provider targeted by this operation from its
    /// resource set.
    ///
    /// Returns `Ok(None)` when no resource carries a provider id, and an
    /// error when the resources disagree on the provider.
    pub fn resource_provider_id(&self) -> Result<Option<ResourceProviderId>, ResourceError> {
        let mut found: Option<&ResourceProviderId> = None;
        for resource in &self.resources {
            let Some(provider_id) = resource.provider_id.as_ref() else {
                continue;
            };
            match found {
                None => found = Some(provider_id),
                Some(existing) if existing == provider_id => {}
                Some(existing) => {
                    return Err(ResourceError::HeterogeneousProviders {
                        first: existing.value.clone(),
                        second: provider_id.value.clone(),
                    });
                }
            }
        }
        Ok(found.cloned())
    }
}
