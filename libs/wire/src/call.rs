//! Provider → manager messages.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::resource::{
    FrameworkId, OfferOperation, OperationStatus, Resource, ResourceProviderId,
    ResourceProviderInfo,
};

/// Type discriminator for [`Call`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CallType {
    Unknown = 0,
    Subscribe = 1,
    UpdateOfferOperationStatus = 2,
    UpdateState = 3,
    UpdatePublishResourcesStatus = 4,
}

impl CallType {
    /// String value of the enum field name, as used in JSON.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            CallType::Unknown => "UNKNOWN",
            CallType::Subscribe => "SUBSCRIBE",
            CallType::UpdateOfferOperationStatus => "UPDATE_OFFER_OPERATION_STATUS",
            CallType::UpdateState => "UPDATE_STATE",
            CallType::UpdatePublishResourcesStatus => "UPDATE_PUBLISH_RESOURCES_STATUS",
        }
    }

    /// Creates an enum from field names used in JSON.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNKNOWN" => Some(CallType::Unknown),
            "SUBSCRIBE" => Some(CallType::Subscribe),
            "UPDATE_OFFER_OPERATION_STATUS" => Some(CallType::UpdateOfferOperationStatus),
            "UPDATE_STATE" => Some(CallType::UpdateState),
            "UPDATE_PUBLISH_RESOURCES_STATUS" => Some(CallType::UpdatePublishResourcesStatus),
            _ => None,
        }
    }
}

/// Outcome of a publish request, reported back by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PublishStatus {
    PublishUnknown = 0,
    Ok = 1,
    Failed = 2,
}

impl PublishStatus {
    /// String value of the enum field name, as used in JSON.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PublishStatus::PublishUnknown => "UNKNOWN",
            PublishStatus::Ok => "OK",
            PublishStatus::Failed => "FAILED",
        }
    }

    /// Creates an enum from field names used in JSON.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNKNOWN" => Some(PublishStatus::PublishUnknown),
            "OK" => Some(PublishStatus::Ok),
            "FAILED" => Some(PublishStatus::Failed),
            _ => None,
        }
    }
}

/// A message from a resource provider to the manager.
///
/// Exactly one payload field matching `type` is expected to be set; the
/// manager's protocol validation enforces this. All calls except
/// `SUBSCRIBE` must carry `resource_provider_id`.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Call {
    #[prost(enumeration = "CallType", tag = "1")]
    #[serde(default, with = "crate::json::call_type")]
    pub r#type: i32,

    #[prost(message, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provider_id: Option<ResourceProviderId>,

    #[prost(message, optional, tag = "3")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<Subscribe>,

    #[prost(message, optional, tag = "4")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_offer_operation_status: Option<UpdateOfferOperationStatus>,

    #[prost(message, optional, tag = "5")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_state: Option<UpdateState>,

    #[prost(message, optional, tag = "6")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_publish_resources_status: Option<UpdatePublishResourcesStatus>,
}

/// Initial message on a new connection; registers the provider.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Subscribe {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provider_info: Option<ResourceProviderInfo>,
}

/// Reports a status change of an offer operation.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct UpdateOfferOperationStatus {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_id: Option<FrameworkId>,

    #[prost(message, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OperationStatus>,

    #[prost(bytes = "vec", tag = "3")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub operation_uuid: Vec<u8>,

    #[prost(message, optional, tag = "4")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_status: Option<OperationStatus>,
}

/// Reports the provider's full resource and operation state.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct UpdateState {
    #[prost(message, repeated, tag = "1")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    #[prost(bytes = "vec", tag = "2")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub resource_version_uuid: Vec<u8>,

    /// Operations known to the provider that have not reached a terminal
    /// state.
    #[prost(message, repeated, tag = "3")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<OfferOperation>,
}

/// Acknowledges a `PUBLISH_RESOURCES` event.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct UpdatePublishResourcesStatus {
    /// Correlation id from the originating event.
    #[prost(bytes = "vec", tag = "1")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub uuid: Vec<u8>,

    #[prost(enumeration = "PublishStatus", tag = "2")]
    #[serde(default, with = "crate::json::publish_status")]
    pub status: i32,
}
