//! Manager → provider messages.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::resource::{FrameworkId, OfferOperation, Resource, ResourceProviderId};

/// Type discriminator for [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EventType {
    Unknown = 0,
    Subscribed = 1,
    ApplyOfferOperation = 2,
    AcknowledgeOfferOperation = 3,
    ReconcileOfferOperations = 4,
    PublishResources = 5,
}

impl EventType {
    /// String value of the enum field name, as used in JSON.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            EventType::Unknown => "UNKNOWN",
            EventType::Subscribed => "SUBSCRIBED",
            EventType::ApplyOfferOperation => "APPLY_OFFER_OPERATION",
            EventType::AcknowledgeOfferOperation => "ACKNOWLEDGE_OFFER_OPERATION",
            EventType::ReconcileOfferOperations => "RECONCILE_OFFER_OPERATIONS",
            EventType::PublishResources => "PUBLISH_RESOURCES",
        }
    }

    /// Creates an enum from field names used in JSON.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNKNOWN" => Some(EventType::Unknown),
            "SUBSCRIBED" => Some(EventType::Subscribed),
            "APPLY_OFFER_OPERATION" => Some(EventType::ApplyOfferOperation),
            "ACKNOWLEDGE_OFFER_OPERATION" => Some(EventType::AcknowledgeOfferOperation),
            "RECONCILE_OFFER_OPERATIONS" => Some(EventType::ReconcileOfferOperations),
            "PUBLISH_RESOURCES" => Some(EventType::PublishResources),
            _ => None,
        }
    }
}

/// A message from the manager to a resource provider.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Event {
    #[prost(enumeration = "EventType", tag = "1")]
    #[serde(default, with = "crate::json::event_type")]
    pub r#type: i32,

    #[prost(message, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<Subscribed>,

    #[prost(message, optional, tag = "3")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_offer_operation: Option<ApplyOfferOperation>,

    #[prost(message, optional, tag = "4")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledge_offer_operation: Option<AcknowledgeOfferOperation>,

    #[prost(message, optional, tag = "5")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconcile_offer_operations: Option<ReconcileOfferOperations>,

    #[prost(message, optional, tag = "6")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_resources: Option<PublishResources>,
}

/// Confirms a subscription and communicates the provider's id.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Subscribed {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ResourceProviderId>,
}

/// Instructs the provider to apply an offer operation.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ApplyOfferOperation {
    #[prost(message, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_id: Option<FrameworkId>,

    #[prost(message, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<OfferOperation>,

    #[prost(bytes = "vec", tag = "3")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub operation_uuid: Vec<u8>,

    #[prost(bytes = "vec", tag = "4")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub resource_version_uuid: Vec<u8>,
}

/// Tells the provider an operation status update was received.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct AcknowledgeOfferOperation {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub status_uuid: Vec<u8>,

    #[prost(bytes = "vec", tag = "2")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub operation_uuid: Vec<u8>,
}

/// Asks the provider to report the state of the listed operations.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ReconcileOfferOperations {
    #[prost(bytes = "vec", repeated, tag = "1")]
    #[serde(default, with = "crate::json::base64_bytes_list", skip_serializing_if = "Vec::is_empty")]
    pub operation_uuids: Vec<Vec<u8>>,
}

/// Asks the provider to make a resource set externally reachable.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct PublishResources {
    /// Correlation id the provider must echo in its status update.
    #[prost(bytes = "vec", tag = "1")]
    #[serde(default, with = "crate::json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub uuid: Vec<u8>,

    #[prost(message, repeated, tag = "2")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl Event {
    pub fn subscribed(provider_id: ResourceProviderId) -> Self {
        Event {
            r#type: EventType::Subscribed as i32,
            subscribed: Some(Subscribed {
                provider_id: Some(provider_id),
            }),
            ..Default::default()
        }
    }

    pub fn apply_offer_operation(
        framework_id: FrameworkId,
        info: OfferOperation,
        operation_uuid: Vec<u8>,
        resource_version_uuid: Vec<u8>,
    ) -> Self {
        Event {
            r#type: EventType::ApplyOfferOperation as i32,
            apply_offer_operation: Some(ApplyOfferOperation {
                framework_id: Some(framework_id),
                info: Some(info),
                operation_uuid,
                resource_version_uuid,
            }),
            ..Default::default()
        }
    }

    pub fn acknowledge_offer_operation(status_uuid: Vec<u8>, operation_uuid: Vec<u8>) -> Self {
        Event {
            r#type: EventType::AcknowledgeOfferOperation as i32,
            acknowledge_offer_operation: Some(AcknowledgeOfferOperation {
                status_uuid,
                operation_uuid,
            }),
            ..Default::default()
        }
    }

    pub fn reconcile_offer_operations(operation_uuids: Vec<Vec<u8>>) -> Self {
        Event {
            r#type: EventType::ReconcileOfferOperations as i32,
            reconcile_offer_operations: Some(ReconcileOfferOperations { operation_uuids }),
            ..Default::default()
        }
    }

    pub fn publish_resources(uuid: Vec<u8>, resources: Vec<Resource>) -> Self {
        Event {
            r#type: EventType::PublishResources as i32,
            publish_resources: Some(PublishResources { uuid, resources }),
            ..Default::default()
        }
    }
}
