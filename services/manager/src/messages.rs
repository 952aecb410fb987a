//! Messages crossing the manager boundary on the agent side.
//!
//! Inbound messages carry work from the agent to the manager
//! (`apply`, `acknowledge`, `reconcile`); [`ResourceProviderMessage`]
//! values flow the other way, from the manager onto the outbound queue
//! the agent drains.

use std::collections::HashMap;

use uuid::Uuid;

use provd_wire::{
    FrameworkId, OfferOperation, OperationStatus, Resource, ResourceProviderId,
    ResourceProviderInfo,
};

/// A resource version qualified by the provider that owns it.
#[derive(Debug, Clone)]
pub struct ResourceVersionUuid {
    pub provider_id: ResourceProviderId,
    pub uuid: Vec<u8>,
}

/// Asks the manager to forward an offer operation to its provider.
#[derive(Debug, Clone)]
pub struct ApplyOfferOperationMessage {
    pub framework_id: FrameworkId,
    pub operation_info: OfferOperation,
    pub operation_uuid: Vec<u8>,
    pub resource_version_uuid: ResourceVersionUuid,
}

/// Asks the manager to acknowledge an operation status update.
#[derive(Debug, Clone)]
pub struct OfferOperationUpdateAcknowledgementMessage {
    pub resource_provider_id: ResourceProviderId,
    pub status_uuid: Vec<u8>,
    pub operation_uuid: Vec<u8>,
}

/// Asks the manager to reconcile a set of offer operations.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOfferOperationsMessage {
    pub operations: Vec<ReconcileOperation>,
}

/// One operation to reconcile.
#[derive(Debug, Clone)]
pub struct ReconcileOperation {
    /// Unset when the operation's provider is unknown; such operations
    /// are not the manager's concern.
    pub resource_provider_id: Option<ResourceProviderId>,
    pub operation_uuid: Vec<u8>,
}

/// A lifecycle message published on the manager's outbound queue.
#[derive(Debug)]
pub enum ResourceProviderMessage {
    UpdateOfferOperationStatus(OfferOperationStatusUpdate),
    UpdateState(ResourceProviderState),
}

/// An operation status update relayed from a provider.
#[derive(Debug)]
pub struct OfferOperationStatusUpdate {
    pub framework_id: Option<FrameworkId>,
    pub status: OperationStatus,
    pub operation_uuid: Vec<u8>,
    pub latest_status: Option<OperationStatus>,
}

/// A provider's full state snapshot relayed from an `UPDATE_STATE` call.
#[derive(Debug)]
pub struct ResourceProviderState {
    pub info: ResourceProviderInfo,
    pub resource_version: Uuid,
    pub resources: Vec<Resource>,
    /// Pending operations indexed by operation uuid.
    pub operations: HashMap<Uuid, OfferOperation>,
}
