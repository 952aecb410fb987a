//! The resource provider manager.
//!
//! A single actor task owns every piece of mutable state: the
//! subscription table, each provider's pending-publish table, and the
//! outbound message queue's sender. All operations (HTTP dispatch,
//! agent-side requests, connection-closed notifications) arrive as
//! commands on one channel and are handled one at a time, so no handler
//! ever observes another handler's partial effects.

use std::collections::HashMap;

use futures_util::future::try_join_all;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};
use uuid::Uuid;

use provd_wire::{
    call, Call, CallType, ContentType, Event, PublishStatus, Resource, ResourceProviderId,
    ResourceProviderInfo,
};

use crate::connection::{HttpConnection, PipeReader};
use crate::messages::{
    ApplyOfferOperationMessage, OfferOperationStatusUpdate,
    OfferOperationUpdateAcknowledgementMessage, ReconcileOfferOperationsMessage,
    ResourceProviderMessage, ResourceProviderState,
};

/// Errors surfaced to callers of the manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("resource provider {provider_id} is not subscribed")]
    NotSubscribed { provider_id: String },

    #[error("all non-subscribe calls should include the 'Mesos-Stream-Id' header")]
    MissingStreamId,

    #[error(
        "the stream ID '{given}' included in this request didn't match the stream ID \
         '{expected}' currently associated with resource provider {provider_id}"
    )]
    StreamIdMismatch {
        given: String,
        expected: String,
        provider_id: String,
    },

    #[error("call type is not implemented")]
    NotImplemented,

    #[error("failed to send PUBLISH_RESOURCES event to resource provider {provider_id}: connection closed")]
    SendFailed { provider_id: String },

    #[error("{0}")]
    PublishFailed(String),

    #[error("resource provider manager terminated")]
    Terminated,
}

/// Result of a successful subscribe: the stream id assigned to the
/// connection and the reader half of its event pipe.
pub struct SubscribeReply {
    pub stream_id: Uuid,
    pub events: PipeReader,
}

type PublishReceipt = oneshot::Receiver<Result<(), String>>;

enum Command {
    Subscribe {
        subscribe: call::Subscribe,
        content_type: ContentType,
        reply: oneshot::Sender<SubscribeReply>,
    },
    ProviderCall {
        call: Call,
        stream_id: Option<String>,
        reply: oneshot::Sender<Result<(), ManagerError>>,
    },
    ApplyOfferOperation(ApplyOfferOperationMessage),
    AcknowledgeOfferOperationUpdate(OfferOperationUpdateAcknowledgementMessage),
    ReconcileOfferOperations(ReconcileOfferOperationsMessage),
    PublishResources {
        resources: Vec<Resource>,
        reply: oneshot::Sender<Result<Vec<PublishReceipt>, ManagerError>>,
    },
    ConnectionClosed {
        provider_id: ResourceProviderId,
        stream_id: Uuid,
    },
}

/// Handle to the manager actor.
///
/// Cheap to clone; all clones talk to the same actor. Constructing a
/// manager spawns its actor task, so this must happen inside a tokio
/// runtime.
#[derive(Clone)]
pub struct ResourceProviderManager {
    commands: mpsc::UnboundedSender<Command>,
}

impl ResourceProviderManager {
    /// Creates the manager and returns the outbound message queue's
    /// receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ResourceProviderMessage>) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (messages, message_rx) = mpsc::unbounded_channel();

        let actor = ManagerActor {
            subscribed: HashMap::new(),
            messages,
            commands: commands.downgrade(),
        };
        tokio::spawn(actor.run(command_rx));

        (Self { commands }, message_rx)
    }

    /// Registers a new provider connection.
    ///
    /// Mints a stream id, builds the event pipe, sends the `SUBSCRIBED`
    /// event, and installs the provider in the subscription table. A
    /// provider resubscribing under an existing id replaces the previous
    /// entry.
    pub async fn subscribe(
        &self,
        subscribe: call::Subscribe,
        content_type: ContentType,
    ) -> Result<SubscribeReply, ManagerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Subscribe {
                subscribe,
                content_type,
                reply,
            })
            .map_err(|_| ManagerError::Terminated)?;
        response.await.map_err(|_| ManagerError::Terminated)
    }

    /// Dispatches a validated non-subscribe call from a provider.
    ///
    /// `stream_id` is the raw `Mesos-Stream-Id` header, if any; it must
    /// match the stream id minted for the provider's current connection.
    pub async fn provider_call(
        &self,
        call: Call,
        stream_id: Option<String>,
    ) -> Result<(), ManagerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::ProviderCall {
                call,
                stream_id,
                reply,
            })
            .map_err(|_| ManagerError::Terminated)?;
        response.await.map_err(|_| ManagerError::Terminated)?
    }

    /// Forwards an offer operation to the provider that owns its
    /// resources. Undeliverable operations are logged and dropped.
    pub fn apply_offer_operation(&self, message: ApplyOfferOperationMessage) {
        let _ = self.commands.send(Command::ApplyOfferOperation(message));
    }

    /// Acknowledges an operation status update towards its provider.
    pub fn acknowledge_offer_operation_update(
        &self,
        message: OfferOperationUpdateAcknowledgementMessage,
    ) {
        let _ = self
            .commands
            .send(Command::AcknowledgeOfferOperationUpdate(message));
    }

    /// Asks providers to report the state of the given operations, one
    /// event per provider.
    pub fn reconcile_offer_operations(&self, message: ReconcileOfferOperationsMessage) {
        let _ = self
            .commands
            .send(Command::ReconcileOfferOperations(message));
    }

    /// Publishes resources to their providers.
    ///
    /// Resolves once every targeted provider acknowledges with an `OK`
    /// status; fails on the first provider that reports failure or
    /// disconnects, or immediately if any targeted provider is not
    /// subscribed.
    pub async fn publish_resources(&self, resources: Vec<Resource>) -> Result<(), ManagerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::PublishResources { resources, reply })
            .map_err(|_| ManagerError::Terminated)?;
        let pending = response.await.map_err(|_| ManagerError::Terminated)??;

        try_join_all(pending.into_iter().map(|receipt| async move {
            match receipt.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(reason)) => Err(ManagerError::PublishFailed(reason)),
                Err(_) => Err(ManagerError::PublishFailed("connection closed".to_string())),
            }
        }))
        .await?;
        Ok(())
    }
}

/// Per-subscribed-provider state.
struct ResourceProvider {
    info: ResourceProviderInfo,
    http: HttpConnection,
    publishes: HashMap<Uuid, oneshot::Sender<Result<(), String>>>,
}

impl Drop for ResourceProvider {
    fn drop(&mut self) {
        let provider_id = self.info.id.clone().unwrap_or_default();
        info!(provider_id = %provider_id, "Terminating resource provider");

        self.http.close();

        for (_, publish) in self.publishes.drain() {
            let _ = publish.send(Err(format!(
                "Failed to publish resources from resource provider {provider_id}: \
                 connection closed"
            )));
        }
    }
}

struct ManagerActor {
    subscribed: HashMap<ResourceProviderId, ResourceProvider>,
    messages: mpsc::UnboundedSender<ResourceProviderMessage>,
    /// Weak handle for connection-closed watchers; weak so the actor task
    /// can end once every strong handle is gone.
    commands: mpsc::WeakUnboundedSender<Command>,
}

impl ManagerActor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            match command {
                Command::Subscribe {
                    subscribe,
                    content_type,
                    reply,
                } => {
                    let _ = reply.send(self.subscribe(subscribe, content_type));
                }
                Command::ProviderCall {
                    call,
                    stream_id,
                    reply,
                } => {
                    let _ = reply.send(self.provider_call(call, stream_id));
                }
                Command::ApplyOfferOperation(message) => self.apply_offer_operation(message),
                Command::AcknowledgeOfferOperationUpdate(message) => {
                    self.acknowledge_offer_operation_update(message)
                }
                Command::ReconcileOfferOperations(message) => {
                    self.reconcile_offer_operations(message)
                }
                Command::PublishResources { resources, reply } => {
                    let _ = reply.send(self.publish_resources(resources));
                }
                Command::ConnectionClosed {
                    provider_id,
                    stream_id,
                } => self.connection_closed(provider_id, stream_id),
            }
        }
    }

    fn subscribe(
        &mut self,
        subscribe: call::Subscribe,
        content_type: ContentType,
    ) -> SubscribeReply {
        let stream_id = Uuid::new_v4();
        let (http, events) = HttpConnection::open(content_type, stream_id);

        let mut info = subscribe.resource_provider_info.unwrap_or_default();
        let provider_id = match info.id.clone() {
            Some(id) => id,
            None => {
                let id = new_resource_provider_id();
                info.id = Some(id.clone());
                id
            }
        };

        info!(
            provider_id = %provider_id,
            provider_type = %info.r#type,
            name = %info.name,
            "Subscribing resource provider"
        );

        let mut provider = ResourceProvider {
            info,
            http,
            publishes: HashMap::new(),
        };

        let event = Event::subscribed(provider_id.clone());
        if !provider.http.send(&event) {
            warn!(
                provider_id = %provider_id,
                "Failed to send SUBSCRIBED event to resource provider: connection closed"
            );
            return SubscribeReply { stream_id, events };
        }

        let closed = provider.http.closed();
        let commands = self.commands.clone();
        let watched_id = provider_id.clone();
        tokio::spawn(async move {
            closed.await;
            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(Command::ConnectionClosed {
                    provider_id: watched_id,
                    stream_id,
                });
            }
        });

        // A resubscribe replaces the previous entry; dropping it closes
        // the old writer and fails its pending publishes.
        self.subscribed.insert(provider_id, provider);

        SubscribeReply { stream_id, events }
    }

    /// Evicts the provider, unless a resubscribe already replaced its
    /// entry with a newer connection.
    fn connection_closed(&mut self, provider_id: ResourceProviderId, stream_id: Uuid) {
        let matches = self
            .subscribed
            .get(&provider_id)
            .is_some_and(|provider| provider.http.stream_id == stream_id);
        if matches {
            self.subscribed.remove(&provider_id);
        }
    }

    fn provider_call(
        &mut self,
        call: Call,
        stream_id: Option<String>,
    ) -> Result<(), ManagerError> {
        let Some(provider_id) = call.resource_provider_id.clone() else {
            // Validation guarantees the id is present on non-subscribe calls.
            return Err(ManagerError::NotSubscribed {
                provider_id: String::new(),
            });
        };

        let Some(provider) = self.subscribed.get(&provider_id) else {
            return Err(ManagerError::NotSubscribed {
                provider_id: provider_id.value,
            });
        };

        let stream_id = stream_id.ok_or(ManagerError::MissingStreamId)?;
        let expected = provider.http.stream_id.to_string();
        if stream_id != expected {
            return Err(ManagerError::StreamIdMismatch {
                given: stream_id,
                expected,
                provider_id: provider_id.value,
            });
        }

        match call.r#type() {
            CallType::Unknown => Err(ManagerError::NotImplemented),
            CallType::Subscribe => unreachable!("SUBSCRIBE calls are handled before dispatch"),
            CallType::UpdateOfferOperationStatus => {
                if let Some(update) = call.update_offer_operation_status {
                    self.update_offer_operation_status(update);
                }
                Ok(())
            }
            CallType::UpdateState => {
                if let Some(update) = call.update_state {
                    self.update_state(&provider_id, update);
                }
                Ok(())
            }
            CallType::UpdatePublishResourcesStatus => {
                if let Some(update) = call.update_publish_resources_status {
                    self.update_publish_resources_status(&provider_id, update);
                }
                Ok(())
            }
        }
    }

    fn apply_offer_operation(&mut self, message: ApplyOfferOperationMessage) {
        let operation = message.operation_info;
        let framework_id = message.framework_id;

        let operation_uuid = match Uuid::from_slice(&message.operation_uuid) {
            Ok(uuid) => uuid,
            Err(err) => {
                error!(
                    operation = %operation.id,
                    framework_id = %framework_id,
                    error = %err,
                    "Failed to parse offer operation UUID"
                );
                return;
            }
        };

        let provider_id = match operation.resource_provider_id() {
            Ok(Some(id)) => id,
            Ok(None) => {
                error!(
                    operation = %operation.id,
                    operation_uuid = %operation_uuid,
                    framework_id = %framework_id,
                    "Failed to get the resource provider ID of operation: not found"
                );
                return;
            }
            Err(err) => {
                error!(
                    operation = %operation.id,
                    operation_uuid = %operation_uuid,
                    framework_id = %framework_id,
                    error = %err,
                    "Failed to get the resource provider ID of operation"
                );
                return;
            }
        };

        let Some(provider) = self.subscribed.get_mut(&provider_id) else {
            warn!(
                operation = %operation.id,
                operation_uuid = %operation_uuid,
                framework_id = %framework_id,
                provider_id = %provider_id,
                "Dropping operation because resource provider is not subscribed"
            );
            return;
        };

        // The agent derives the version uuid from the same resources, so
        // a mismatch is a bug in the caller.
        debug_assert_eq!(message.resource_version_uuid.provider_id, provider_id);
        if message.resource_version_uuid.provider_id != provider_id {
            warn!(
                provider_id = %provider_id,
                version_provider_id = %message.resource_version_uuid.provider_id,
                "Dropping operation whose resource version UUID names a different provider"
            );
            return;
        }

        let event = Event::apply_offer_operation(
            framework_id.clone(),
            operation.clone(),
            message.operation_uuid,
            message.resource_version_uuid.uuid,
        );
        if !provider.http.send(&event) {
            warn!(
                operation = %operation.id,
                operation_uuid = %operation_uuid,
                framework_id = %framework_id,
                provider_id = %provider_id,
                "Failed to send operation to resource provider: connection closed"
            );
        }
    }

    fn acknowledge_offer_operation_update(
        &mut self,
        message: OfferOperationUpdateAcknowledgementMessage,
    ) {
        let Some(provider) = self.subscribed.get_mut(&message.resource_provider_id) else {
            warn!(
                provider_id = %message.resource_provider_id,
                "Dropping offer operation update acknowledgement because resource provider \
                 is not subscribed"
            );
            return;
        };

        let event =
            Event::acknowledge_offer_operation(message.status_uuid, message.operation_uuid);
        if !provider.http.send(&event) {
            warn!(
                provider_id = %message.resource_provider_id,
                "Failed to send offer operation update acknowledgement: connection closed"
            );
        }
    }

    fn reconcile_offer_operations(&mut self, message: ReconcileOfferOperationsMessage) {
        let mut uuids_by_provider: HashMap<ResourceProviderId, Vec<Vec<u8>>> = HashMap::new();

        for operation in message.operations {
            // Operations without a provider id are not this manager's
            // concern.
            let Some(provider_id) = operation.resource_provider_id else {
                continue;
            };

            if !self.subscribed.contains_key(&provider_id) {
                warn!(
                    provider_id = %provider_id,
                    "Dropping offer operation reconciliation because resource provider \
                     is not subscribed"
                );
                continue;
            }

            uuids_by_provider
                .entry(provider_id)
                .or_default()
                .push(operation.operation_uuid);
        }

        for (provider_id, operation_uuids) in uuids_by_provider {
            let Some(provider) = self.subscribed.get_mut(&provider_id) else {
                continue;
            };

            let event = Event::reconcile_offer_operations(operation_uuids);
            if !provider.http.send(&event) {
                warn!(
                    provider_id = %provider_id,
                    "Failed to send offer operation reconciliation event: connection closed"
                );
            }
        }
    }

    fn publish_resources(
        &mut self,
        resources: Vec<Resource>,
    ) -> Result<Vec<PublishReceipt>, ManagerError> {
        let mut provided: HashMap<ResourceProviderId, Vec<Resource>> = HashMap::new();

        for resource in resources {
            // Agent-default resources need no publish.
            let Some(provider_id) = resource.provider_id.clone() else {
                continue;
            };

            if !self.subscribed.contains_key(&provider_id) {
                return Err(ManagerError::NotSubscribed {
                    provider_id: provider_id.value,
                });
            }

            provided.entry(provider_id).or_default().push(resource);
        }

        let mut pending = Vec::with_capacity(provided.len());
        for (provider_id, resources) in provided {
            let Some(provider) = self.subscribed.get_mut(&provider_id) else {
                continue;
            };

            let uuid = Uuid::new_v4();
            info!(
                provider_id = %provider_id,
                uuid = %uuid,
                resources = resources.len(),
                "Sending PUBLISH_RESOURCES event"
            );

            let event = Event::publish_resources(uuid.as_bytes().to_vec(), resources);
            if !provider.http.send(&event) {
                // Promises installed for earlier groups stay in place;
                // they fail when their providers disconnect.
                return Err(ManagerError::SendFailed {
                    provider_id: provider_id.value,
                });
            }

            let (sender, receiver) = oneshot::channel();
            provider.publishes.insert(uuid, sender);
            pending.push(receiver);
        }

        Ok(pending)
    }

    fn update_offer_operation_status(&mut self, update: call::UpdateOfferOperationStatus) {
        let message = OfferOperationStatusUpdate {
            framework_id: update.framework_id,
            status: update.status.unwrap_or_default(),
            operation_uuid: update.operation_uuid,
            latest_status: update.latest_status,
        };

        let _ = self
            .messages
            .send(ResourceProviderMessage::UpdateOfferOperationStatus(message));
    }

    fn update_state(&mut self, provider_id: &ResourceProviderId, update: call::UpdateState) {
        let Some(provider) = self.subscribed.get(provider_id) else {
            return;
        };

        // Validation pinned these to 16 bytes; a failure here means the
        // call bypassed the front controller.
        let resource_version = match Uuid::from_slice(&update.resource_version_uuid) {
            Ok(version) => version,
            Err(err) => {
                error!(
                    provider_id = %provider_id,
                    error = %err,
                    "Dropping UPDATE_STATE call with malformed resource version UUID"
                );
                return;
            }
        };

        let mut operations = HashMap::new();
        for operation in update.operations {
            match Uuid::from_slice(&operation.operation_uuid) {
                Ok(uuid) => {
                    operations.insert(uuid, operation);
                }
                Err(err) => {
                    error!(
                        provider_id = %provider_id,
                        error = %err,
                        "Dropping UPDATE_STATE call with malformed operation UUID"
                    );
                    return;
                }
            }
        }

        info!(
            provider_id = %provider_id,
            resources = update.resources.len(),
            operations = operations.len(),
            "Received UPDATE_STATE call"
        );

        let _ = self
            .messages
            .send(ResourceProviderMessage::UpdateState(ResourceProviderState {
                info: provider.info.clone(),
                resource_version,
                resources: update.resources,
                operations,
            }));
    }

    fn update_publish_resources_status(
        &mut self,
        provider_id: &ResourceProviderId,
        update: call::UpdatePublishResourcesStatus,
    ) {
        let Some(provider) = self.subscribed.get_mut(provider_id) else {
            return;
        };

        let uuid = match Uuid::from_slice(&update.uuid) {
            Ok(uuid) => uuid,
            Err(err) => {
                error!(
                    provider_id = %provider_id,
                    error = %err,
                    "Invalid UUID in publish resources status"
                );
                return;
            }
        };

        let Some(publish) = provider.publishes.remove(&uuid) else {
            error!(
                provider_id = %provider_id,
                uuid = %uuid,
                "Ignoring publish resources status with unknown UUID"
            );
            return;
        };

        info!(
            provider_id = %provider_id,
            uuid = %uuid,
            status = update.status().as_str_name(),
            "Received publish resources status"
        );

        if update.status() == PublishStatus::Ok {
            let _ = publish.send(Ok(()));
        } else {
            let _ = publish.send(Err(format!(
                "Failed to publish resources for resource provider {provider_id}: \
                 received {} status",
                update.status().as_str_name()
            )));
        }
    }
}

/// Mints a fresh provider id: a random UUID rendered as text.
fn new_resource_provider_id() -> ResourceProviderId {
    ResourceProviderId::new(Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{Bytes, BytesMut};
    use provd_wire::{codec, EventType, RecordIoCodec};
    use tokio_util::codec::Decoder as _;

    fn subscribe_payload(id: Option<&str>) -> call::Subscribe {
        call::Subscribe {
            resource_provider_info: Some(ResourceProviderInfo {
                id: id.map(ResourceProviderId::new),
                r#type: "org.test".to_string(),
                name: "storage".to_string(),
            }),
        }
    }

    fn decode_frame(frame: Bytes) -> Event {
        let mut buf = BytesMut::from(&frame[..]);
        let record = RecordIoCodec::new()
            .decode(&mut buf)
            .unwrap()
            .expect("incomplete record");
        codec::decode_event(ContentType::Json, &record).unwrap()
    }

    async fn next_event(events: &mut PipeReader) -> Event {
        decode_frame(events.recv().await.expect("event stream closed"))
    }

    #[tokio::test]
    async fn subscribe_assigns_provider_id() {
        let (manager, _messages) = ResourceProviderManager::new();

        let mut reply = manager
            .subscribe(subscribe_payload(None), ContentType::Json)
            .await
            .unwrap();

        let event = next_event(&mut reply.events).await;
        assert_eq!(event.r#type(), EventType::Subscribed);

        let provider_id = event.subscribed.unwrap().provider_id.unwrap();
        assert!(Uuid::parse_str(&provider_id.value).is_ok());
    }

    #[tokio::test]
    async fn resubscribe_replaces_previous_connection() {
        let (manager, _messages) = ResourceProviderManager::new();

        let mut first = manager
            .subscribe(subscribe_payload(Some("p1")), ContentType::Json)
            .await
            .unwrap();
        let _ = next_event(&mut first.events).await;

        let mut second = manager
            .subscribe(subscribe_payload(Some("p1")), ContentType::Json)
            .await
            .unwrap();
        let _ = next_event(&mut second.events).await;

        // The old pipe ends once its writer is dropped with the entry.
        assert!(first.events.recv().await.is_none());

        // Only the new stream id is accepted.
        let call = Call {
            r#type: CallType::UpdateState as i32,
            resource_provider_id: Some(ResourceProviderId::new("p1")),
            update_state: Some(call::UpdateState {
                resource_version_uuid: vec![0; 16],
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = manager
            .provider_call(call.clone(), Some(first.stream_id.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::StreamIdMismatch { .. }));

        manager
            .provider_call(call, Some(second.stream_id.to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provider_call_requires_subscription_and_stream_id() {
        let (manager, _messages) = ResourceProviderManager::new();

        let call = Call {
            r#type: CallType::UpdateState as i32,
            resource_provider_id: Some(ResourceProviderId::new("ghost")),
            update_state: Some(call::UpdateState::default()),
            ..Default::default()
        };
        let err = manager.provider_call(call, None).await.unwrap_err();
        assert!(matches!(err, ManagerError::NotSubscribed { .. }));

        let mut reply = manager
            .subscribe(subscribe_payload(Some("p1")), ContentType::Json)
            .await
            .unwrap();
        let _ = next_event(&mut reply.events).await;

        let call = Call {
            r#type: CallType::UpdateState as i32,
            resource_provider_id: Some(ResourceProviderId::new("p1")),
            update_state: Some(call::UpdateState {
                resource_version_uuid: vec![0; 16],
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = manager.provider_call(call, None).await.unwrap_err();
        assert!(matches!(err, ManagerError::MissingStreamId));
    }

    #[tokio::test]
    async fn reconcile_groups_operations_by_provider() {
        let (manager, _messages) = ResourceProviderManager::new();

        let mut reply = manager
            .subscribe(subscribe_payload(Some("p1")), ContentType::Json)
            .await
            .unwrap();
        let _ = next_event(&mut reply.events).await;

        manager.reconcile_offer_operations(ReconcileOfferOperationsMessage {
            operations: vec![
                crate::messages::ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new("p1")),
                    operation_uuid: vec![1; 16],
                },
                crate::messages::ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new("p1")),
                    operation_uuid: vec![2; 16],
                },
                crate::messages::ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new("unsubscribed")),
                    operation_uuid: vec![3; 16],
                },
            ],
        });

        let event = next_event(&mut reply.events).await;
        assert_eq!(event.r#type(), EventType::ReconcileOfferOperations);
        let reconcile = event.reconcile_offer_operations.unwrap();
        assert_eq!(reconcile.operation_uuids, vec![vec![1; 16], vec![2; 16]]);
    }

    #[tokio::test]
    async fn publish_fails_fast_for_unsubscribed_provider() {
        let (manager, _messages) = ResourceProviderManager::new();

        let err = manager
            .publish_resources(vec![Resource {
                provider_id: Some(ResourceProviderId::new("ghost")),
                name: "cpus".to_string(),
                value: 1.0,
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::NotSubscribed { .. }));
    }

    #[tokio::test]
    async fn publish_skips_agent_resources() {
        let (manager, _messages) = ResourceProviderManager::new();

        // No provider resources at all: resolves immediately.
        manager
            .publish_resources(vec![Resource {
                provider_id: None,
                name: "cpus".to_string(),
                value: 1.0,
            }])
            .await
            .unwrap();
    }
}
