//! Resource provider API integration tests.
//!
//! Drives the manager end to end over real HTTP: subscribe handshakes,
//! stream-id enforcement, event delivery and ordering, publish fan-in,
//! and eviction on disconnect.

use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tokio_util::codec::Decoder as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use provd_manager::{
    api,
    manager::{ManagerError, ResourceProviderManager},
    messages::{
        ApplyOfferOperationMessage, ReconcileOfferOperationsMessage, ReconcileOperation,
        ResourceProviderMessage, ResourceVersionUuid,
    },
};
use provd_wire::{
    codec, ContentType, Event, EventType, FrameworkId, OfferOperation, RecordIoCodec, Resource,
    ResourceProviderId,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Test harness: the manager served on an ephemeral port.
struct TestHarness {
    base_url: String,
    client: reqwest::Client,
    manager: ResourceProviderManager,
    messages: UnboundedReceiver<ResourceProviderMessage>,
}

impl TestHarness {
    async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,provd_manager=debug".into()),
            )
            .with_test_writer()
            .try_init();

        let (manager, messages) = ResourceProviderManager::new();
        let app = api::create_router(manager.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            manager,
            messages,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/v1/resource_provider", self.base_url)
    }

    /// Subscribe as a new provider over JSON. Returns the stream id, the
    /// assigned provider id, and a reader over the event stream (already
    /// past the SUBSCRIBED event).
    async fn subscribe(&self, provider_id: Option<&str>) -> (String, String, EventReader) {
        let mut info = serde_json::json!({"type": "org.test", "name": "storage"});
        if let Some(id) = provider_id {
            info["id"] = serde_json::json!({"value": id});
        }

        let resp = self
            .client
            .post(self.endpoint())
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "type": "SUBSCRIBE",
                "subscribe": {"resource_provider_info": info}
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );

        let stream_id = resp
            .headers()
            .get("Mesos-Stream-Id")
            .expect("missing Mesos-Stream-Id header")
            .to_str()
            .unwrap()
            .to_string();

        let mut reader = EventReader::new(resp, ContentType::Json);
        let subscribed = reader.next_event().await.expect("missing SUBSCRIBED event");
        assert_eq!(subscribed.r#type(), EventType::Subscribed);

        let assigned = subscribed
            .subscribed
            .unwrap()
            .provider_id
            .expect("missing provider id")
            .value;

        (stream_id, assigned, reader)
    }

    async fn next_message(&mut self) -> ResourceProviderMessage {
        timeout(RECV_TIMEOUT, self.messages.recv())
            .await
            .expect("timed out waiting for outbound message")
            .expect("outbound queue closed")
    }
}

/// Incremental RecordIO reader over a streaming response body.
struct EventReader {
    stream: futures_util::stream::BoxStream<'static, reqwest::Result<bytes::Bytes>>,
    buffer: BytesMut,
    codec: RecordIoCodec,
    content_type: ContentType,
}

impl EventReader {
    fn new(resp: reqwest::Response, content_type: ContentType) -> Self {
        Self {
            stream: resp.bytes_stream().boxed(),
            buffer: BytesMut::new(),
            codec: RecordIoCodec::new(),
            content_type,
        }
    }

    /// Reads the next event, or `None` on end of stream.
    async fn next_event(&mut self) -> Option<Event> {
        loop {
            if let Some(record) = self.codec.decode(&mut self.buffer).unwrap() {
                return Some(codec::decode_event(self.content_type, &record).unwrap());
            }

            match timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for event")
            {
                Some(chunk) => self.buffer.extend_from_slice(&chunk.unwrap()),
                None => return None,
            }
        }
    }

    /// Asserts no event arrives within a short grace period.
    async fn expect_silence(&mut self) {
        let result = timeout(Duration::from_millis(300), async {
            loop {
                if self.codec.decode(&mut self.buffer).unwrap().is_some() {
                    return;
                }
                match self.stream.next().await {
                    Some(chunk) => self.buffer.extend_from_slice(&chunk.unwrap()),
                    None => std::future::pending::<()>().await,
                }
            }
        })
        .await;
        assert!(result.is_err(), "expected no event, but one arrived");
    }
}

fn provider_resource(provider_id: &str, name: &str, value: f64) -> Resource {
    Resource {
        provider_id: Some(ResourceProviderId::new(provider_id)),
        name: name.to_string(),
        value,
    }
}

fn apply_message(provider_id: &str, operation_uuid: [u8; 16]) -> ApplyOfferOperationMessage {
    ApplyOfferOperationMessage {
        framework_id: FrameworkId {
            value: "framework-1".to_string(),
        },
        operation_info: OfferOperation {
            id: "reserve".to_string(),
            resources: vec![provider_resource(provider_id, "cpus", 2.0)],
            operation_uuid: operation_uuid.to_vec(),
        },
        operation_uuid: operation_uuid.to_vec(),
        resource_version_uuid: ResourceVersionUuid {
            provider_id: ResourceProviderId::new(provider_id),
            uuid: vec![9; 16],
        },
    }
}

// =============================================================================
// Subscribe handshake
// =============================================================================

#[tokio::test]
async fn subscribe_assigns_provider_id() {
    let harness = TestHarness::new().await;

    let (stream_id, provider_id, _reader) = harness.subscribe(None).await;

    assert!(uuid::Uuid::parse_str(&stream_id).is_ok());
    assert!(uuid::Uuid::parse_str(&provider_id).is_ok());
}

#[tokio::test]
async fn subscribe_rejects_preassigned_stream_id() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", uuid::Uuid::new_v4().to_string())
        .json(&serde_json::json!({
            "type": "SUBSCRIBE",
            "subscribe": {
                "resource_provider_info": {"type": "org.test", "name": "n"}
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Mesos-Stream-Id"));
}

#[tokio::test]
async fn subscribe_over_protobuf() {
    let harness = TestHarness::new().await;

    let call = provd_wire::Call {
        r#type: provd_wire::CallType::Subscribe as i32,
        subscribe: Some(provd_wire::call::Subscribe {
            resource_provider_info: Some(provd_wire::ResourceProviderInfo {
                id: None,
                r#type: "org.test".to_string(),
                name: "n".to_string(),
            }),
        }),
        ..Default::default()
    };
    let body = codec::encode_call(ContentType::Protobuf, &call).unwrap();

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Content-Type", "application/x-protobuf")
        .header("Accept", "application/x-protobuf")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/x-protobuf"
    );

    let mut reader = EventReader::new(resp, ContentType::Protobuf);
    let event = reader.next_event().await.unwrap();
    assert_eq!(event.r#type(), EventType::Subscribed);
    assert!(event.subscribed.unwrap().provider_id.is_some());
}

#[tokio::test]
async fn subscribe_with_unacceptable_accept_is_rejected() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Accept", "text/html")
        .json(&serde_json::json!({
            "type": "SUBSCRIBE",
            "subscribe": {
                "resource_provider_info": {"type": "org.test", "name": "n"}
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 406);
}

// =============================================================================
// Request framing and negotiation errors
// =============================================================================

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let harness = TestHarness::new().await;

    let resp = harness.client.get(harness.endpoint()).send().await.unwrap();

    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers().get("Allow").unwrap(), "POST");
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Content-Type"));
}

#[tokio::test]
async fn unsupported_media_type_lists_supported_types() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Content-Type", "text/plain")
        .body("hello")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 415);
    let body = resp.text().await.unwrap();
    assert!(body.contains("application/json"));
    assert!(body.contains("application/x-protobuf"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn invalid_call_is_rejected() {
    let harness = TestHarness::new().await;

    // Subscribe without provider info.
    let resp = harness
        .client
        .post(harness.endpoint())
        .json(&serde_json::json!({"type": "SUBSCRIBE"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

// =============================================================================
// Stream-id enforcement
// =============================================================================

#[tokio::test]
async fn stream_id_is_enforced_on_non_subscribe_calls() {
    let mut harness = TestHarness::new().await;
    let (stream_id, provider_id, _reader) = harness.subscribe(None).await;

    let update = serde_json::json!({
        "type": "UPDATE_STATE",
        "resource_provider_id": {"value": provider_id},
        "update_state": {
            "resource_version_uuid": BASE64.encode([0u8; 16])
        }
    });

    // Missing header.
    let resp = harness
        .client
        .post(harness.endpoint())
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Mesos-Stream-Id"));

    // Wrong stream id: the diagnostic mentions both ids.
    let bogus = uuid::Uuid::new_v4().to_string();
    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &bogus)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = resp.text().await.unwrap();
    assert!(body.contains(&bogus));
    assert!(body.contains(&stream_id));

    // Correct stream id: accepted, and the state snapshot reaches the
    // outbound queue.
    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_id)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    match harness.next_message().await {
        ResourceProviderMessage::UpdateState(state) => {
            assert_eq!(state.info.id.unwrap().value, provider_id);
            assert!(state.resources.is_empty());
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn calls_for_unsubscribed_providers_are_rejected() {
    let harness = TestHarness::new().await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", uuid::Uuid::new_v4().to_string())
        .json(&serde_json::json!({
            "type": "UPDATE_STATE",
            "resource_provider_id": {"value": "ghost"},
            "update_state": {
                "resource_version_uuid": BASE64.encode([0u8; 16])
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("not subscribed"));
}

#[tokio::test]
async fn unknown_call_type_is_not_implemented() {
    let harness = TestHarness::new().await;
    let (stream_id, provider_id, _reader) = harness.subscribe(None).await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_id)
        .json(&serde_json::json!({
            "type": "UNKNOWN",
            "resource_provider_id": {"value": provider_id}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 501);
}

// =============================================================================
// Publish fan-out / fan-in
// =============================================================================

#[tokio::test]
async fn publish_resolves_after_ok_status() {
    let harness = TestHarness::new().await;
    let (stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    let manager = harness.manager.clone();
    let resources = vec![provider_resource(&provider_id, "cpus", 4.0)];
    let publish = tokio::spawn(async move { manager.publish_resources(resources).await });

    let event = reader.next_event().await.unwrap();
    assert_eq!(event.r#type(), EventType::PublishResources);
    let body = event.publish_resources.unwrap();
    assert_eq!(body.resources.len(), 1);
    assert_eq!(body.resources[0].name, "cpus");

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_id)
        .json(&serde_json::json!({
            "type": "UPDATE_PUBLISH_RESOURCES_STATUS",
            "resource_provider_id": {"value": provider_id},
            "update_publish_resources_status": {
                "uuid": BASE64.encode(&body.uuid),
                "status": "OK"
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    timeout(RECV_TIMEOUT, publish)
        .await
        .expect("publish did not resolve")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn publish_fails_after_failed_status() {
    let harness = TestHarness::new().await;
    let (stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    let manager = harness.manager.clone();
    let resources = vec![provider_resource(&provider_id, "disk", 100.0)];
    let publish = tokio::spawn(async move { manager.publish_resources(resources).await });

    let event = reader.next_event().await.unwrap();
    let body = event.publish_resources.unwrap();

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_id)
        .json(&serde_json::json!({
            "type": "UPDATE_PUBLISH_RESOURCES_STATUS",
            "resource_provider_id": {"value": provider_id},
            "update_publish_resources_status": {
                "uuid": BASE64.encode(&body.uuid),
                "status": "FAILED"
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    let err = timeout(RECV_TIMEOUT, publish)
        .await
        .expect("publish did not resolve")
        .unwrap()
        .unwrap_err();
    assert!(err.to_string().contains("FAILED"));
}

#[tokio::test]
async fn publish_fans_in_across_providers() {
    let harness = TestHarness::new().await;
    let (stream_one, provider_one, mut reader_one) = harness.subscribe(None).await;
    let (stream_two, provider_two, mut reader_two) = harness.subscribe(None).await;

    let manager = harness.manager.clone();
    let resources = vec![
        provider_resource(&provider_one, "cpus", 4.0),
        provider_resource(&provider_two, "mem", 1024.0),
        provider_resource(&provider_one, "disk", 10.0),
    ];
    let mut publish = tokio::spawn(async move { manager.publish_resources(resources).await });

    // Exactly one event per provider, with distinct correlation uuids and
    // that provider's resource group.
    let event_one = reader_one.next_event().await.unwrap().publish_resources.unwrap();
    let event_two = reader_two.next_event().await.unwrap().publish_resources.unwrap();
    assert_ne!(event_one.uuid, event_two.uuid);
    assert_eq!(event_one.resources.len(), 2);
    assert_eq!(event_two.resources.len(), 1);

    let ok_status = |provider_id: &str, uuid: &[u8]| {
        serde_json::json!({
            "type": "UPDATE_PUBLISH_RESOURCES_STATUS",
            "resource_provider_id": {"value": provider_id},
            "update_publish_resources_status": {
                "uuid": BASE64.encode(uuid),
                "status": "OK"
            }
        })
    };

    // One acknowledgement is not enough.
    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_one)
        .json(&ok_status(&provider_one, &event_one.uuid))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!publish.is_finished(), "publish resolved with one ack missing");

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_two)
        .json(&ok_status(&provider_two, &event_two.uuid))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    timeout(RECV_TIMEOUT, &mut publish)
        .await
        .expect("publish did not resolve")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn publish_fails_fast_for_unsubscribed_provider() {
    let harness = TestHarness::new().await;

    let err = harness
        .manager
        .publish_resources(vec![provider_resource("ghost", "cpus", 1.0)])
        .await
        .unwrap_err();

    assert!(matches!(err, ManagerError::NotSubscribed { .. }));
}

// =============================================================================
// Disconnect and eviction
// =============================================================================

#[tokio::test]
async fn disconnect_fails_pending_publishes() {
    let harness = TestHarness::new().await;
    let (_stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    let manager = harness.manager.clone();
    let resources = vec![provider_resource(&provider_id, "cpus", 4.0)];
    let publish = tokio::spawn(async move { manager.publish_resources(resources).await });

    let event = reader.next_event().await.unwrap();
    let uuid = event.publish_resources.unwrap().uuid;

    // Peer disconnect: drop the event stream mid-publish.
    drop(reader);

    let err = timeout(RECV_TIMEOUT, publish)
        .await
        .expect("publish did not resolve")
        .unwrap()
        .unwrap_err();
    assert!(err.to_string().contains("connection closed"));

    // The provider is gone, so a late status update bounces.
    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", uuid::Uuid::new_v4().to_string())
        .json(&serde_json::json!({
            "type": "UPDATE_PUBLISH_RESOURCES_STATUS",
            "resource_provider_id": {"value": provider_id},
            "update_publish_resources_status": {
                "uuid": BASE64.encode(&uuid),
                "status": "OK"
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("not subscribed"));
}

#[tokio::test]
async fn resubscribe_replaces_the_old_connection() {
    let harness = TestHarness::new().await;
    let (old_stream_id, provider_id, mut old_reader) = harness.subscribe(None).await;

    let manager = harness.manager.clone();
    let resources = vec![provider_resource(&provider_id, "cpus", 4.0)];
    let publish = tokio::spawn(async move { manager.publish_resources(resources).await });
    let _ = old_reader.next_event().await.unwrap();

    // Resubscribe under the same id.
    let (new_stream_id, new_provider_id, _new_reader) =
        harness.subscribe(Some(&provider_id)).await;
    assert_eq!(new_provider_id, provider_id);
    assert_ne!(new_stream_id, old_stream_id);

    // The old stream ends and its pending publish fails.
    assert!(old_reader.next_event().await.is_none());
    let err = timeout(RECV_TIMEOUT, publish)
        .await
        .expect("publish did not resolve")
        .unwrap()
        .unwrap_err();
    assert!(err.to_string().contains("connection closed"));

    // Only the new stream id is accepted now.
    let update = serde_json::json!({
        "type": "UPDATE_STATE",
        "resource_provider_id": {"value": provider_id},
        "update_state": {
            "resource_version_uuid": BASE64.encode([0u8; 16])
        }
    });

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &old_stream_id)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &new_stream_id)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);
}

// =============================================================================
// Event dispatch
// =============================================================================

#[tokio::test]
async fn apply_offer_operations_arrive_in_order() {
    let harness = TestHarness::new().await;
    let (_stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    harness
        .manager
        .apply_offer_operation(apply_message(&provider_id, [1; 16]));
    harness
        .manager
        .apply_offer_operation(apply_message(&provider_id, [2; 16]));

    let first = reader.next_event().await.unwrap();
    assert_eq!(first.r#type(), EventType::ApplyOfferOperation);
    let first = first.apply_offer_operation.unwrap();
    assert_eq!(first.operation_uuid, vec![1; 16]);
    assert_eq!(first.resource_version_uuid, vec![9; 16]);
    assert_eq!(first.framework_id.unwrap().value, "framework-1");

    let second = reader.next_event().await.unwrap();
    assert_eq!(
        second.apply_offer_operation.unwrap().operation_uuid,
        vec![2; 16]
    );
}

#[tokio::test]
async fn acknowledgement_is_forwarded() {
    let harness = TestHarness::new().await;
    let (_stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    harness.manager.acknowledge_offer_operation_update(
        provd_manager::messages::OfferOperationUpdateAcknowledgementMessage {
            resource_provider_id: ResourceProviderId::new(&provider_id),
            status_uuid: vec![3; 16],
            operation_uuid: vec![4; 16],
        },
    );

    let event = reader.next_event().await.unwrap();
    assert_eq!(event.r#type(), EventType::AcknowledgeOfferOperation);
    let ack = event.acknowledge_offer_operation.unwrap();
    assert_eq!(ack.status_uuid, vec![3; 16]);
    assert_eq!(ack.operation_uuid, vec![4; 16]);
}

#[tokio::test]
async fn reconcile_groups_by_provider_and_skips_unsubscribed() {
    let harness = TestHarness::new().await;
    let (_stream_id, provider_id, mut reader) = harness.subscribe(None).await;

    harness
        .manager
        .reconcile_offer_operations(ReconcileOfferOperationsMessage {
            operations: vec![
                ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new(&provider_id)),
                    operation_uuid: vec![1; 16],
                },
                ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new(&provider_id)),
                    operation_uuid: vec![2; 16],
                },
                ReconcileOperation {
                    resource_provider_id: Some(ResourceProviderId::new("unsubscribed")),
                    operation_uuid: vec![3; 16],
                },
            ],
        });

    let event = reader.next_event().await.unwrap();
    assert_eq!(event.r#type(), EventType::ReconcileOfferOperations);
    assert_eq!(
        event.reconcile_offer_operations.unwrap().operation_uuids,
        vec![vec![1; 16], vec![2; 16]]
    );

    // Exactly one event: nothing else follows for the skipped operation.
    reader.expect_silence().await;
}

#[tokio::test]
async fn update_offer_operation_status_reaches_the_queue() {
    let mut harness = TestHarness::new().await;
    let (stream_id, provider_id, _reader) = harness.subscribe(None).await;

    let resp = harness
        .client
        .post(harness.endpoint())
        .header("Mesos-Stream-Id", &stream_id)
        .json(&serde_json::json!({
            "type": "UPDATE_OFFER_OPERATION_STATUS",
            "resource_provider_id": {"value": provider_id},
            "update_offer_operation_status": {
                "framework_id": {"value": "framework-1"},
                "status": {"state": "OPERATION_FINISHED"},
                "operation_uuid": BASE64.encode([7u8; 16])
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    match harness.next_message().await {
        ResourceProviderMessage::UpdateOfferOperationStatus(update) => {
            assert_eq!(update.framework_id.unwrap().value, "framework-1");
            assert_eq!(update.operation_uuid, vec![7; 16]);
            assert_eq!(
                update.status.state(),
                provd_wire::OperationState::OperationFinished
            );
            assert!(update.latest_status.is_none());
        }
        other => panic!("unexpected message: {other:?}"),
    }
}
