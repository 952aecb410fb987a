//! Front controller for the resource provider endpoint.
//!
//! Parses one inbound request, negotiates content type, and dispatches
//! into the manager actor. Subscribe calls open a chunked RecordIO
//! stream; everything else is acknowledged with 202 once the actor has
//! handled it.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::unfold;

use provd_wire::{codec, CallType, ContentType};

use crate::api::error::ApiError;
use crate::connection::PipeReader;
use crate::manager::ResourceProviderManager;
use crate::validation;

const STREAM_ID_HEADER: &str = "Mesos-Stream-Id";

pub async fn api(
    State(manager): State<ResourceProviderManager>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Expecting 'Content-Type' to be present"))?;

    let content_type = ContentType::from_header(content_type).ok_or_else(|| {
        ApiError::unsupported_media_type(format!(
            "Expecting 'Content-Type' of {} or {}",
            codec::APPLICATION_JSON,
            codec::APPLICATION_PROTOBUF
        ))
    })?;

    let call = codec::decode_call(content_type, &body)
        .map_err(|err| ApiError::bad_request(format!("Failed to parse body into Call: {err}")))?;

    validation::validate(&call).map_err(|err| {
        ApiError::bad_request(format!("Failed to validate resource provider call: {err}"))
    })?;

    if call.r#type() == CallType::Subscribe {
        if headers.contains_key(STREAM_ID_HEADER) {
            return Err(ApiError::bad_request(format!(
                "Subscribe calls should not include the '{STREAM_ID_HEADER}' header"
            )));
        }

        let accept = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok());
        let accept_type = ContentType::negotiate(accept).ok_or_else(|| {
            ApiError::not_acceptable(format!(
                "Expecting 'Accept' to allow '{}' or '{}'",
                codec::APPLICATION_PROTOBUF,
                codec::APPLICATION_JSON
            ))
        })?;

        // Validation guarantees the payload is present.
        let subscribe = call.subscribe.unwrap_or_default();
        let reply = manager.subscribe(subscribe, accept_type).await?;

        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, accept_type.as_str())
            .header(STREAM_ID_HEADER, reply.stream_id.to_string())
            .body(event_stream_body(reply.events))
            .map_err(|err| ApiError::internal(format!("Failed to build response: {err}")));
    }

    let stream_id = headers
        .get(STREAM_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    manager.provider_call(call, stream_id).await?;

    Ok(StatusCode::ACCEPTED.into_response())
}

/// Wraps the pipe's reader half as a chunked response body.
///
/// The stream ends when the manager closes the writer (provider evicted
/// or replaced); dropping the body in turn is what signals a peer
/// disconnect back to the manager.
fn event_stream_body(events: PipeReader) -> Body {
    let stream = unfold(events, |mut events| async move {
        events
            .recv()
            .await
            .map(|frame| (Ok::<Bytes, Infallible>(frame), events))
    });
    Body::from_stream(stream)
}
