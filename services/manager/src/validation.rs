//! Protocol-level validation of inbound calls.
//!
//! Validation covers well-formedness only: required fields per call type,
//! UUID byte lengths, and agreement between a call's provider id and the
//! provider ids embedded in its payload. Semantic legality of operations
//! is someone else's concern.

use thiserror::Error;

use provd_wire::{call, Call, CallType};

/// Length of a wire UUID in bytes.
const UUID_LEN: usize = 16;

/// Reasons a call fails protocol validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expecting 'subscribe' to be present")]
    MissingSubscribe,

    #[error("expecting 'subscribe.resource_provider_info' to be present")]
    MissingProviderInfo,

    #[error("expecting 'resource_provider_info.type' to be set")]
    MissingProviderType,

    #[error("expecting 'resource_provider_info.name' to be set")]
    MissingProviderName,

    #[error("expecting 'resource_provider_id' to be present")]
    MissingProviderId,

    #[error("expecting '{field}' to be present")]
    MissingPayload { field: &'static str },

    #[error("'{field}' is not a valid UUID: expecting {UUID_LEN} bytes, got {actual}")]
    MalformedUuid { field: &'static str, actual: usize },

    #[error("resource '{name}' does not belong to resource provider {provider_id}")]
    ForeignResource { name: String, provider_id: String },
}

/// Validates protocol-level well-formedness of a call.
pub fn validate(call: &Call) -> Result<(), ValidationError> {
    match call.r#type() {
        CallType::Subscribe => validate_subscribe(call),
        CallType::UpdateOfferOperationStatus => {
            require_provider_id(call)?;
            let update = call
                .update_offer_operation_status
                .as_ref()
                .ok_or(ValidationError::MissingPayload {
                    field: "update_offer_operation_status",
                })?;
            if update.status.is_none() {
                return Err(ValidationError::MissingPayload {
                    field: "update_offer_operation_status.status",
                });
            }
            require_uuid("update_offer_operation_status.operation_uuid", &update.operation_uuid)
        }
        CallType::UpdateState => {
            require_provider_id(call)?;
            let update = call
                .update_state
                .as_ref()
                .ok_or(ValidationError::MissingPayload {
                    field: "update_state",
                })?;
            validate_update_state(call, update)
        }
        CallType::UpdatePublishResourcesStatus => {
            require_provider_id(call)?;
            // The publish uuid is deliberately not validated here: a
            // malformed uuid is logged and dropped by the handler, not
            // rejected at the protocol layer.
            call.update_publish_resources_status
                .as_ref()
                .map(|_| ())
                .ok_or(ValidationError::MissingPayload {
                    field: "update_publish_resources_status",
                })
        }
        CallType::Unknown => require_provider_id(call),
    }
}

fn validate_subscribe(call: &Call) -> Result<(), ValidationError> {
    let subscribe = call
        .subscribe
        .as_ref()
        .ok_or(ValidationError::MissingSubscribe)?;
    let info = subscribe
        .resource_provider_info
        .as_ref()
        .ok_or(ValidationError::MissingProviderInfo)?;

    if info.r#type.is_empty() {
        return Err(ValidationError::MissingProviderType);
    }
    if info.name.is_empty() {
        return Err(ValidationError::MissingProviderName);
    }
    Ok(())
}

fn validate_update_state(call: &Call, update: &call::UpdateState) -> Result<(), ValidationError> {
    require_uuid("update_state.resource_version_uuid", &update.resource_version_uuid)?;

    for operation in &update.operations {
        require_uuid("update_state.operations.operation_uuid", &operation.operation_uuid)?;
    }

    // The provider id on the call is known present (checked by the
    // caller's require_provider_id).
    let provider_id = call.resource_provider_id.as_ref();
    for resource in &update.resources {
        if resource.provider_id.as_ref() != provider_id {
            return Err(ValidationError::ForeignResource {
                name: resource.name.clone(),
                provider_id: provider_id.map(|id| id.value.clone()).unwrap_or_default(),
            });
        }
    }
    Ok(())
}

fn require_provider_id(call: &Call) -> Result<(), ValidationError> {
    match call.resource_provider_id.as_ref() {
        Some(id) if !id.value.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingProviderId),
    }
}

fn require_uuid(field: &'static str, bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes.len() == UUID_LEN {
        Ok(())
    } else {
        Err(ValidationError::MalformedUuid {
            field,
            actual: bytes.len(),
        })
    }
}
