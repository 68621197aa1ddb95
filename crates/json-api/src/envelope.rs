//! Uniform response envelope.
//!
//! Every route answers `200 OK` with `{success, message?, ...}`; callers
//! inspect the `success` flag, not the transport status. Failures of any
//! kind — validation, not-found, forbidden, auth, or an internal fault —
//! are rendered as `{success: false, message}`.

use salvo::prelude::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    pub(crate) fn ok_with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        })
    }

    pub(crate) fn fail(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: Some(message.into()),
            data: None,
        })
    }
}

/// Message used when an internal fault must be reported without leaking the
/// underlying error.
pub(crate) const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again";

/// Placeholder payload for message-only envelopes. A unit type would not
/// survive `#[serde(flatten)]`, an empty struct does.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NoData {}
