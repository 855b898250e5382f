//! Webhook error types with HTTP status code mapping.
//!
//! [`HookError`] is the central error type for the webhook surface. Message
//! texts are part of the observable contract: webhook senders reinterpret
//! them together with the status code, so payload errors carry the decoder
//! message verbatim and updater errors pass through untouched.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::service::UpdateError;

/// Flat JSON error body.
///
/// All failure responses (and the 200 "empty ServiceName" case) share this
/// shape:
/// ```json
/// {"error": "can't decode payload: payload without events"}
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    /// Human-readable error message.
    pub error: String,
}

/// Payload decode and shape failures, surfaced verbatim in the response.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Body was not valid JSON; the decoder message is the contract.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Registry notification carried no events.
    #[error("payload without events")]
    NoEvents,

    /// First event was a pull; pulls never trigger a redeploy.
    #[error("PULL is an excluded method")]
    PullExcluded,
}

/// Server-side error enum for the webhook surface.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Any method other than POST on the webhook surface.
    #[error("bad method")]
    BadMethod,

    /// POST to a path outside the webhook endpoints.
    #[error("bad endpoint")]
    BadEndpoint,

    /// Missing or mismatched secret key.
    #[error("unauthorized")]
    Unauthorized,

    /// Payload could not be decoded; the inner message is surfaced
    /// verbatim, not wrapped further.
    #[error("can't decode payload: {0}")]
    Payload(#[from] PayloadError),

    /// The pushed image has no service mapping. Answered with status 200:
    /// registry sinks retry aggressively on non-2xx, and an unmapped image
    /// is an expected condition, not a failure.
    #[error("empty ServiceName, exit. IMG: {registry_image}")]
    UnmappedImage {
        /// Image reference derived from the payload.
        registry_image: String,
    },

    /// Swarm update failed; the stage-prefixed message passes through.
    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl HookError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadMethod => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadEndpoint | Self::Payload(_) | Self::Update(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::UnmappedImage { .. } => StatusCode::OK,
        }
    }
}

impl IntoResponse for HookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorReply {
            error: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn fixed_routing_messages() {
        assert_eq!(HookError::BadMethod.to_string(), "bad method");
        assert_eq!(HookError::BadEndpoint.to_string(), "bad endpoint");
        assert_eq!(HookError::Unauthorized.to_string(), "unauthorized");
    }

    #[test]
    fn payload_errors_are_prefixed_once() {
        let err = HookError::Payload(PayloadError::NoEvents);
        assert_eq!(
            err.to_string(),
            "can't decode payload: payload without events"
        );

        let err = HookError::Payload(PayloadError::PullExcluded);
        assert_eq!(
            err.to_string(),
            "can't decode payload: PULL is an excluded method"
        );
    }

    #[test]
    fn unmapped_image_is_a_200() {
        let err = HookError::UnmappedImage {
            registry_image: "svendowideit/testhook:latest".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::OK);
        assert_eq!(
            err.to_string(),
            "empty ServiceName, exit. IMG: svendowideit/testhook:latest"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            HookError::BadMethod.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            HookError::BadEndpoint.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(HookError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            HookError::Payload(PayloadError::NoEvents).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
