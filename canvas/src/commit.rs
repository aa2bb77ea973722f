//! Client side of the patch transport.
//!
//! The engine emits [`crate::engine::Action::Commit`] on pointer-up and has
//! already returned to idle by the time the host delivers it. Delivery never
//! touches the registry: a failed commit is logged and surfaced, and the
//! element keeps its new geometry.

#[cfg(test)]
#[path = "commit_test.rs"]
mod commit_test;

use wire::{UpdateElementRequest, UpdateElementResponse};

/// Failure to get a commit accepted by the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a failure.
    #[error("server rejected the patch (HTTP {status}): {message}")]
    Rejected { status: u16, code: Option<String>, message: String },
    /// The server answered with something that is not a transport response.
    #[error("malformed response (HTTP {status}): {body}")]
    Decode { status: u16, body: String },
}

/// Sends committed patches to wherever the source document lives.
#[allow(async_fn_in_trait)]
pub trait PatchTransport {
    /// Deliver one commit.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the patch was not persisted.
    async fn send(&self, request: &UpdateElementRequest) -> Result<(), TransportError>;
}

/// Interpret an HTTP status and body returned by the update endpoint.
///
/// # Errors
///
/// [`TransportError::Rejected`] for `success: false` or a non-2xx status,
/// [`TransportError::Decode`] for a 2xx status whose body is not a response.
pub fn check_response(status: u16, body: &str) -> Result<(), TransportError> {
    let ok_status = (200..300).contains(&status);
    match serde_json::from_str::<UpdateElementResponse>(body) {
        Ok(response) if ok_status && response.success => Ok(()),
        Ok(response) => Err(TransportError::Rejected {
            status,
            code: response.code,
            message: response.error.unwrap_or_else(|| "unknown error".to_owned()),
        }),
        Err(_) if ok_status => Err(TransportError::Decode { status, body: body.to_owned() }),
        Err(_) => Err(TransportError::Rejected { status, code: None, message: body.trim().to_owned() }),
    }
}

/// Deliver a commit and log the outcome.
///
/// The result is returned for display only; callers must not roll back
/// local geometry on failure.
///
/// # Errors
///
/// Passes through the transport's error.
pub async fn deliver<T: PatchTransport + ?Sized>(
    transport: &T,
    request: &UpdateElementRequest,
) -> Result<(), TransportError> {
    log::debug!("commit: sending {} ({} fields)", request.selected_id, request.patch.fields().count());
    match transport.send(request).await {
        Ok(()) => {
            log::info!("commit: {} persisted", request.selected_id);
            Ok(())
        }
        Err(e) => {
            log::error!("commit: {} not persisted: {e}", request.selected_id);
            Err(e)
        }
    }
}
