//! Shared request plumbing.

use reqwest::blocking::{Client, Response};
use tutor_core::RemoteError;

/// A client with reqwest's default timeouts.
pub(crate) fn client() -> Result<Client, RemoteError> {
    Client::builder().build().map_err(transport)
}

pub(crate) fn transport(e: reqwest::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

pub(crate) fn decode(e: reqwest::Error) -> RemoteError {
    RemoteError::Decode(e.to_string())
}

/// Pass successful responses through; turn anything else into [`RemoteError::Status`].
pub(crate) fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    log::debug!("HTTP {}: {}", status, body);
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}
