use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the array management API.
///
/// Authentication and enumeration failures are fatal to a report run;
/// `VolumeNotFound` is recoverable (the volume may have been deleted
/// between enumeration and the historical fetch) and callers are
/// expected to skip the volume and continue.
#[derive(Debug, Error)]
pub enum ArrayError {
    #[error("authentication to array {host} rejected ({status})")]
    Auth { host: String, status: StatusCode },

    #[error("volume {0} not found on the array")]
    VolumeNotFound(String),

    #[error("unexpected response from array ({status}): {body}")]
    BadResponse { status: StatusCode, body: String },

    #[error("request to array failed: {0}")]
    Http(#[from] reqwest::Error),
}
