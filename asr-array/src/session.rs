use log::warn;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;

use crate::error::ArrayError;
use crate::space::SpaceSample;
use crate::volume::Volume;

/// REST API version the client speaks.
pub const API_VERSION: &str = "1.12";

/// Connection parameters for a single array.
#[derive(Debug, Clone)]
pub struct ArrayConfig {
    /// Management hostname or IP of the array.
    pub host: String,
    /// Pre-issued API token.
    pub api_token: String,
    /// Accept any TLS certificate. Must be an explicit opt-in; secure
    /// verification is the default.
    pub accept_invalid_certs: bool,
    /// Per-request timeout applied to every API call.
    pub request_timeout: Duration,
}

/// An authenticated session against one array.
///
/// The array issues a session cookie on login; the cookie jar on the
/// underlying client carries it across calls. `close` invalidates the
/// session server-side and should run on every exit path.
pub struct ArraySession {
    client: Client,
    base_url: String,
    host: String,
}

impl ArraySession {
    /// Open an authenticated session by exchanging the API token for a
    /// session cookie.
    pub async fn connect(config: &ArrayConfig) -> Result<Self, ArrayError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let session = ArraySession {
            client,
            base_url: format!("https://{}/api/{}", config.host, API_VERSION),
            host: config.host.clone(),
        };

        let response = session
            .client
            .post(session.url("auth/session"))
            .json(&json!({ "api_token": config.api_token }))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(session),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ArrayError::Auth {
                    host: session.host.clone(),
                    status: response.status(),
                })
            }
            _ => Err(Self::bad_response(response).await),
        }
    }

    /// Fetch the complete volume listing. The endpoint returns the full
    /// set in one response; no pagination parameters are applied.
    pub async fn list_volumes(&self) -> Result<Vec<Volume>, ArrayError> {
        let response = self.client.get(self.url("volume")).send().await?;
        if !response.status().is_success() {
            return Err(Self::bad_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch a volume's space history over the given window, newest
    /// sample first. A volume deleted between enumeration and this call
    /// surfaces as `VolumeNotFound`.
    pub async fn volume_space_history(
        &self,
        name: &str,
        window: &str,
    ) -> Result<Vec<SpaceSample>, ArrayError> {
        let response = self
            .client
            .get(self.url(&format!("volume/{}", name)))
            .query(&[("space", "true"), ("historical", window)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                Err(ArrayError::VolumeNotFound(name.to_string()))
            }
            _ => Err(Self::bad_response(response).await),
        }
    }

    /// Invalidate the session token server-side.
    pub async fn close(self) -> Result<(), ArrayError> {
        let response = self.client.delete(self.url("auth/session")).send().await?;
        if !response.status().is_success() {
            return Err(Self::bad_response(response).await);
        }
        Ok(())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn bad_response(response: reqwest::Response) -> ArrayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("Unexpected response from array: {status}");
        ArrayError::BadResponse { status, body }
    }
}
