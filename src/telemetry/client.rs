use reqwest::Client;
use thiserror::Error;

use super::device::DeviceInfo;
use crate::client::join_url;
use crate::config::ServerConfig;

#[derive(Debug, Error)]
#[error("Failed to send device info to '{url}': {source}")]
pub struct TelemetryError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// Posts the device descriptor to the server.
pub struct TelemetryClient {
    client: Client,
    url: String,
}

impl TelemetryClient {
    pub fn new(client: Client, server: &ServerConfig) -> Self {
        Self {
            client,
            url: join_url(&server.base_url, &server.telemetry_path),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `info`. The response status is only logged.
    pub async fn send(&self, info: &DeviceInfo) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(&self.url)
            .json(info)
            .send()
            .await
            .map_err(|source| TelemetryError {
                url: self.url.clone(),
                source,
            })?;

        tracing::debug!(status = response.status().as_u16(), "Device info sent");
        Ok(())
    }

    /// Best-effort send: failures are logged and swallowed.
    pub async fn report(&self, info: &DeviceInfo) {
        match self.send(info).await {
            Ok(()) => tracing::info!(
                device = ?info.device_type,
                os = %info.os,
                browser = %info.browser,
                "Device info reported"
            ),
            Err(e) => tracing::warn!(error = %e, "Device info not reported"),
        }
    }
}
