//! Link checking for spectrum URLs.

use astro_core::errors::ExternalError;
use astro_core::services::LinkChecker;

use crate::RemoteClient;

const SERVICE: &str = "link check";

impl LinkChecker for RemoteClient {
    /// Status of a `HEAD` request. Any status is returned as is; only
    /// transport failures are errors.
    async fn status(&self, url: &str) -> Result<u16, ExternalError> {
        let resp = self
            .http
            .head(url)
            .send()
            .await
            .map_err(|e| ExternalError::Unreachable {
                service: SERVICE,
                reason: e.to_string(),
            })?;
        let status = resp.status().as_u16();
        tracing::debug!(url, status, "link checked");
        Ok(status)
    }
}
