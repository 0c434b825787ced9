//! Shared HTTP response helpers for the service clients.
//!
//! Centralizes the status-code check (non-success → [`RemoteError::Api`]) so
//! individual service modules stay focused on request construction and
//! response mapping. Nothing is retried.

use crate::error::RemoteError;

/// Check an HTTP response and return it unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let resp = mock_response(500, "backend down");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Api { status: 500, ref message } if message == "backend down"
        ));
    }

    #[tokio::test]
    async fn check_response_not_found() {
        let err = check_response(mock_response(404, "")).await.unwrap_err();
        assert!(matches!(err, RemoteError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "")).await.is_ok());
    }
}
