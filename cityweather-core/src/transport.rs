use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::TransportError;

/// Issues one GET request and hands back the body of a successful response.
///
/// Non-2xx statuses must be reported as [`TransportError::Status`].
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client. Uses reqwest's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.without_url().to_string()))?;

        let status = res.status();
        tracing::debug!(status = %status, "weather provider responded");

        if !status.is_success() {
            // An unreadable error body is reported as empty.
            let body = res.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        res.text()
            .await
            .map_err(|e| TransportError::Unreachable(e.without_url().to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
