use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::OpenMeteoError;

/// Capability to perform a single `GET <url>` and hand back the body.
///
/// Implementations report non-2xx responses as [`OpenMeteoError::Status`].
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<String, OpenMeteoError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, OpenMeteoError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenMeteoError::Transport(e.to_string()))?;

        Ok(Self { http })
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, OpenMeteoError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| OpenMeteoError::Transport(e.to_string()))?;

        let status = res.status();
        debug!(%status, "received response");

        let body = res
            .text()
            .await
            .map_err(|e| OpenMeteoError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(OpenMeteoError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("Not Found"), "Not Found");
    }

    #[test]
    fn long_bodies_are_cut_on_a_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn transport_builds_with_timeout() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }
}
