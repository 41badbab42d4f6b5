//! Forwarders
//!
//! The two ways a queued document reaches an indexing service: through the
//! mailbox of an in-process service, or as an `Index_document` message posted
//! to a remote node.

use crate::search::types::Document;
use crate::service::actor::Mailbox;
use crate::service::protocol::{
    ACTION_INDEX_DOCUMENT, ActionRequest, ActionResponse, ENDPOINT_MESSAGE,
};

use anyhow::Result;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_millis(2_000);
const ATTEMPTS: usize = 3;

/// Sends `Index_document` to a service running in this process.
pub async fn forward_via_mailbox(mailbox: &Mailbox, document: Document) -> Result<()> {
    let request = ActionRequest::with_payload(ACTION_INDEX_DOCUMENT, &document)?;
    mailbox.call(request).await?;
    Ok(())
}

/// Posts `Index_document` messages to `<base_url>/message`.
pub struct HttpForwarder {
    endpoint: String,
    http_client: reqwest::Client,
    request_timeout: Duration,
    attempts: usize,
}

impl HttpForwarder {
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ENDPOINT_MESSAGE),
            http_client,
            request_timeout: REQUEST_TIMEOUT,
            attempts: ATTEMPTS,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn with_retry(mut self, request_timeout: Duration, attempts: usize) -> Self {
        self.request_timeout = request_timeout;
        self.attempts = attempts.max(1);
        self
    }

    /// Forwards one document. Succeeds only if the target answered without an error.
    pub async fn forward(&self, document: &Document) -> Result<()> {
        let request = ActionRequest::with_payload(ACTION_INDEX_DOCUMENT, document)?;

        let response = self.post_with_retry(&request).await?;
        let status = response.status();

        let body: ActionResponse = response.json().await.map_err(|e| {
            anyhow::anyhow!("Target answered {} with an unreadable body: {}", status, e)
        })?;

        match body.into_result() {
            Ok(_) if status.is_success() => {
                tracing::debug!("Forwarded document {} to {}", document.id, self.endpoint);
                Ok(())
            }
            Ok(_) => Err(anyhow::anyhow!("Target answered {}", status)),
            Err(error) => Err(anyhow::anyhow!("Target rejected document: {}", error)),
        }
    }

    // --- HTTP Helper with Backoff ---

    async fn post_with_retry(&self, payload: &ActionRequest) -> Result<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..self.attempts {
            let response = self
                .http_client
                .post(self.endpoint.clone())
                .json(payload)
                .timeout(self.request_timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == self.attempts {
                        return Err(anyhow::anyhow!(e));
                    }
                    tracing::debug!(
                        "Attempt {} to reach {} failed: {}",
                        attempt + 1,
                        self.endpoint,
                        e
                    );
                    // Simple jitter to prevent thundering herd
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }
}
