//! Webhook delivery of progress updates.

use std::time::Duration;

use yieldlens_common::types::ProgressUpdate;

use crate::ProgressSink;

/// Delivery timeout for a single webhook POST.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// POSTs each update as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ProgressSink for WebhookSink {
    async fn notify(&self, update: ProgressUpdate) {
        let result = self
            .client
            .post(&self.url)
            .timeout(WEBHOOK_TIMEOUT)
            .json(&update)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(
                    invocation_id = %update.invocation_id,
                    stage = %update.stage,
                    "Progress webhook delivered"
                );
            }
            Ok(resp) => {
                tracing::warn!(
                    url = %self.url,
                    status = %resp.status(),
                    stage = %update.stage,
                    "Progress webhook rejected update"
                );
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    error = %e,
                    stage = %update.stage,
                    "Progress webhook delivery failed"
                );
            }
        }
    }
}
