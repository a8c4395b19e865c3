//! Progress notification sinks.
//!
//! The APR tool reports each major step (chain validation, fetch start, fetch
//! completion, calculation completion) to a [`ProgressSink`]. Notifications are
//! purely observational: a sink that fails to deliver logs the failure and
//! the invocation carries on.

use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;

use yieldlens_common::types::ProgressUpdate;

pub mod webhook;

pub use webhook::WebhookSink;

/// Destination for progress notifications.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, update: ProgressUpdate) -> impl Future<Output = ()> + Send;
}

/// Emits every update as a structured `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    async fn notify(&self, update: ProgressUpdate) {
        tracing::info!(
            invocation_id = %update.invocation_id,
            stage = %update.stage,
            chain = %update.chain,
            "{}",
            update.message
        );
    }
}

/// Forwards updates to an in-process consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ProgressUpdate>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ProgressUpdate>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    async fn notify(&self, update: ProgressUpdate) {
        if self.tx.send(update).is_err() {
            tracing::debug!("Progress receiver dropped, update discarded");
        }
    }
}

/// Sink used by the service binary: always traces, and posts to a webhook
/// when one is configured.
#[derive(Debug, Clone, Default)]
pub struct DefaultSink {
    tracing: TracingSink,
    webhook: Option<WebhookSink>,
}

impl DefaultSink {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            tracing: TracingSink,
            webhook: webhook_url.map(WebhookSink::new),
        }
    }

    pub fn has_webhook(&self) -> bool {
        self.webhook.is_some()
    }
}

impl ProgressSink for DefaultSink {
    async fn notify(&self, update: ProgressUpdate) {
        match &self.webhook {
            Some(webhook) => {
                self.tracing.notify(update.clone()).await;
                webhook.notify(update).await;
            }
            None => self.tracing.notify(update).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use yieldlens_common::types::{Chain, ProgressStage};

    use super::*;

    fn update(stage: ProgressStage) -> ProgressUpdate {
        ProgressUpdate::new(Uuid::new_v4(), stage, Chain::Arbitrum, "test")
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);

        sink.notify(update(ProgressStage::ChainValidated)).await;
        sink.notify(update(ProgressStage::FetchStarted)).await;

        assert_eq!(rx.recv().await.unwrap().stage, ProgressStage::ChainValidated);
        assert_eq!(rx.recv().await.unwrap().stage, ProgressStage::FetchStarted);
    }

    #[tokio::test]
    async fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = ChannelSink::new(tx);
        sink.notify(update(ProgressStage::FetchCompleted)).await;
    }

    #[test]
    fn test_default_sink_webhook_toggle() {
        assert!(!DefaultSink::new(None).has_webhook());
        assert!(DefaultSink::new(Some("http://localhost:9/hook".to_string())).has_webhook());
    }

    #[tokio::test]
    async fn test_default_sink_without_webhook() {
        DefaultSink::default()
            .notify(update(ProgressStage::CalculationCompleted))
            .await;
    }
}
