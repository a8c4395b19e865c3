//! Shared application state for the Axum API server.

use std::sync::Arc;

use yieldlens_common::config::AppConfig;
use yieldlens_engine::registry::ChainRegistry;
use yieldlens_engine::tool::AprTool;
use yieldlens_notifier::DefaultSink;

/// The tool as wired for the service: RPC-backed registry, default sink.
pub type ServiceTool = AprTool<ChainRegistry, DefaultSink>;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub tool: Arc<ServiceTool>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let tool = AprTool::new(
            ChainRegistry::from_config(&config),
            DefaultSink::new(config.progress_webhook_url.clone()),
        );

        Self {
            tool: Arc::new(tool),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;

    use super::*;

    #[test]
    fn test_state_keeps_listen_port() {
        let config = AppConfig {
            arbitrum_rpc_url: "http://127.0.0.1:9".to_string(),
            reward_tracker_address: Address::repeat_byte(0x11),
            reward_distributor_address: Address::repeat_byte(0x22),
            api_port: 8088,
            progress_webhook_url: None,
        };

        let state = AppState::new(config);
        let cloned = state.clone();

        assert_eq!(cloned.config.api_port, 8088);
        assert!(Arc::ptr_eq(&state.tool, &cloned.tool));
    }
}
