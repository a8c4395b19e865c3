//! Provider resolution keyed by network identifier.
//!
//! `ChainRegistry` knows, per chain, which RPC endpoint to talk to and where
//! the reward tracker and distributor live. Resolving a chain hands back a
//! ready-to-use [`OnChainRewardSource`].
//!
//! ```rust,no_run
//! use yieldlens_common::config::AppConfig;
//! use yieldlens_common::types::Chain;
//! use yieldlens_engine::registry::{ChainRegistry, SourceResolver};
//! use yieldlens_engine::contracts::RewardSource;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = ChainRegistry::from_config(&AppConfig::from_env()?);
//! let source = registry.resolve(Chain::Arbitrum)?;
//! println!("total supply: {}", source.total_supply().await?);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::http::reqwest::Url;

use yieldlens_common::config::AppConfig;
use yieldlens_common::error::AppError;
use yieldlens_common::types::Chain;

use crate::contracts::{OnChainRewardSource, RewardSource};

/// Turns a network identifier into a reward source.
pub trait SourceResolver: Send + Sync {
    type Source: RewardSource;

    fn resolve(&self, chain: Chain) -> Result<Self::Source, AppError>;
}

/// Where to reach one chain and its reward contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEndpoints {
    pub rpc_url: String,
    pub reward_tracker: Address,
    pub reward_distributor: Address,
}

/// A registered chain and its provider, built on first use.
#[derive(Clone)]
struct RegisteredChain {
    endpoints: ChainEndpoints,
    provider: OnceLock<DynProvider>,
}

/// Registry of chains the service can read from.
///
/// Each chain keeps one provider (and so one HTTP connection pool) that every
/// resolved source shares.
#[derive(Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<Chain, RegisteredChain>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the supported chain with the configured contracts.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_chain(
            Chain::SUPPORTED,
            ChainEndpoints {
                rpc_url: config.arbitrum_rpc_url.clone(),
                reward_tracker: config.reward_tracker_address,
                reward_distributor: config.reward_distributor_address,
            },
        )
    }

    pub fn with_chain(mut self, chain: Chain, endpoints: ChainEndpoints) -> Self {
        tracing::debug!(
            chain = %chain,
            reward_tracker = %endpoints.reward_tracker,
            reward_distributor = %endpoints.reward_distributor,
            "Registered chain endpoints"
        );
        self.chains.insert(
            chain,
            RegisteredChain {
                endpoints,
                provider: OnceLock::new(),
            },
        );
        self
    }

    pub fn get(&self, chain: Chain) -> Result<&ChainEndpoints, AppError> {
        self.registered(chain).map(|registered| &registered.endpoints)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Number of chains whose provider has been built.
    pub fn connected(&self) -> usize {
        self.chains
            .values()
            .filter(|registered| registered.provider.get().is_some())
            .count()
    }

    fn registered(&self, chain: Chain) -> Result<&RegisteredChain, AppError> {
        self.chains
            .get(&chain)
            .ok_or_else(|| AppError::UnsupportedNetwork(chain.to_string()))
    }

    /// The chain's shared provider, connecting on first call.
    fn provider(&self, chain: Chain) -> Result<DynProvider, AppError> {
        let registered = self.registered(chain)?;
        if let Some(provider) = registered.provider.get() {
            return Ok(provider.clone());
        }

        let url: Url = registered
            .endpoints
            .rpc_url
            .parse()
            .map_err(|e| AppError::Config(format!("invalid RPC URL for {chain}: {e}")))?;

        let provider = ProviderBuilder::new().connect_http(url).erased();
        tracing::debug!(chain = %chain, "Connected RPC provider");

        // A concurrent first call may have won the race; keep whichever was stored.
        Ok(registered.provider.get_or_init(|| provider).clone())
    }
}

impl SourceResolver for ChainRegistry {
    type Source = OnChainRewardSource;

    fn resolve(&self, chain: Chain) -> Result<OnChainRewardSource, AppError> {
        let provider = self.provider(chain)?;
        let endpoints = self.get(chain)?;

        Ok(OnChainRewardSource::new(
            provider,
            endpoints.reward_tracker,
            endpoints.reward_distributor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(rpc_url: &str) -> ChainEndpoints {
        ChainEndpoints {
            rpc_url: rpc_url.to_string(),
            reward_tracker: Address::repeat_byte(0xAA),
            reward_distributor: Address::repeat_byte(0xBB),
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            arbitrum_rpc_url: "http://localhost:8545".to_string(),
            reward_tracker_address: Address::repeat_byte(0x11),
            reward_distributor_address: Address::repeat_byte(0x22),
            api_port: 3000,
            progress_webhook_url: None,
        }
    }

    #[test]
    fn test_from_config_registers_supported_chain_only() {
        let registry = ChainRegistry::from_config(&test_config());
        assert_eq!(registry.len(), 1);

        let arbitrum = registry.get(Chain::Arbitrum).unwrap();
        assert_eq!(arbitrum.rpc_url, "http://localhost:8545");
        assert_eq!(arbitrum.reward_tracker, Address::repeat_byte(0x11));
        assert_eq!(arbitrum.reward_distributor, Address::repeat_byte(0x22));
    }

    #[test]
    fn test_unregistered_chain_is_unsupported() {
        let registry = ChainRegistry::from_config(&test_config());
        let err = registry.get(Chain::Avalanche).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedNetwork(ref name) if name == "avalanche"));
        assert!(registry.resolve(Chain::Ethereum).is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ChainRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(Chain::Arbitrum).is_err());
    }

    #[test]
    fn test_resolve_builds_source_for_configured_contracts() {
        let registry = ChainRegistry::new().with_chain(Chain::Arbitrum, endpoints("http://localhost:8545"));
        let source = registry.resolve(Chain::Arbitrum).unwrap();
        assert_eq!(source.reward_tracker(), Address::repeat_byte(0xAA));
        assert_eq!(source.reward_distributor(), Address::repeat_byte(0xBB));
    }

    #[test]
    fn test_resolve_rejects_bad_rpc_url() {
        let registry = ChainRegistry::new().with_chain(Chain::Arbitrum, endpoints("not a url"));
        assert!(matches!(
            registry.resolve(Chain::Arbitrum),
            Err(AppError::Config(_))
        ));
        assert_eq!(registry.connected(), 0);
    }

    #[test]
    fn test_provider_is_shared_across_resolutions() {
        let registry = ChainRegistry::from_config(&test_config());
        assert_eq!(registry.connected(), 0);

        registry.resolve(Chain::Arbitrum).unwrap();
        registry.resolve(Chain::Arbitrum).unwrap();
        assert_eq!(registry.connected(), 1);

        let cloned = registry.clone();
        assert_eq!(cloned.connected(), 1);
    }
}
