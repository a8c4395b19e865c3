use std::str::FromStr;

use alloy::primitives::Address;

/// Public Arbitrum One endpoint, used when `ARBITRUM_RPC_URL` is unset.
pub const DEFAULT_ARBITRUM_RPC_URL: &str = "https://arb1.arbitrum.io/rpc";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Arbitrum RPC URL (NaaS provider recommended)
    pub arbitrum_rpc_url: String,

    /// Reward tracker contract, source of `totalSupply`
    pub reward_tracker_address: Address,

    /// Reward distributor contract, source of `tokensPerInterval`
    pub reward_distributor_address: Address,

    /// Port the API server binds to (default: 3000)
    pub api_port: u16,

    /// Optional webhook receiving progress notifications
    pub progress_webhook_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            arbitrum_rpc_url: lookup("ARBITRUM_RPC_URL")
                .unwrap_or_else(|| DEFAULT_ARBITRUM_RPC_URL.to_string()),
            reward_tracker_address: required_address(&lookup, "REWARD_TRACKER_ADDRESS")?,
            reward_distributor_address: required_address(&lookup, "REWARD_DISTRIBUTOR_ADDRESS")?,
            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            progress_webhook_url: lookup("PROGRESS_WEBHOOK_URL").filter(|url| !url.is_empty()),
        })
    }
}

fn required_address(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Address> {
    let raw = lookup(key).ok_or_else(|| anyhow::anyhow!("{key} environment variable is required"))?;
    Address::from_str(raw.trim())
        .map_err(|e| anyhow::anyhow!("{key} must be a valid hex address: {e}"))
}
