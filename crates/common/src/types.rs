use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Known blockchain networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Arbitrum,
    Avalanche,
    Ethereum,
}

impl Chain {
    /// The only network the APR query is served for.
    pub const SUPPORTED: Chain = Chain::Arbitrum;

    /// EVM chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Arbitrum => 42161,
            Chain::Avalanche => 43114,
            Chain::Ethereum => 1,
        }
    }

    pub fn is_supported(&self) -> bool {
        *self == Self::SUPPORTED
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Arbitrum => write!(f, "arbitrum"),
            Chain::Avalanche => write!(f, "avalanche"),
            Chain::Ethereum => write!(f, "ethereum"),
        }
    }
}

/// Accepts the lowercase name (case-insensitive) or the decimal chain id.
impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arbitrum" | "42161" => Ok(Chain::Arbitrum),
            "avalanche" | "43114" => Ok(Chain::Avalanche),
            "ethereum" | "1" => Ok(Chain::Ethereum),
            other => Err(other.to_string()),
        }
    }
}

/// Input of the APR query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AprQuery {
    /// Network identifier, e.g. `arbitrum`
    pub chain_name: String,
    /// Account address the query is made for
    pub account: String,
}

/// Successful APR query output. Every number is rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AprResult {
    /// Annualized rate in percent, two decimals
    pub base_apr: String,
    /// `tokensPerInterval × seconds per year`, base-10
    pub yearly_rewards: String,
    /// Reward tracker total supply, base-10
    pub total_supply: String,
    /// Distributor emission per second, base-10
    pub tokens_per_interval: String,
}

/// Tagged tool result. Callers always receive one of these, never a raw error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum ToolResult {
    /// JSON-encoded `AprResult`
    Success(String),
    /// Human-readable failure message
    Error(String),
}

impl ToolResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Error(_))
    }

    /// Payload regardless of the tag.
    pub fn data(&self) -> &str {
        match self {
            ToolResult::Success(data) | ToolResult::Error(data) => data,
        }
    }
}

/// Steps of an APR invocation reported on the progress side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    ChainValidated,
    FetchStarted,
    FetchCompleted,
    CalculationCompleted,
}

impl std::fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStage::ChainValidated => write!(f, "chain_validated"),
            ProgressStage::FetchStarted => write!(f, "fetch_started"),
            ProgressStage::FetchCompleted => write!(f, "fetch_completed"),
            ProgressStage::CalculationCompleted => write!(f, "calculation_completed"),
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Correlates every update of one invocation
    pub invocation_id: Uuid,
    pub stage: ProgressStage,
    pub chain: Chain,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ProgressUpdate {
    pub fn new(
        invocation_id: Uuid,
        stage: ProgressStage,
        chain: Chain,
        message: impl Into<String>,
    ) -> Self {
        Self {
            invocation_id,
            stage,
            chain,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_name_and_id() {
        assert_eq!("arbitrum".parse::<Chain>(), Ok(Chain::Arbitrum));
        assert_eq!(" Arbitrum ".parse::<Chain>(), Ok(Chain::Arbitrum));
        assert_eq!("42161".parse::<Chain>(), Ok(Chain::Arbitrum));
        assert_eq!("AVALANCHE".parse::<Chain>(), Ok(Chain::Avalanche));
        assert_eq!("1".parse::<Chain>(), Ok(Chain::Ethereum));
        assert!("solana".parse::<Chain>().is_err());
    }

    #[test]
    fn test_only_arbitrum_supported() {
        assert!(Chain::Arbitrum.is_supported());
        assert!(!Chain::Avalanche.is_supported());
        assert!(!Chain::Ethereum.is_supported());
    }

    #[test]
    fn test_query_uses_camel_case() {
        let query: AprQuery = serde_json::from_str(
            r#"{"chainName":"arbitrum","account":"0x0000000000000000000000000000000000000001"}"#,
        )
        .unwrap();
        assert_eq!(query.chain_name, "arbitrum");
    }

    #[test]
    fn test_result_field_names() {
        let result = AprResult {
            base_apr: "12.50".to_string(),
            yearly_rewards: "100".to_string(),
            total_supply: "800".to_string(),
            tokens_per_interval: "1".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["baseApr"], "12.50");
        assert_eq!(value["yearlyRewards"], "100");
        assert_eq!(value["totalSupply"], "800");
        assert_eq!(value["tokensPerInterval"], "1");
    }

    #[test]
    fn test_tool_result_is_tagged() {
        let value = serde_json::to_value(ToolResult::Error("boom".to_string())).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["data"], "boom");

        let ok = ToolResult::Success("{}".to_string());
        assert!(!ok.is_error());
        assert_eq!(ok.data(), "{}");
    }

    #[test]
    fn test_progress_stage_display_matches_serde() {
        let json = serde_json::to_value(ProgressStage::FetchCompleted).unwrap();
        assert_eq!(json, ProgressStage::FetchCompleted.to_string());
    }
}
