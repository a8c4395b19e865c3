//! The APR tool.
//!
//! One invocation: validate the chain, resolve its reward source, read
//! `totalSupply` and `tokensPerInterval`, derive the APR. The two reads are
//! independent and run jointly; the first one to fail ends the invocation.
//! Each step is reported to the progress sink. [`AprTool::invoke`] never fails; every
//! error comes back as a tagged [`ToolResult::Error`].

use std::str::FromStr;

use alloy::primitives::Address;
use uuid::Uuid;

use yieldlens_common::error::AppError;
use yieldlens_common::types::{
    AprQuery, AprResult, Chain, ProgressStage, ProgressUpdate, ToolResult,
};
use yieldlens_notifier::ProgressSink;

use crate::calculator::AprBreakdown;
use crate::contracts::RewardSource;
use crate::registry::SourceResolver;

/// Tool name exposed to callers.
pub const TOOL_NAME: &str = "get_apr";

pub struct AprTool<R, N> {
    resolver: R,
    sink: N,
}

impl<R: SourceResolver, N: ProgressSink> AprTool<R, N> {
    pub fn new(resolver: R, sink: N) -> Self {
        Self { resolver, sink }
    }

    /// Run the query and fold the outcome into a tagged result.
    pub async fn invoke(&self, query: &AprQuery) -> ToolResult {
        match self.run(query).await {
            Ok(result) => match serde_json::to_string(&result) {
                Ok(json) => ToolResult::Success(json),
                Err(e) => ToolResult::Error(AppError::Internal(e.to_string()).tool_message()),
            },
            Err(e) => {
                tracing::warn!(
                    tool = TOOL_NAME,
                    chain = %query.chain_name,
                    error = %e,
                    "APR query failed"
                );
                ToolResult::Error(e.tool_message())
            }
        }
    }

    /// Run the query, returning the typed result or the first error hit.
    pub async fn run(&self, query: &AprQuery) -> Result<AprResult, AppError> {
        let invocation_id = Uuid::new_v4();

        let chain = parse_supported_chain(&query.chain_name)?;
        self.report(
            invocation_id,
            ProgressStage::ChainValidated,
            chain,
            format!("Validated network {chain}"),
        )
        .await;

        let account = Address::from_str(query.account.trim()).map_err(|e| {
            AppError::Validation(format!("invalid account address {}: {e}", query.account))
        })?;

        let source = self.resolver.resolve(chain)?;

        tracing::debug!(
            invocation_id = %invocation_id,
            chain = %chain,
            account = %account,
            "Fetching reward contract data"
        );
        self.report(
            invocation_id,
            ProgressStage::FetchStarted,
            chain,
            "Fetching total supply and tokens per interval",
        )
        .await;

        let (total_supply, tokens_per_interval) =
            tokio::try_join!(source.total_supply(), source.tokens_per_interval())?;

        self.report(
            invocation_id,
            ProgressStage::FetchCompleted,
            chain,
            format!("Fetched total supply {total_supply} and tokens per interval {tokens_per_interval}"),
        )
        .await;

        let breakdown = AprBreakdown::compute(total_supply, tokens_per_interval)?;
        let result = breakdown.into_result();

        self.report(
            invocation_id,
            ProgressStage::CalculationCompleted,
            chain,
            format!("Base APR is {}%", result.base_apr),
        )
        .await;

        tracing::info!(
            invocation_id = %invocation_id,
            chain = %chain,
            account = %account,
            base_apr = %result.base_apr,
            "APR calculated"
        );

        Ok(result)
    }

    async fn report(
        &self,
        invocation_id: Uuid,
        stage: ProgressStage,
        chain: Chain,
        message: impl Into<String>,
    ) {
        self.sink
            .notify(ProgressUpdate::new(invocation_id, stage, chain, message))
            .await;
    }
}

/// Parse a network identifier, accepting only the supported chain.
fn parse_supported_chain(name: &str) -> Result<Chain, AppError> {
    match Chain::from_str(name) {
        Ok(chain) if chain.is_supported() => Ok(chain),
        _ => Err(AppError::UnsupportedNetwork(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_chain() {
        assert_eq!(parse_supported_chain("arbitrum").unwrap(), Chain::Arbitrum);
        assert_eq!(parse_supported_chain("42161").unwrap(), Chain::Arbitrum);
    }

    #[test]
    fn test_known_but_unsupported_chain_keeps_caller_spelling() {
        let err = parse_supported_chain("Avalanche").unwrap_err();
        assert_eq!(err.tool_message(), "Network Avalanche is not supported");
    }

    #[test]
    fn test_unknown_chain() {
        assert!(matches!(
            parse_supported_chain("dogechain"),
            Err(AppError::UnsupportedNetwork(_))
        ));
    }
}
