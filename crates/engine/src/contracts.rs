//! Reward contract bindings and the read-only source built on them.

use std::future::Future;

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use alloy::sol;

use yieldlens_common::error::AppError;

// Only the view functions the APR query needs are defined.
sol! {
    #[sol(rpc)]
    interface IRewardTracker {
        /// Total amount staked in the tracker.
        function totalSupply() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IRewardDistributor {
        /// Reward tokens emitted per second.
        function tokensPerInterval() external view returns (uint256);
    }
}

/// Read access to the two values an APR is derived from.
pub trait RewardSource: Send + Sync {
    fn total_supply(&self) -> impl Future<Output = Result<U256, AppError>> + Send;

    fn tokens_per_interval(&self) -> impl Future<Output = Result<U256, AppError>> + Send;
}

/// Reads the reward tracker and distributor through an RPC provider.
#[derive(Clone)]
pub struct OnChainRewardSource {
    provider: DynProvider,
    reward_tracker: Address,
    reward_distributor: Address,
}

impl OnChainRewardSource {
    pub fn new(provider: DynProvider, reward_tracker: Address, reward_distributor: Address) -> Self {
        Self {
            provider,
            reward_tracker,
            reward_distributor,
        }
    }

    pub fn reward_tracker(&self) -> Address {
        self.reward_tracker
    }

    pub fn reward_distributor(&self) -> Address {
        self.reward_distributor
    }
}

impl RewardSource for OnChainRewardSource {
    async fn total_supply(&self) -> Result<U256, AppError> {
        let tracker = IRewardTracker::new(self.reward_tracker, self.provider.clone());
        tracker.totalSupply().call().await.map_err(|e| {
            tracing::warn!(
                contract = %self.reward_tracker,
                error = %e,
                "totalSupply call failed"
            );
            AppError::Rpc(e.to_string())
        })
    }

    async fn tokens_per_interval(&self) -> Result<U256, AppError> {
        let distributor = IRewardDistributor::new(self.reward_distributor, self.provider.clone());
        distributor.tokensPerInterval().call().await.map_err(|e| {
            tracing::warn!(
                contract = %self.reward_distributor,
                error = %e,
                "tokensPerInterval call failed"
            );
            AppError::Rpc(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy::sol_types::SolCall;

    use super::*;

    #[test]
    fn test_selectors_match_abi() {
        // keccak256("totalSupply()")[..4]
        assert_eq!(IRewardTracker::totalSupplyCall::SELECTOR, [0x18, 0x16, 0x0d, 0xdd]);
        assert_eq!(
            IRewardDistributor::tokensPerIntervalCall::SIGNATURE,
            "tokensPerInterval()"
        );
    }

    #[test]
    fn test_return_decoding() {
        let encoded = U256::from(31_536_000u64).to_be_bytes::<32>();
        let decoded = IRewardTracker::totalSupplyCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded, U256::from(31_536_000u64));
    }
}
