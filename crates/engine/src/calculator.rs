//! APR calculator.
//!
//! APR = tokens_per_interval × seconds_per_year × 100 / total_supply
//!
//! The division runs on the value multiplied by [`PRECISION`] so integer
//! truncation does not eat the fractional part; the result is scaled back
//! down when rendered.

use alloy::primitives::U256;

use yieldlens_common::error::AppError;
use yieldlens_common::types::AprResult;

/// 365 days.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Precision scalar applied before the division (1e18).
pub const PRECISION: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

const PERCENT: U256 = U256::from_limbs([100, 0, 0, 0]);

/// Inputs and derived values of one APR computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AprBreakdown {
    pub total_supply: U256,
    pub tokens_per_interval: U256,
    pub yearly_rewards: U256,
    /// APR in percent, multiplied by `PRECISION`
    pub scaled_apr: U256,
}

impl AprBreakdown {
    /// Derive yearly rewards and the scaled APR from the two on-chain values.
    pub fn compute(total_supply: U256, tokens_per_interval: U256) -> Result<Self, AppError> {
        if total_supply.is_zero() {
            return Err(AppError::ZeroTotalSupply);
        }

        let yearly_rewards = tokens_per_interval
            .checked_mul(U256::from(SECONDS_PER_YEAR))
            .ok_or_else(|| overflow("yearly rewards"))?;

        let scaled_apr = yearly_rewards
            .checked_mul(PRECISION)
            .and_then(|v| v.checked_mul(PERCENT))
            .ok_or_else(|| overflow("scaled APR"))?
            / total_supply;

        Ok(Self {
            total_supply,
            tokens_per_interval,
            yearly_rewards,
            scaled_apr,
        })
    }

    /// APR in percent with exactly two decimals, rounded half-up.
    pub fn base_apr(&self) -> String {
        let mut whole = self.scaled_apr / PRECISION;
        let remainder = self.scaled_apr % PRECISION;
        let mut hundredths = (remainder * PERCENT + PRECISION / U256::from(2)) / PRECISION;

        if hundredths == PERCENT {
            whole += U256::from(1);
            hundredths = U256::ZERO;
        }

        format!("{}.{:02}", whole, hundredths.to::<u64>())
    }

    pub fn into_result(self) -> AprResult {
        AprResult {
            base_apr: self.base_apr(),
            yearly_rewards: self.yearly_rewards.to_string(),
            total_supply: self.total_supply.to_string(),
            tokens_per_interval: self.tokens_per_interval.to_string(),
        }
    }
}

fn overflow(what: &str) -> AppError {
    AppError::Calculation(format!("{what} overflows 256 bits"))
}
