use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network {0} is not supported")]
    UnsupportedNetwork(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Total supply is zero, APR is undefined")]
    ZeroTotalSupply,

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message carried by a failed tool result.
    ///
    /// Unsupported networks are reported on their own; everything else is
    /// wrapped as a generic calculation failure with the cause preserved.
    pub fn tool_message(&self) -> String {
        match self {
            AppError::UnsupportedNetwork(_) => self.to_string(),
            other => format!("Failed to calculate APR: {other}"),
        }
    }
}
