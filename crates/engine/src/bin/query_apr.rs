//! One-shot APR query against the configured RPC.
//!
//! ## Usage
//!
//! ```bash
//! REWARD_TRACKER_ADDRESS=0x... REWARD_DISTRIBUTOR_ADDRESS=0x... \
//!   cargo run --bin query-apr -- arbitrum 0xYourAccount
//! ```
//!
//! Prints the tagged tool result as JSON on stdout. Progress updates go to
//! the log (stderr).

use yieldlens_common::config::AppConfig;
use yieldlens_common::types::AprQuery;
use yieldlens_engine::registry::ChainRegistry;
use yieldlens_engine::tool::AprTool;
use yieldlens_notifier::DefaultSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yieldlens_engine=info,yieldlens_notifier=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(chain_name), Some(account)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: query-apr <chain-name> <account>");
    };

    let config = AppConfig::from_env()?;
    let tool = AprTool::new(
        ChainRegistry::from_config(&config),
        DefaultSink::new(config.progress_webhook_url.clone()),
    );

    let result = tool.invoke(&AprQuery { chain_name, account }).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
