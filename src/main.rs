use anyhow::Result;
use clap::Parser;
use tracing::info;

use pumpvote::config::BaseConfig;
use pumpvote::telemetry;
use pumpvote::PumpVote;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    telemetry::init();
    info!("Starting pumpvote");

    // Parse configuration from CLI arguments
    let config = BaseConfig::parse();
    info!(
        "Configuration: bind_addr={}, data_dir={}, voting_duration_secs={}, tiebreak_duration_secs={}",
        config.bind_addr, config.data_dir, config.voting_duration_secs, config.tiebreak_duration_secs
    );

    // Initialize and run the app
    let app = PumpVote::initialize(config)?;
    app.run().await?;

    info!("pumpvote shutdown complete");
    Ok(())
}
