//! Task orchestration: HTTP server and round ticker.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, span, Level};

use crate::http::ApiServer;
use crate::round;

use super::core::PumpVote;

impl PumpVote {
    /// Run the application: spawn the HTTP server and the round ticker, and
    /// wait for both.
    pub async fn run(self) -> Result<()> {
        let span = span!(Level::INFO, "app_run");
        let _enter = span.enter();

        info!(
            "Starting pumpvote (bind_addr={}, voting_duration_secs={})",
            self.ctx.config.bind_addr, self.ctx.config.voting_duration_secs
        );

        let server = ApiServer::new(self.ctx.config.bind_addr.clone(), Arc::clone(&self.ctx));
        let (addr, server_handle) = server.start()?;
        info!("HTTP API listening on http://{}", addr);

        let ticker_handle = {
            let round = Arc::clone(&self.ctx.round);
            let tick_interval_ms = self.ctx.config.tick_interval_ms;
            tokio::spawn(async move {
                if let Err(e) = round::tasks::run_ticker(round, tick_interval_ms).await {
                    error!("Round ticker failed: {}", e);
                }
            })
        };

        let (server_res, ticker_res) = tokio::join!(server_handle, ticker_handle);
        server_res??;
        ticker_res?;

        info!("pumpvote run completed");
        Ok(())
    }
}
