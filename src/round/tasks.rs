use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{error, info, span, Level};

use crate::types::now_ms;

use super::core::{RoundOutcome, RoundService};

/// Background ticker that advances the round on a fixed interval.
///
/// The round also advances on reads of `/api/round`; this task guarantees
/// progress when no traffic arrives. Transition errors (e.g. a failed
/// round-state save) are logged and retried on the next tick.
pub async fn run_ticker(round: Arc<Mutex<RoundService>>, tick_interval_ms: u64) -> Result<()> {
    let span = span!(Level::INFO, "round_ticker");
    let _enter = span.enter();

    info!("Round ticker started (tick_interval_ms={})", tick_interval_ms);

    loop {
        tokio::time::sleep(Duration::from_millis(tick_interval_ms)).await;

        let mut service = round.lock().await;
        match service.advance_if_due(now_ms()).await {
            Ok(Some(RoundOutcome::Picked)) => info!("Round resolved, fresh voting phase started"),
            Ok(Some(RoundOutcome::Tiebreak)) => info!("Round entered tie-break"),
            Ok(Some(RoundOutcome::NoSubmissions)) => {
                info!("Round restarted without submissions")
            }
            Ok(None) => {}
            Err(e) => error!("Failed to advance round: {}", e),
        }
    }
}
