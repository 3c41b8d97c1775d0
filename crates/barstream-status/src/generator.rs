//! Tick loop feeding status lines into the stream.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use barstream_core::config::StatusConfig;
use barstream_core::protocol::StatusLine;
use barstream_core::{AsyncStream, Result};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_ticks` lines were sent.
    TickLimit,
    /// The shutdown future completed.
    Shutdown,
}

/// Send a line every `interval_ms` until the tick limit or `shutdown`,
/// then close the infinite array.
///
/// The first line goes out immediately. A failed write ends the loop with
/// that error and leaves the array open.
pub async fn run<W, R, F, S>(
    stream: &AsyncStream<W, R>,
    config: &StatusConfig,
    mut next_line: F,
    shutdown: S,
) -> Result<StopReason>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
    F: FnMut() -> StatusLine,
    S: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(Duration::from_millis(config.interval_ms.max(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    let reason = loop {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            break StopReason::TickLimit;
        }
        tokio::select! {
            _ = interval.tick() => {
                stream.send_line(&next_line()).await?;
                ticks += 1;
                debug!(ticks, "Tick");
            }
            () = &mut shutdown => break StopReason::Shutdown,
        }
    };

    stream.close().await?;
    info!(ticks, reason = ?reason, "Status stream finished");
    Ok(reason)
}
