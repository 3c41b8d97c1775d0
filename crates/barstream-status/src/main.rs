//! barstream status generator
//!
//! Writes an i3bar protocol stream to stdout: the header, then one status
//! line per interval, until the configured tick limit or Ctrl+C.

use tracing::info;

use barstream_core::AsyncStream;
use barstream_status::blocks;
use barstream_status::generator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = barstream_core::config::load_config()?;

    let log_filter = format!("barstream_status={0},barstream_core={0}", config.status.log_level);
    barstream_core::tracing_init::init_tracing(&log_filter, config.status.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        interval_ms = config.status.interval_ms,
        framing = %config.stream.framing,
        click_events = config.stream.click_events,
        "Starting barstream-status"
    );

    let stream = AsyncStream::stdio(config.stream.options(), &config.stream.header()).await?;

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C shutdown signal");
        } else {
            std::future::pending::<()>().await;
        }
    };

    let reason = generator::run(
        &stream,
        &config.status,
        || blocks::status_line(&chrono::Local::now(), blocks::read_load()),
        shutdown,
    )
    .await?;

    info!(?reason, "barstream-status stopped");
    Ok(())
}
