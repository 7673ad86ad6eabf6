//! CamGrid input monitor entry point.
//!
//! Wires together configuration, structured logging, the evdev device
//! scanner, and the monitor facade, then drains and logs events until a
//! shutdown signal arrives.  The viewer process embeds the same
//! [`InputMonitor`] facade directly; this binary exists for appliance
//! bring-up and for watching what the touch controller actually reports.
//!
//! ```text
//! main()
//!  └─ load_config()       -- ~/.config/camgrid/config.toml, defaults if absent
//!  └─ InputMonitor::start -- background worker thread (scan/pump/classify)
//!  └─ drain loop          -- logs each drained event until Ctrl-C
//! ```

#[cfg(target_os = "linux")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use tracing::info;
    use tracing_subscriber::EnvFilter;

    use camgrid_input::infrastructure::device_scan::evdev::EvdevScanner;
    use camgrid_input::infrastructure::storage::config::load_config;
    use camgrid_input::InputMonitor;

    let config = load_config()?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.monitor.log_level.clone())),
        )
        .init();

    info!("CamGrid input monitor starting");

    let monitor = InputMonitor::start(
        config.monitor.to_monitor_config(),
        Box::new(EvdevScanner::new()),
    )?;

    // Shutdown flag raised by the Ctrl-C handler.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!("CamGrid input monitor ready.  Press Ctrl-C to exit.");

    while running.load(Ordering::Relaxed) {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        for event in monitor.drain() {
            info!(
                kind = ?event.kind,
                code = event.code,
                value = event.value,
                "input event"
            );
        }
    }

    monitor.stop();
    drop(monitor);
    info!("CamGrid input monitor stopped");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("the CamGrid input monitor requires Linux evdev support");
}
