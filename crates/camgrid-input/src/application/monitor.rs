//! The input monitor: background worker plus host-facing facade.
//!
//! One worker thread runs the Scan → Pump → Classify → Enqueue cycle for
//! the monitor's lifetime.  The host holds an [`InputMonitor`] and only
//! ever drains the queue or requests shutdown; neither operation blocks,
//! and nothing the devices do can stall the host.
//!
//! # Lifecycle
//!
//! Shutdown is cooperative and explicitly owned: [`InputMonitor::stop`]
//! raises a flag the worker observes at the top of its next cycle, and
//! dropping the monitor stops it and waits for the worker to release its
//! device handles.  The worker never inspects other threads' liveness.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use camgrid_core::{CategoryMask, EventQueue, GestureRecognizer, InputEvent};
use thiserror::Error;
use tracing::{debug, info};

use crate::infrastructure::device_scan::{DeviceScanner, InputDevice};

/// Fixed delay between pump passes.
///
/// Back-to-back reads on the same cycle can miss interleaved button
/// transitions on some touch controllers; the pause is unconditional, not
/// data-dependent.
const POLL_DELAY: Duration = Duration::from_millis(25);

/// Default interval between device rescans.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(2500);

/// Construction parameters recognized by the monitor.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Which passthrough key transitions are forwarded.
    pub categories: CategoryMask,
    /// How often the device set is re-enumerated.
    pub scan_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            categories: CategoryMask::all(),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }
}

/// Error type for monitor construction.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The worker thread could not be spawned.
    #[error("failed to spawn monitor worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Host-facing handle over the background input monitor.
pub struct InputMonitor {
    queue: Arc<EventQueue>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl InputMonitor {
    /// Starts the worker thread with the given device scanner.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Spawn`] if the OS refuses the thread; this
    /// is the only way construction can fail.
    pub fn start(
        config: MonitorConfig,
        scanner: Box<dyn DeviceScanner>,
    ) -> Result<Self, MonitorError> {
        let queue = Arc::new(EventQueue::new());
        let running = Arc::new(AtomicBool::new(true));

        let worker_queue = Arc::clone(&queue);
        let worker_running = Arc::clone(&running);
        let worker = thread::Builder::new()
            .name("camgrid-monitor".to_string())
            .spawn(move || worker_loop(config, scanner, worker_queue, worker_running))
            .map_err(MonitorError::Spawn)?;

        Ok(Self {
            queue,
            running,
            worker: Some(worker),
        })
    }

    /// Removes and returns all queued events in FIFO order.
    ///
    /// Never blocks; returns an empty vector when nothing is queued.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.drain()
    }

    /// Requests worker shutdown.
    ///
    /// Idempotent and non-blocking: the worker observes the flag at the
    /// top of its next cycle, closes all open devices, and exits.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

impl Drop for InputMonitor {
    fn drop(&mut self) {
        self.stop();
        if let Some(worker) = self.worker.take() {
            worker.join().ok();
        }
    }
}

/// The worker cycle: rescan when due, wait, pump every device.
fn worker_loop(
    config: MonitorConfig,
    mut scanner: Box<dyn DeviceScanner>,
    queue: Arc<EventQueue>,
    running: Arc<AtomicBool>,
) {
    let mut recognizer = GestureRecognizer::new(config.categories);
    let mut devices: Vec<Box<dyn InputDevice>> = Vec::new();
    let mut last_scan: Option<Instant> = None;

    info!("input monitor worker started");

    while running.load(Ordering::Relaxed) {
        let scan_due = last_scan.map_or(true, |at| at.elapsed() >= config.scan_interval);
        if scan_due {
            // Enumerate-and-replace: the previous set is closed before
            // enumerating so stale handles never outlive a rescan.
            devices.clear();
            devices = scanner.scan();
            last_scan = Some(Instant::now());
            debug!(devices = devices.len(), "rescanned input devices");
        }

        thread::sleep(POLL_DELAY);

        pump(&mut devices, &mut recognizer, &queue);
    }

    // Dropping the handles closes the devices.
    devices.clear();
    info!("input monitor worker stopped");
}

/// One pass over all devices: drain each until it has nothing ready, feed
/// the recognizer, enqueue whatever it emits.
///
/// A would-block result or a read error ends draining for that device for
/// this cycle only; the error is logged and never propagated.  A full
/// queue loses delivery of the event, never the recognizer's state
/// transition.
fn pump(
    devices: &mut [Box<dyn InputDevice>],
    recognizer: &mut GestureRecognizer,
    queue: &EventQueue,
) {
    for device in devices.iter_mut() {
        loop {
            match device.read_event() {
                Ok(Some(event)) => {
                    if let Some(out) = recognizer.handle(event, Instant::now()) {
                        queue.push(out);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(
                        device = device.name(),
                        error = %e,
                        "device read failed, skipping for this cycle"
                    );
                    break;
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
