//! Input device discovery and non-blocking event reads.
//!
//! The production backend enumerates Linux evdev devices and drains them
//! without ever blocking the worker thread.  Devices come and go at
//! runtime (USB keyboards unplugged, touch controllers re-probed), so the
//! worker periodically asks the scanner for a fresh set and replaces its
//! previous one wholesale.
//!
//! # Failure policy
//!
//! Nothing in this module is fatal.  A device that cannot be opened is
//! skipped for the cycle; a device that fails mid-read is skipped for the
//! cycle and re-examined after the next rescan; an enumeration failure
//! simply yields zero devices.  The taxonomy below exists so the pump can
//! match the *specific* recoverable conditions instead of swallowing
//! everything.
//!
//! # Testability
//!
//! The [`DeviceScanner`] and [`InputDevice`] traits allow tests to inject
//! synthetic devices without `/dev/input` access or special group
//! membership.

use camgrid_core::InputEvent;
use thiserror::Error;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod evdev;

/// Transient, per-device read failure.
///
/// Consumed by the event pump; never crosses the monitor facade.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device disappeared (unplugged, revoked).
    #[error("device disconnected")]
    Disconnected,

    /// Any other read failure on the device node.
    #[error("device read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// An open input device supporting non-blocking reads.
pub trait InputDevice: Send {
    /// Human-readable identifier, used only for logging.
    fn name(&self) -> &str;

    /// Attempts one non-blocking read.
    ///
    /// Returns `Ok(Some(event))` when an event was ready, `Ok(None)` when
    /// nothing is currently available (would-block), and `Err` on a read
    /// failure.  Dropping the device closes its handle.
    fn read_event(&mut self) -> Result<Option<InputEvent>, DeviceError>;
}

/// Enumerates the currently attached input devices.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceScanner: Send {
    /// Re-enumerates attached devices, opening each for non-blocking
    /// reads.
    ///
    /// Devices that fail to open or configure are skipped; an enumeration
    /// failure yields an empty set.  Callers replace their previous device
    /// list with the returned one so that stale handles are closed.
    fn scan(&mut self) -> Vec<Box<dyn InputDevice>>;
}
