//! Linux evdev device backend.
//!
//! Reads input events directly from `/dev/input/event*`, which works the
//! same whether the appliance runs X, a Wayland compositor, or bare KMS.
//! The process must be able to open the device nodes — on most
//! distributions that means membership in the `input` group.
//!
//! Each opened device is switched to non-blocking mode so a drained device
//! returns `WouldBlock` instead of stalling the pump.  Only `EV_KEY` and
//! `EV_ABS` events are surfaced; synchronization and misc events carry no
//! information the recognizer uses and are filtered out here.

#![cfg(target_os = "linux")]

use std::collections::VecDeque;
use std::io;
use std::os::unix::io::AsRawFd;

use camgrid_core::{EventKind, InputEvent};
use tracing::debug;

use super::{DeviceError, DeviceScanner, InputDevice};

/// Scanner over the kernel's evdev device nodes.
pub struct EvdevScanner;

impl EvdevScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EvdevScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceScanner for EvdevScanner {
    fn scan(&mut self) -> Vec<Box<dyn InputDevice>> {
        let mut devices: Vec<Box<dyn InputDevice>> = Vec::new();
        for (path, device) in evdev::enumerate() {
            match EvdevDevice::new(device) {
                Ok(dev) => devices.push(Box::new(dev)),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping input device");
                }
            }
        }
        devices
    }
}

/// A single open evdev device.
///
/// `fetch_events` hands back a whole batch per read, so events beyond the
/// first are buffered and replayed one at a time through [`read_event`].
///
/// [`read_event`]: InputDevice::read_event
struct EvdevDevice {
    name: String,
    inner: evdev::Device,
    pending: VecDeque<InputEvent>,
}

impl EvdevDevice {
    fn new(device: evdev::Device) -> io::Result<Self> {
        set_nonblocking(&device)?;
        let name = device
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| "unnamed input device".to_owned());
        Ok(Self {
            name,
            inner: device,
            pending: VecDeque::new(),
        })
    }
}

impl InputDevice for EvdevDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_event(&mut self) -> Result<Option<InputEvent>, DeviceError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            match self.inner.fetch_events() {
                Ok(events) => self.pending.extend(events.filter_map(convert)),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                Err(e) if e.raw_os_error() == Some(libc::ENODEV) => {
                    return Err(DeviceError::Disconnected)
                }
                Err(e) => return Err(DeviceError::Io(e)),
            }
        }
    }
}

/// Maps an evdev event to the monitor's event model.
///
/// Returns `None` for event types the monitor does not interpret (SYN,
/// MSC, LED, ...).
fn convert(event: evdev::InputEvent) -> Option<InputEvent> {
    match event.kind() {
        evdev::InputEventKind::Key(key) => Some(InputEvent {
            kind: EventKind::Key,
            code: key.code(),
            value: event.value(),
            time: event.timestamp(),
        }),
        evdev::InputEventKind::AbsAxis(axis) => Some(InputEvent {
            kind: EventKind::Axis,
            code: axis.0,
            value: event.value(),
            time: event.timestamp(),
        }),
        _ => None,
    }
}

/// Puts the device fd into non-blocking mode.
fn set_nonblocking(device: &evdev::Device) -> io::Result<()> {
    let fd = device.as_raw_fd();

    // SAFETY: fcntl on a valid fd owned by `device`; F_GETFL reads the
    // status flags and has no other effect.
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: only the O_NONBLOCK flag is added to the flags read above.
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
