//! Mock device backend for tests.
//!
//! Allows tests to inject synthetic [`InputEvent`]s without `/dev/input`
//! access, and to observe how many devices the worker currently holds
//! open.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use camgrid_core::InputEvent;

use super::{DeviceError, DeviceScanner, InputDevice};

/// Shared event script feeding every device a [`MockScanner`] hands out.
///
/// Cloning the script clones the handle, not the events: a test keeps one
/// clone to inject with while the scanner's devices consume from the same
/// buffer.
#[derive(Clone, Default)]
pub struct EventScript {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl EventScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event as if the hardware had produced it.
    pub fn inject(&self, event: InputEvent) {
        self.events.lock().expect("lock poisoned").push_back(event);
    }

    /// Queues a batch of events in order.
    pub fn inject_all(&self, events: impl IntoIterator<Item = InputEvent>) {
        let mut queue = self.events.lock().expect("lock poisoned");
        queue.extend(events);
    }

    fn pop(&self) -> Option<InputEvent> {
        self.events.lock().expect("lock poisoned").pop_front()
    }
}

/// A mock device that replays its script and then reports would-block.
pub struct MockDevice {
    name: String,
    script: EventScript,
    /// When set, every read fails instead of consulting the script.
    fail_reads: bool,
    /// Decremented on drop so tests can assert handle release.
    open_count: Option<Arc<AtomicUsize>>,
}

impl MockDevice {
    /// Creates a device replaying `script`.
    pub fn new(name: impl Into<String>, script: EventScript) -> Self {
        Self {
            name: name.into(),
            script,
            fail_reads: false,
            open_count: None,
        }
    }

    /// Creates a device whose every read fails with
    /// [`DeviceError::Disconnected`].
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: EventScript::new(),
            fail_reads: true,
            open_count: None,
        }
    }

    fn tracked(mut self, open_count: Arc<AtomicUsize>) -> Self {
        open_count.fetch_add(1, Ordering::SeqCst);
        self.open_count = Some(open_count);
        self
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        if let Some(count) = &self.open_count {
            count.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl InputDevice for MockDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_event(&mut self) -> Result<Option<InputEvent>, DeviceError> {
        if self.fail_reads {
            return Err(DeviceError::Disconnected);
        }
        Ok(self.script.pop())
    }
}

/// A mock scanner handing out one scripted device per scan.
pub struct MockScanner {
    script: EventScript,
    scans: Arc<AtomicUsize>,
    open_devices: Arc<AtomicUsize>,
}

impl MockScanner {
    pub fn new(script: EventScript) -> Self {
        Self {
            script,
            scans: Arc::new(AtomicUsize::new(0)),
            open_devices: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of completed scans; clone before moving the scanner into
    /// the monitor.
    pub fn scan_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.scans)
    }

    /// Counter of devices currently held open by whoever scanned; reaches
    /// zero once all handed-out devices have been dropped.
    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open_devices)
    }
}

impl DeviceScanner for MockScanner {
    fn scan(&mut self) -> Vec<Box<dyn InputDevice>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let device = MockDevice::new("mock-touch", self.script.clone())
            .tracked(Arc::clone(&self.open_devices));
        vec![Box::new(device)]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use camgrid_core::codes::BTN_TOUCH;
    use camgrid_core::events::VALUE_PRESS;
    use std::time::SystemTime;

    fn press() -> InputEvent {
        InputEvent::key(BTN_TOUCH, VALUE_PRESS, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn test_mock_device_replays_injected_events_in_order() {
        // Arrange
        let script = EventScript::new();
        let mut device = MockDevice::new("test", script.clone());
        script.inject(InputEvent::key(1, 0, SystemTime::UNIX_EPOCH));
        script.inject(InputEvent::key(2, 0, SystemTime::UNIX_EPOCH));

        // Act / Assert
        assert_eq!(device.read_event().unwrap().unwrap().code, 1);
        assert_eq!(device.read_event().unwrap().unwrap().code, 2);
    }

    #[test]
    fn test_mock_device_reports_would_block_when_script_is_empty() {
        let script = EventScript::new();
        let mut device = MockDevice::new("test", script);
        assert!(device.read_event().unwrap().is_none());
    }

    #[test]
    fn test_failing_device_errors_on_every_read() {
        let mut device = MockDevice::failing("broken");
        assert!(matches!(
            device.read_event(),
            Err(DeviceError::Disconnected)
        ));
        assert!(matches!(
            device.read_event(),
            Err(DeviceError::Disconnected)
        ));
    }

    #[test]
    fn test_scanner_counts_scans_and_open_devices() {
        // Arrange
        let mut scanner = MockScanner::new(EventScript::new());
        let scans = scanner.scan_counter();
        let open = scanner.open_counter();

        // Act – two scans, keeping only the second device set
        let first = scanner.scan();
        let second = scanner.scan();
        drop(first);

        // Assert
        assert_eq!(scans.load(Ordering::SeqCst), 2);
        assert_eq!(open.load(Ordering::SeqCst), 1);

        drop(second);
        assert_eq!(open.load(Ordering::SeqCst), 0, "all handles released");
    }

    #[test]
    fn test_scanner_devices_share_one_script() {
        // Arrange
        let script = EventScript::new();
        let mut scanner = MockScanner::new(script.clone());
        let mut devices = scanner.scan();
        script.inject(press());

        // Act – rescan replaces the device; the event must still be
        // visible through the replacement
        let mut replacement = scanner.scan();
        drop(devices.pop());

        // Assert
        let event = replacement[0].read_event().unwrap();
        assert_eq!(event.map(|e| e.code), Some(BTN_TOUCH));
    }
}
