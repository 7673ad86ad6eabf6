//! Application layer of the input monitor.
//!
//! The single use case here is the monitor itself: own the background
//! worker that runs the Scan → Pump → Classify → Enqueue cycle, and give
//! the host a non-blocking facade over the result.
//!
//! The layer depends only on the `camgrid-core` domain types and on the
//! device traits from `infrastructure::device_scan`; concrete device
//! backends are injected at construction time, which keeps the worker loop
//! fully testable with scripted devices.

pub mod monitor;
