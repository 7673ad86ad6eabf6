//! # camgrid-core
//!
//! Shared library for the CamGrid input monitor containing the event model,
//! the tap/swipe gesture recognizer, and the bounded hand-off queue.
//!
//! This crate is pure logic: it has zero dependencies on OS input APIs or
//! threads, which keeps every state transition unit-testable.  The
//! `camgrid-input` crate layers device access and the background worker on
//! top of it.
//!
//! # Architecture overview
//!
//! CamGrid is a camera-wall viewer: it shows an overview grid of video
//! streams and full-screens one of them on demand.  On the appliance the
//! only controls are a small touch surface and a handful of keys, so the
//! viewer is driven entirely by synthesized key commands:
//!
//! - **`events`** – The common event shape read from devices and handed to
//!   the host, plus the category filter for passthrough key transitions.
//!
//! - **`codes`** – The few Linux input event codes the monitor interprets
//!   or synthesizes (touch contact, axes, arrows, digits, escape).
//!
//! - **`gesture`** – The recognizer: a single-contact state machine that
//!   turns raw touch presses, releases, and axis samples into double-tap
//!   and swipe commands.
//!
//! - **`queue`** – The fixed-capacity FIFO that carries events from the
//!   monitor worker to the host without ever blocking either side.

pub mod codes;
pub mod events;
pub mod gesture;
pub mod queue;

// Re-export the most-used types at the crate root so callers can write
// `camgrid_core::InputEvent` instead of `camgrid_core::events::InputEvent`.
pub use events::{Category, CategoryMask, EventKind, InputEvent};
pub use gesture::GestureRecognizer;
pub use queue::EventQueue;
