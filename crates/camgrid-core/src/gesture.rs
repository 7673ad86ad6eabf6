//! Tap/swipe gesture recognition over interleaved key and axis events.
//!
//! The recognizer consumes the raw event stream of a single-contact touch
//! surface plus any number of plain keys, and produces at most one output
//! event per input event:
//!
//! - plain key transitions in an enabled category pass through unchanged;
//! - a double tap (two contact presses within [`DOUBLE_TAP_WINDOW`])
//!   synthesizes a quadrant digit while the host shows the overview grid,
//!   or escape while a stream is full-screened, and toggles between the
//!   two modes;
//! - a horizontal swipe (contact release with more than [`SWIPE_THRESHOLD`]
//!   pixels of X displacement since the contact began) synthesizes an
//!   arrow key and cancels any pending tap.
//!
//! # Why swipe-start capture is deferred
//!
//! When the contact-begin event arrives, the device has not yet delivered
//! the position of the new contact — the last known coordinates still
//! belong to the previous contact.  The recognizer therefore arms a
//! one-shot "grab" flag per axis and records the swipe start from the first
//! axis sample that follows, which is the first position that actually
//! describes the new contact.
//!
//! # Direction convention
//!
//! A right-to-left finger motion synthesizes KEY_RIGHT and vice versa: the
//! host navigates to the *next* stream when the user drags the current one
//! off to the left.  This mapping is the host's navigation convention and
//! is deliberate.
//!
//! The recognizer owns all gesture state and exposes only read-only
//! snapshots.  It performs no I/O and never looks at the clock itself; the
//! caller passes `now` into [`GestureRecognizer::handle`], which keeps
//! every transition deterministic under test.

use std::time::{Duration, Instant, SystemTime};

use crate::codes::{
    ABS_X, ABS_Y, BTN_TOUCH, KEY_1, KEY_2, KEY_3, KEY_4, KEY_ESC, KEY_LEFT, KEY_RIGHT,
};
use crate::events::{CategoryMask, EventKind, InputEvent, VALUE_PRESS, VALUE_RELEASE};

/// Two contact presses within this window form a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(500);

/// A contact is a swipe when its X displacement exceeds this many device
/// units at release.
pub const SWIPE_THRESHOLD: i32 = 150;

/// Column split of the 2×2 quadrant grid: `x < 400` is the left column.
const QUADRANT_SPLIT_X: i32 = 400;

/// Row split of the 2×2 quadrant grid: `y < 240` is the top row.
const QUADRANT_SPLIT_Y: i32 = 240;

/// Single-contact tap/swipe recognizer.
///
/// One instance is owned by the monitor worker; nothing else mutates it.
pub struct GestureRecognizer {
    /// Enabled passthrough categories for plain key events.
    filter: CategoryMask,
    /// Last known pointer position.
    x: i32,
    y: i32,
    /// `true` while the host shows the overview grid, `false` while a
    /// single stream is full-screened.  Toggled exactly once per completed
    /// double tap.
    in_grid: bool,
    /// Time of the pending first tap, `None` when no tap is pending.
    first_tap: Option<Instant>,
    /// Position captured at the start of the current contact.
    swipe_start_x: i32,
    swipe_start_y: i32,
    /// One-shot flags: the next sample on this axis is the authoritative
    /// swipe start.  Cleared independently per axis.
    grab_swipe_start_x: bool,
    grab_swipe_start_y: bool,
}

impl GestureRecognizer {
    /// Creates a recognizer with the given passthrough filter.
    ///
    /// The host starts up showing the overview grid, so `in_grid` begins
    /// `true`.
    pub fn new(filter: CategoryMask) -> Self {
        Self {
            filter,
            x: 0,
            y: 0,
            in_grid: true,
            first_tap: None,
            swipe_start_x: 0,
            swipe_start_y: 0,
            grab_swipe_start_x: false,
            grab_swipe_start_y: false,
        }
    }

    /// Last known pointer position.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// `true` while the recognizer believes the host shows the grid.
    pub fn in_grid(&self) -> bool {
        self.in_grid
    }

    /// Feeds one raw event through the state machine.
    ///
    /// `now` is the monotonic receive time of the event, used only for the
    /// double-tap window.  Returns the passthrough or synthesized event to
    /// deliver, if any.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<InputEvent> {
        match event.kind {
            EventKind::Key if event.code == BTN_TOUCH => match event.value {
                VALUE_PRESS => self.on_contact_begin(event.time, now),
                VALUE_RELEASE => self.on_contact_end(event.time),
                // Autorepeat of the contact button carries no gesture
                // information.
                _ => None,
            },
            EventKind::Key => self.filter.matches_value(event.value).then_some(event),
            EventKind::Axis => {
                self.on_axis(event.code, event.value);
                None
            }
        }
    }

    /// Contact begin: first press arms a pending tap, a second press within
    /// the window completes a double tap, a late second press restarts the
    /// pending tap with a fresh deadline.
    fn on_contact_begin(&mut self, time: SystemTime, now: Instant) -> Option<InputEvent> {
        match self.first_tap {
            Some(first) if now.duration_since(first) < DOUBLE_TAP_WINDOW => {
                self.first_tap = None;
                Some(self.double_tap_command(time))
            }
            _ => {
                self.first_tap = Some(now);
                self.grab_swipe_start_x = true;
                self.grab_swipe_start_y = true;
                None
            }
        }
    }

    /// Contact end: classify the whole contact as a swipe or not.
    ///
    /// Only X displacement participates in the classification; Y is tracked
    /// for quadrant selection but never gates a swipe.
    fn on_contact_end(&mut self, time: SystemTime) -> Option<InputEvent> {
        let dx = self.x - self.swipe_start_x;
        if dx.abs() > SWIPE_THRESHOLD {
            // A swipe consumes the contact: whatever tap was pending is no
            // longer a tap.
            self.first_tap = None;
            let code = if dx < 0 { KEY_RIGHT } else { KEY_LEFT };
            Some(InputEvent::command(code, time))
        } else {
            None
        }
    }

    /// Completed double tap: quadrant digit in grid mode, escape otherwise.
    fn double_tap_command(&mut self, time: SystemTime) -> InputEvent {
        if self.in_grid {
            self.in_grid = false;
            let code = match (self.x < QUADRANT_SPLIT_X, self.y < QUADRANT_SPLIT_Y) {
                (true, true) => KEY_1,
                (false, true) => KEY_2,
                (true, false) => KEY_3,
                (false, false) => KEY_4,
            };
            InputEvent::command(code, time)
        } else {
            self.in_grid = true;
            InputEvent::command(KEY_ESC, time)
        }
    }

    /// Axis sample: track the position and satisfy a pending swipe-start
    /// grab for this axis.
    fn on_axis(&mut self, code: u16, value: i32) {
        match code {
            ABS_X => {
                self.x = value;
                if self.grab_swipe_start_x {
                    self.swipe_start_x = value;
                    self.grab_swipe_start_x = false;
                }
            }
            ABS_Y => {
                self.y = value;
                if self.grab_swipe_start_y {
                    self.swipe_start_y = value;
                    self.grab_swipe_start_y = false;
                }
            }
            _ => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
