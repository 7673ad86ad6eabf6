//! Linux input event codes used by the monitor.
//!
//! These are the numeric values from the kernel's `input-event-codes.h`.
//! The monitor only ever interprets or synthesizes this handful of codes;
//! every other key code passes through opaquely, so there is no need for a
//! full translation table.
//!
//! The constants live here rather than coming from an evdev binding so that
//! this crate stays free of OS-specific dependencies: the codes are a wire
//! convention between the device backend, the recognizer, and the host.

/// Touch contact button.  Consumed entirely by the gesture recognizer and
/// never forwarded as a passthrough event.
pub const BTN_TOUCH: u16 = 0x14a;

/// Escape key, synthesized when a double tap leaves full-screen mode.
pub const KEY_ESC: u16 = 1;

/// Digit keys 1–4, synthesized for quadrant selection in grid mode.
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;

/// Arrow keys, synthesized for swipe navigation.
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;

/// Absolute axis codes reported by the touch surface.
pub const ABS_X: u16 = 0;
pub const ABS_Y: u16 = 1;
