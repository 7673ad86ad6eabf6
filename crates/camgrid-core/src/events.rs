//! Input events and the passthrough category filter.
//!
//! Raw device events and synthesized commands share one shape: the host
//! consumes both from the same queue and interprets them by key code, so
//! there is no separate "command" type.  A synthesized command is simply a
//! key press event carrying the timestamp of the raw event that triggered
//! it.
//!
//! ## Value conventions
//!
//! Key events use the Linux evdev transition values:
//! `0` = release, `1` = press, `2` = hold (autorepeat).  Axis events carry
//! the absolute position reported by the device; the range is defined by
//! the hardware and is not normalized here.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Key transition value for a release event.
pub const VALUE_RELEASE: i32 = 0;
/// Key transition value for a press event.
pub const VALUE_PRESS: i32 = 1;
/// Key transition value for a hold (autorepeat) event.
pub const VALUE_HOLD: i32 = 2;

/// Broad class of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A key or button transition (`EV_KEY`).
    Key,
    /// An absolute axis sample (`EV_ABS`).
    Axis,
}

/// A single input event, either read from a device or synthesized by the
/// gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// Event class.
    pub kind: EventKind,
    /// Key or axis code (see [`crate::codes`] for the codes the monitor
    /// itself interprets).
    pub code: u16,
    /// Transition value for keys, absolute position for axes.
    pub value: i32,
    /// Device-reported capture time.
    pub time: SystemTime,
}

impl InputEvent {
    /// Creates a key event.
    pub fn key(code: u16, value: i32, time: SystemTime) -> Self {
        Self {
            kind: EventKind::Key,
            code,
            value,
            time,
        }
    }

    /// Creates an absolute axis event.
    pub fn axis(code: u16, value: i32, time: SystemTime) -> Self {
        Self {
            kind: EventKind::Axis,
            code,
            value,
            time,
        }
    }

    /// Creates a synthesized command: a key press stamped with the time of
    /// the raw event that triggered it.
    pub fn command(code: u16, time: SystemTime) -> Self {
        Self::key(code, VALUE_PRESS, time)
    }
}

/// A passthrough key-transition category.
///
/// The serde names are the lowercase category names accepted in the TOML
/// configuration, so an unknown category is rejected at parse time rather
/// than silently ignored at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Release,
    Press,
    Hold,
}

impl Category {
    /// Maps a raw key transition value to its category.
    ///
    /// Returns `None` for values outside the evdev `0`/`1`/`2` convention;
    /// such events match no category and are never forwarded.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            VALUE_RELEASE => Some(Category::Release),
            VALUE_PRESS => Some(Category::Press),
            VALUE_HOLD => Some(Category::Hold),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Category::Release => CategoryMask::RELEASE,
            Category::Press => CategoryMask::PRESS,
            Category::Hold => CategoryMask::HOLD,
        }
    }
}

/// Bitmask of enabled passthrough categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMask(pub u8);

impl CategoryMask {
    pub const RELEASE: u8 = 1 << 0;
    pub const PRESS: u8 = 1 << 1;
    pub const HOLD: u8 = 1 << 2;

    /// All three categories enabled.
    pub fn all() -> Self {
        Self(Self::RELEASE | Self::PRESS | Self::HOLD)
    }

    /// No categories enabled; every passthrough key event is suppressed.
    pub fn none() -> Self {
        Self(0)
    }

    /// Builds a mask from a validated category list.
    pub fn from_categories(categories: &[Category]) -> Self {
        Self(categories.iter().fold(0, |mask, c| mask | c.bit()))
    }

    /// Returns `true` if `category` is enabled.
    pub fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    /// Returns `true` if a key event with this raw transition value should
    /// be forwarded.
    pub fn matches_value(self, value: i32) -> bool {
        Category::from_value(value).is_some_and(|c| self.contains(c))
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        Self::all()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_value_maps_evdev_convention() {
        assert_eq!(Category::from_value(0), Some(Category::Release));
        assert_eq!(Category::from_value(1), Some(Category::Press));
        assert_eq!(Category::from_value(2), Some(Category::Hold));
    }

    #[test]
    fn test_category_from_value_rejects_unknown_values() {
        assert_eq!(Category::from_value(3), None);
        assert_eq!(Category::from_value(-1), None);
    }

    #[test]
    fn test_mask_all_matches_every_transition_value() {
        // Arrange
        let mask = CategoryMask::all();

        // Act / Assert
        assert!(mask.matches_value(0));
        assert!(mask.matches_value(1));
        assert!(mask.matches_value(2));
        assert!(!mask.matches_value(7), "non-transition values never match");
    }

    #[test]
    fn test_mask_from_categories_is_selective() {
        // Arrange
        let mask = CategoryMask::from_categories(&[Category::Press]);

        // Act / Assert
        assert!(mask.matches_value(1));
        assert!(!mask.matches_value(0));
        assert!(!mask.matches_value(2));
    }

    #[test]
    fn test_mask_none_matches_nothing() {
        let mask = CategoryMask::none();
        assert!(!mask.matches_value(0));
        assert!(!mask.matches_value(1));
        assert!(!mask.matches_value(2));
    }

    #[test]
    fn test_default_mask_enables_all_categories() {
        assert_eq!(CategoryMask::default(), CategoryMask::all());
    }

    #[test]
    fn test_command_event_carries_press_value() {
        // Arrange
        let time = std::time::SystemTime::UNIX_EPOCH;

        // Act
        let event = InputEvent::command(crate::codes::KEY_ESC, time);

        // Assert
        assert_eq!(event.kind, EventKind::Key);
        assert_eq!(event.value, VALUE_PRESS);
        assert_eq!(event.time, time);
    }
}
