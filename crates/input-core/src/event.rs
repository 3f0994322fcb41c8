//! Logical input events and their shared state table.
//!
//! Events are the currency between the host input layer and the emulated
//! controllers: the host resolves scancodes, gamepad buttons and mouse
//! motion into events, and controllers only ever see event state.

use std::collections::HashMap;

/// A logical input event.
///
/// Digital events carry 0 (inactive) or nonzero (active). Analog paddle
/// axes carry a signed sample in roughly -32768..=32767. Mouse axis events
/// carry the relative motion since the last frame.
///
/// Each event has a stable numeric code used by the persisted mapping
/// formats; see [`Event::code`] and [`Event::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Event {
    /// Sentinel for "no event bound".
    NoType = 0,

    JoystickZeroLeft = 1,
    JoystickZeroRight = 2,
    JoystickZeroFire = 3,
    JoystickOneLeft = 4,
    JoystickOneRight = 5,
    JoystickOneFire = 6,
    JoystickTwoLeft = 7,
    JoystickTwoRight = 8,
    JoystickTwoFire = 9,
    JoystickThreeLeft = 10,
    JoystickThreeRight = 11,
    JoystickThreeFire = 12,

    PaddleZeroAnalog = 13,
    PaddleOneAnalog = 14,
    PaddleTwoAnalog = 15,
    PaddleThreeAnalog = 16,

    MouseAxisXMove = 17,
    MouseAxisYMove = 18,
    MouseButtonLeft = 19,
    MouseButtonRight = 20,

    ConsoleSelect = 21,
    ConsoleReset = 22,
}

impl Event {
    /// Stable numeric code for persistence.
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up an event by its numeric code.
    ///
    /// Returns `None` for unknown codes (including the codes of events a
    /// newer format revision might add).
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        let event = match code {
            0 => Self::NoType,
            1 => Self::JoystickZeroLeft,
            2 => Self::JoystickZeroRight,
            3 => Self::JoystickZeroFire,
            4 => Self::JoystickOneLeft,
            5 => Self::JoystickOneRight,
            6 => Self::JoystickOneFire,
            7 => Self::JoystickTwoLeft,
            8 => Self::JoystickTwoRight,
            9 => Self::JoystickTwoFire,
            10 => Self::JoystickThreeLeft,
            11 => Self::JoystickThreeRight,
            12 => Self::JoystickThreeFire,
            13 => Self::PaddleZeroAnalog,
            14 => Self::PaddleOneAnalog,
            15 => Self::PaddleTwoAnalog,
            16 => Self::PaddleThreeAnalog,
            17 => Self::MouseAxisXMove,
            18 => Self::MouseAxisYMove,
            19 => Self::MouseButtonLeft,
            20 => Self::MouseButtonRight,
            21 => Self::ConsoleSelect,
            22 => Self::ConsoleReset,
            _ => return None,
        };
        Some(event)
    }
}

/// Current state of every logical event.
///
/// Owned by the input-polling layer; controllers hold no reference to it
/// and instead receive it by reference once per `update()`. Events that
/// were never set read as 0.
#[derive(Debug, Default)]
pub struct EventState {
    values: HashMap<Event, i32>,
}

impl EventState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Current value of an event (0 if never set).
    #[must_use]
    pub fn get(&self, event: Event) -> i32 {
        self.values.get(&event).copied().unwrap_or(0)
    }

    /// Set an event's value. Digital sources use 0/1, analog sources the
    /// raw signed sample, mouse axes the per-frame delta.
    pub fn set(&mut self, event: Event, value: i32) {
        self.values.insert(event, value);
    }

    /// Reset every event to 0.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_events_read_zero() {
        let state = EventState::new();
        assert_eq!(state.get(Event::JoystickZeroFire), 0);
        assert_eq!(state.get(Event::PaddleTwoAnalog), 0);
    }

    #[test]
    fn set_then_get() {
        let mut state = EventState::new();
        state.set(Event::JoystickOneLeft, 1);
        state.set(Event::PaddleZeroAnalog, -20000);
        assert_eq!(state.get(Event::JoystickOneLeft), 1);
        assert_eq!(state.get(Event::PaddleZeroAnalog), -20000);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = EventState::new();
        state.set(Event::MouseAxisXMove, 5);
        state.clear();
        assert_eq!(state.get(Event::MouseAxisXMove), 0);
    }

    #[test]
    fn event_codes_round_trip() {
        for code in 0..=22 {
            let event = Event::from_code(code).expect("code in range");
            assert_eq!(event.code(), code);
        }
        assert_eq!(Event::from_code(23), None);
        assert_eq!(Event::from_code(u32::MAX), None);
    }
}
