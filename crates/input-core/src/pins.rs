//! Digital pin state for a controller port.
//!
//! A VCS controller jack exposes nine pins. Pins 1-4 and 6 are digital
//! and readable through the RIOT/TIA; pins 5 and 9 are analog (paddle
//! pots) and out of scope here; 7 and 8 are +5V and ground.

/// One of the digital pins on a controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalPin {
    One,
    Two,
    Three,
    Four,
    Six,
}

impl DigitalPin {
    fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
            Self::Four => 3,
            Self::Six => 4,
        }
    }
}

/// Levels of the five digital pins of one port.
///
/// All pins idle high (the port has pull-ups); controllers pull pins low
/// to signal activity.
#[derive(Debug, Clone)]
pub struct DigitalPins {
    levels: [bool; 5],
}

impl DigitalPins {
    #[must_use]
    pub fn new() -> Self {
        Self { levels: [true; 5] }
    }

    /// Set a pin's logic level.
    pub fn set(&mut self, pin: DigitalPin, level: bool) {
        self.levels[pin.index()] = level;
    }

    /// Current logic level of a pin.
    #[must_use]
    pub fn get(&self, pin: DigitalPin) -> bool {
        self.levels[pin.index()]
    }
}

impl Default for DigitalPins {
    fn default() -> Self {
        Self::new()
    }
}
