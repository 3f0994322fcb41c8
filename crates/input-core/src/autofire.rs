//! Auto-fire shaping.
//!
//! Converts a held fire signal into periodic pulses so games that require
//! repeated presses can be played with the button held down. The shaper
//! is stepped once per emulated frame alongside the controller.

/// Emulated frame rate the pulse timing is derived from.
const FRAME_RATE: u32 = 60;

/// Maximum pulses per second (one on-frame, one off-frame per pulse).
pub const MAX_AUTO_FIRE_RATE: u32 = FRAME_RATE / 2;

/// Frame-stepped auto-fire oscillator.
///
/// At rate 0 the signal passes through unshaped. At rate `r` a held
/// button produces `r` pulses per second with a 50% duty cycle.
/// Releasing the button resets the phase, so the next press always
/// starts with the fire signal asserted.
#[derive(Debug, Clone)]
pub struct AutoFire {
    rate: u32,
    phase: u32,
}

impl AutoFire {
    #[must_use]
    pub fn new(rate: u32) -> Self {
        Self {
            rate: rate.min(MAX_AUTO_FIRE_RATE),
            phase: 0,
        }
    }

    /// Change the pulse rate (0 disables shaping). Clamped to
    /// [`MAX_AUTO_FIRE_RATE`].
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate.min(MAX_AUTO_FIRE_RATE);
        self.phase = 0;
    }

    #[must_use]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Advance one frame and shape the fire signal.
    #[must_use]
    pub fn shape(&mut self, pressed: bool) -> bool {
        if self.rate == 0 || !pressed {
            self.phase = 0;
            return pressed;
        }
        let period = FRAME_RATE / self.rate;
        let firing = self.phase < period.div_ceil(2);
        self.phase = (self.phase + 1) % period;
        firing
    }
}

impl Default for AutoFire {
    fn default() -> Self {
        Self::new(0)
    }
}
