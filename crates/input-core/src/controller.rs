//! Controller port abstraction.

use crate::{DigitalPin, EventState};

/// A physical controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jack {
    Left,
    Right,
}

impl Jack {
    /// Port number as used by mouse-binding ids (Left = 0, Right = 1).
    #[must_use]
    pub fn port_id(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// The kind of peripheral plugged into a jack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    Joystick,
    Paddles,
    Driving,
}

/// A peripheral plugged into a controller jack.
///
/// Controllers are stepped once per emulated frame from the machine's
/// main loop: they read the shared [`EventState`] and update their pin
/// levels, which the memory-bus emulation reads back through [`read`].
///
/// [`read`]: Controller::read
pub trait Controller {
    fn controller_type(&self) -> ControllerType;

    fn jack(&self) -> Jack;

    /// Sample the event state and refresh pin levels. Called once per
    /// emulated frame; always runs to completion.
    fn update(&mut self, events: &EventState);

    /// Current level of a digital pin, as seen by the bus.
    fn read(&self, pin: DigitalPin) -> bool;

    /// Rebind which host-mouse axes and buttons feed this controller.
    ///
    /// Ids identify the virtual controller a mouse axis is assigned to
    /// (0 = left jack, 1 = right jack). Combinations the controller cannot
    /// honour leave it unbound; the call itself always succeeds.
    fn set_mouse_control(
        &mut self,
        xtype: ControllerType,
        xid: i32,
        ytype: ControllerType,
        yid: i32,
    ) -> bool {
        let _ = (xtype, xid, ytype, yid);
        true
    }
}
