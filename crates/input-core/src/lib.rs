//! Core types for console controller input emulation.
//!
//! The input-polling layer (host keyboard, joystick, mouse) resolves raw
//! device input into logical [`Event`]s and stores their current state in
//! an [`EventState`] table. Controller emulations read that table once per
//! emulated frame and drive the digital pins of their port, which the
//! memory-bus emulation reads back.

mod autofire;
mod controller;
mod event;
mod observable;
mod pins;

pub use autofire::AutoFire;
pub use controller::{Controller, ControllerType, Jack};
pub use event::{Event, EventState};
pub use observable::{Observable, Value};
pub use pins::{DigitalPin, DigitalPins};
