//! Driving (steering wheel) controller emulation.
//!
//! The real driving controller is a free-spinning wheel whose shaft
//! drives a two-phase rotary encoder: pins 1 and 2 carry a 2-bit Gray
//! code that steps through one transition per detent, and pin 6 carries
//! the fire button. Pins 3 and 4 are not connected.
//!
//! This model accumulates rotation from three host sources — digital
//! CCW/CW events (keyboard or joystick), an analog X axis (a Stelladaptor
//! reporting a real wheel through the paddle range), and relative mouse
//! motion — then derives the Gray phase from the scaled counter. A
//! Stelladaptor's Y axis reports the encoder state directly and, after
//! jitter suppression, overrides the simulated phase.

use std::cell::Cell;
use std::rc::Rc;

use input_core::{
    AutoFire, Controller, ControllerType, DigitalPin, DigitalPins, Event, EventState, Jack,
    Observable, Value,
};

/// Lowest accepted sensitivity setting.
pub const MIN_SENSE: i32 = 1;
/// Highest accepted sensitivity setting.
pub const MAX_SENSE: i32 = 20;

/// Default sensitivity setting (scale factor 1.0).
const DEFAULT_SENSE: i32 = 10;

/// Analog X-axis magnitude that counts as a digital turn.
const X_AXIS_THRESHOLD: i32 = 16384;

/// Mouse delta magnitude that counts as a turn.
const MOUSE_THRESHOLD: i32 = 2;

/// Y-axis change below which a new Stelladaptor sample is treated as
/// signal jitter and ignored.
const Y_JITTER: i32 = 1024;

/// Gray codes for the four encoder phases: consecutive entries differ in
/// exactly one bit, in both rotation directions.
const GRAY_TABLE: [u8; 4] = [0x03, 0x01, 0x00, 0x02];

/// Steering sensitivity shared by every driving controller.
///
/// The original hardware has no such knob; this scales how many counter
/// steps make up one encoder detent. The handle is owned by the input
/// subsystem coordinator and cloned into each controller instance, so a
/// settings change is visible to all of them immediately.
#[derive(Debug, Clone)]
pub struct DrivingSensitivity(Rc<Cell<f32>>);

impl DrivingSensitivity {
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(DEFAULT_SENSE as f32 / 10.0)))
    }

    /// Change the sensitivity setting. Out-of-range settings clamp to the
    /// nearest bound.
    pub fn set(&self, setting: i32) {
        let setting = setting.clamp(MIN_SENSE, MAX_SENSE);
        self.0.set(setting as f32 / 10.0);
    }

    /// Current scale factor (setting / 10).
    #[must_use]
    pub fn factor(&self) -> f32 {
        self.0.get()
    }
}

impl Default for DrivingSensitivity {
    fn default() -> Self {
        Self::new()
    }
}

/// Which host-mouse axes and buttons feed a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseBinding {
    /// No mouse input.
    None,
    /// The whole mouse drives this controller: X axis plus both buttons.
    Tied(u8),
    /// Each mouse axis may drive a different controller. The X axis pairs
    /// with the left button, the Y axis with the right button.
    Untied { x: Option<u8>, y: Option<u8> },
}

/// A driving controller on one jack.
pub struct Driving {
    jack: Jack,
    ccw_event: Event,
    cw_event: Event,
    fire_event: Event,
    x_axis_event: Event,
    y_axis_event: Event,

    /// Cumulative rotation, signed.
    counter: i32,
    /// Current encoder phase, always 0..=3.
    gray_index: i32,
    /// Last Stelladaptor Y sample, for jitter suppression.
    last_y_axis: i32,

    binding: MouseBinding,
    sensitivity: DrivingSensitivity,
    autofire: AutoFire,
    pins: DigitalPins,
}

impl Driving {
    /// Create the controller for `jack`.
    ///
    /// `altmap` selects the alternate key-binding scheme (virtual sticks
    /// two and three instead of zero and one), so two players on the same
    /// keyboard don't collide. The sensitivity handle is shared with the
    /// coordinator and any other driving controllers.
    #[must_use]
    pub fn new(jack: Jack, altmap: bool, sensitivity: DrivingSensitivity) -> Self {
        let (ccw_event, cw_event, fire_event) = match (jack, altmap) {
            (Jack::Left, false) => (
                Event::JoystickZeroLeft,
                Event::JoystickZeroRight,
                Event::JoystickZeroFire,
            ),
            (Jack::Left, true) => (
                Event::JoystickTwoLeft,
                Event::JoystickTwoRight,
                Event::JoystickTwoFire,
            ),
            (Jack::Right, false) => (
                Event::JoystickOneLeft,
                Event::JoystickOneRight,
                Event::JoystickOneFire,
            ),
            (Jack::Right, true) => (
                Event::JoystickThreeLeft,
                Event::JoystickThreeRight,
                Event::JoystickThreeFire,
            ),
        };
        let (x_axis_event, y_axis_event) = match jack {
            Jack::Left => (Event::PaddleZeroAnalog, Event::PaddleOneAnalog),
            Jack::Right => (Event::PaddleTwoAnalog, Event::PaddleThreeAnalog),
        };

        let mut pins = DigitalPins::new();
        // Pins 3 and 4 are not connected and always read high
        pins.set(DigitalPin::Three, true);
        pins.set(DigitalPin::Four, true);

        Self {
            jack,
            ccw_event,
            cw_event,
            fire_event,
            x_axis_event,
            y_axis_event,
            counter: 0,
            gray_index: 0,
            last_y_axis: 0,
            binding: MouseBinding::None,
            sensitivity,
            autofire: AutoFire::default(),
            pins,
        }
    }

    /// Change the auto-fire pulse rate (0 disables shaping).
    pub fn set_autofire_rate(&mut self, rate: u32) {
        self.autofire.set_rate(rate);
    }

    #[must_use]
    pub fn mouse_binding(&self) -> MouseBinding {
        self.binding
    }

    /// Current encoder phase (0..=3).
    #[must_use]
    pub fn gray_index(&self) -> u8 {
        self.gray_index as u8
    }

    fn bump_counter(&mut self, delta: i32, threshold: i32) {
        if delta < -threshold {
            self.counter -= 1;
        } else if delta > threshold {
            self.counter += 1;
        }
    }
}

impl Controller for Driving {
    fn controller_type(&self) -> ControllerType {
        ControllerType::Driving
    }

    fn jack(&self) -> Jack {
        self.jack
    }

    fn update(&mut self, events: &EventState) {
        // Digital events from keyboard or joystick hats and buttons; the
        // Stelladaptor's X axis is an equivalent analog source for the
        // same counter adjustment
        let mut fire = events.get(self.fire_event) != 0;
        let x_axis = events.get(self.x_axis_event);
        if events.get(self.ccw_event) != 0 || x_axis < -X_AXIS_THRESHOLD {
            self.counter -= 1;
        } else if events.get(self.cw_event) != 0 || x_axis > X_AXIS_THRESHOLD {
            self.counter += 1;
        }

        // Mouse motion and buttons
        match self.binding {
            MouseBinding::Tied(_) => {
                self.bump_counter(events.get(Event::MouseAxisXMove), MOUSE_THRESHOLD);
                fire = fire
                    || events.get(Event::MouseButtonLeft) != 0
                    || events.get(Event::MouseButtonRight) != 0;
            }
            MouseBinding::Untied { x, y } => {
                if x.is_some() {
                    self.bump_counter(events.get(Event::MouseAxisXMove), MOUSE_THRESHOLD);
                    fire = fire || events.get(Event::MouseButtonLeft) != 0;
                }
                if y.is_some() {
                    self.bump_counter(events.get(Event::MouseAxisYMove), MOUSE_THRESHOLD);
                    fire = fire || events.get(Event::MouseButtonRight) != 0;
                }
            }
            MouseBinding::None => {}
        }

        // Fire is active-low on pin 6
        self.pins
            .set(DigitalPin::Six, !self.autofire.shape(fire));

        // Only the two lowest bits of the scaled rotation matter
        let sensitivity = self.sensitivity.factor();
        self.gray_index = (self.counter as f32 * sensitivity / 4.0) as i32 & 0b11;

        // A Stelladaptor reports the encoder state directly on the Y
        // axis. Only a real change (beyond analog jitter) overrides the
        // simulated phase.
        let y_axis = events.get(self.y_axis_event);
        if y_axis < self.last_y_axis - Y_JITTER || y_axis > self.last_y_axis + Y_JITTER {
            self.last_y_axis = y_axis;
            self.gray_index = if y_axis <= -16384 - 4096 {
                3 // up
            } else if y_axis > 16384 + 4096 {
                1 // down
            } else if y_axis >= 16384 - 4096 {
                2 // up + down
            } else {
                0 // no movement
            };
            // Keep keyboard/joystick adjustments consistent with the
            // adapter's absolute position
            self.counter = (self.gray_index as f32 / sensitivity * 4.0) as i32;
        }

        let gray = GRAY_TABLE[self.gray_index as usize];
        self.pins.set(DigitalPin::One, gray & 0x01 != 0);
        self.pins.set(DigitalPin::Two, gray & 0x02 != 0);
    }

    fn read(&self, pin: DigitalPin) -> bool {
        self.pins.get(pin)
    }

    fn set_mouse_control(
        &mut self,
        xtype: ControllerType,
        xid: i32,
        ytype: ControllerType,
        yid: i32,
    ) -> bool {
        let ours = self.jack.port_id();
        if xtype == ControllerType::Driving && ytype == ControllerType::Driving && xid == yid {
            // The whole mouse emulates a single driving controller: only
            // the X axis is used and both buttons fire
            self.binding = if xid == ours {
                MouseBinding::Tied(xid as u8)
            } else {
                MouseBinding::None
            };
        } else {
            // Each axis may be mapped to a separate driving controller,
            // with the corresponding button
            let x = (xtype == ControllerType::Driving && xid == ours).then_some(ours as u8);
            let y = (ytype == ControllerType::Driving && yid == ours).then_some(ours as u8);
            self.binding = if x.is_none() && y.is_none() {
                MouseBinding::None
            } else {
                MouseBinding::Untied { x, y }
            };
        }
        true
    }
}

impl Observable for Driving {
    fn query(&self, path: &str) -> Option<Value> {
        let value = match path {
            "counter" => Value::I32(self.counter),
            "gray_index" => Value::I32(self.gray_index),
            "gray" => Value::U8(GRAY_TABLE[self.gray_index as usize]),
            "sensitivity" => Value::F32(self.sensitivity.factor()),
            "pins.one" => Value::Bool(self.pins.get(DigitalPin::One)),
            "pins.two" => Value::Bool(self.pins.get(DigitalPin::Two)),
            "pins.six" => Value::Bool(self.pins.get(DigitalPin::Six)),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "counter",
            "gray_index",
            "gray",
            "sensitivity",
            "pins.one",
            "pins.two",
            "pins.six",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driving(jack: Jack) -> Driving {
        Driving::new(jack, false, DrivingSensitivity::new())
    }

    fn press(events: &mut EventState, event: Event) {
        events.set(event, 1);
    }

    #[test]
    fn gray_table_steps_one_bit_at_a_time() {
        for i in 0..4 {
            let a = GRAY_TABLE[i];
            let b = GRAY_TABLE[(i + 1) % 4];
            assert_eq!((a ^ b).count_ones(), 1, "phase {i} -> {}", (i + 1) % 4);
        }
    }

    #[test]
    fn unconnected_pins_read_high() {
        let d = driving(Jack::Left);
        assert!(d.read(DigitalPin::Three));
        assert!(d.read(DigitalPin::Four));
    }

    #[test]
    fn clockwise_steps_advance_gray_index() {
        // With sensitivity 1.0, four counter steps make one phase step:
        // counter 1,2,3,4 yields gray_index 0,0,0,1
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroRight);

        let mut indices = Vec::new();
        for _ in 0..4 {
            d.update(&events);
            indices.push(d.gray_index());
        }
        assert_eq!(indices, vec![0, 0, 0, 1]);
    }

    #[test]
    fn counterclockwise_wraps_through_phase_three() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroLeft);

        // counter -1..-4: int(counter/4) is 0,0,0,-1; -1 & 0b11 == 3
        let mut indices = Vec::new();
        for _ in 0..4 {
            d.update(&events);
            indices.push(d.gray_index());
        }
        assert_eq!(indices, vec![0, 0, 0, 3]);
    }

    #[test]
    fn ccw_takes_priority_over_cw() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroLeft);
        press(&mut events, Event::JoystickZeroRight);
        for _ in 0..4 {
            d.update(&events);
        }
        // Both held: only the CCW decrement applies
        assert_eq!(d.gray_index(), 3);
    }

    #[test]
    fn analog_x_axis_is_an_alternative_turn_source() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();

        events.set(Event::PaddleZeroAnalog, X_AXIS_THRESHOLD + 1);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 1);

        // At exactly the threshold nothing moves
        events.set(Event::PaddleZeroAnalog, X_AXIS_THRESHOLD);
        d.update(&events);
        assert_eq!(d.gray_index(), 1);
    }

    #[test]
    fn pin_levels_follow_gray_table() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroRight);

        for step in 1..=16 {
            d.update(&events);
            let expected = GRAY_TABLE[((step / 4) & 0b11) as usize];
            assert_eq!(d.read(DigitalPin::One), expected & 0x01 != 0, "step {step}");
            assert_eq!(d.read(DigitalPin::Two), expected & 0x02 != 0, "step {step}");
        }
    }

    #[test]
    fn fire_is_active_low_on_pin_six() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();

        d.update(&events);
        assert!(d.read(DigitalPin::Six));

        press(&mut events, Event::JoystickZeroFire);
        d.update(&events);
        assert!(!d.read(DigitalPin::Six));

        events.set(Event::JoystickZeroFire, 0);
        d.update(&events);
        assert!(d.read(DigitalPin::Six));
    }

    #[test]
    fn autofire_pulses_pin_six_while_held() {
        let mut d = driving(Jack::Left);
        d.set_autofire_rate(15); // 2 frames firing, 2 released
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroFire);

        let levels: Vec<bool> = (0..4)
            .map(|_| {
                d.update(&events);
                d.read(DigitalPin::Six)
            })
            .collect();
        assert_eq!(levels, vec![false, false, true, true]);
    }

    #[test]
    fn right_jack_uses_its_own_events() {
        let mut d = driving(Jack::Right);
        let mut events = EventState::new();
        // Left-jack events must not affect the right controller
        press(&mut events, Event::JoystickZeroRight);
        press(&mut events, Event::JoystickZeroFire);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 0);
        assert!(d.read(DigitalPin::Six));

        press(&mut events, Event::JoystickOneRight);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 1);
    }

    #[test]
    fn altmap_rebinds_to_second_stick_pair() {
        let mut d = Driving::new(Jack::Left, true, DrivingSensitivity::new());
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroRight);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 0);

        events.clear();
        press(&mut events, Event::JoystickTwoRight);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 1);
    }

    #[test]
    fn tied_mouse_binds_only_matching_id() {
        let mut left = driving(Jack::Left);
        assert!(left.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 0));
        assert_eq!(left.mouse_binding(), MouseBinding::Tied(0));

        // Same call on the right jack: id 0 belongs to the left port
        let mut right = driving(Jack::Right);
        assert!(right.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 0));
        assert_eq!(right.mouse_binding(), MouseBinding::None);

        assert!(right.set_mouse_control(ControllerType::Driving, 1, ControllerType::Driving, 1));
        assert_eq!(right.mouse_binding(), MouseBinding::Tied(1));
    }

    #[test]
    fn non_driving_type_never_binds() {
        let mut d = driving(Jack::Left);
        assert!(d.set_mouse_control(ControllerType::Paddles, 0, ControllerType::Paddles, 0));
        assert_eq!(d.mouse_binding(), MouseBinding::None);
    }

    #[test]
    fn untied_axes_bind_independently() {
        let mut d = driving(Jack::Left);
        // X axis to controller 0 (ours), Y axis to controller 1
        assert!(d.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 1));
        assert_eq!(
            d.mouse_binding(),
            MouseBinding::Untied {
                x: Some(0),
                y: None
            }
        );

        let mut right = driving(Jack::Right);
        assert!(right.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 1));
        assert_eq!(
            right.mouse_binding(),
            MouseBinding::Untied {
                x: None,
                y: Some(1)
            }
        );
    }

    #[test]
    fn tied_mouse_turns_and_fires() {
        let mut d = driving(Jack::Left);
        d.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 0);
        let mut events = EventState::new();

        events.set(Event::MouseAxisXMove, MOUSE_THRESHOLD + 1);
        events.set(Event::MouseButtonRight, 1);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 1);
        // Either mouse button fires in tied mode
        assert!(!d.read(DigitalPin::Six));

        // A delta within the threshold does not move the wheel
        events.set(Event::MouseAxisXMove, MOUSE_THRESHOLD);
        d.update(&events);
        assert_eq!(d.gray_index(), 1);
    }

    #[test]
    fn untied_y_axis_pairs_with_right_button() {
        let mut right = driving(Jack::Right);
        right.set_mouse_control(ControllerType::Driving, 0, ControllerType::Driving, 1);
        let mut events = EventState::new();

        // X motion and left button belong to the other controller
        events.set(Event::MouseAxisXMove, 100);
        events.set(Event::MouseButtonLeft, 1);
        right.update(&events);
        assert_eq!(right.gray_index(), 0);
        assert!(right.read(DigitalPin::Six));

        events.clear();
        events.set(Event::MouseAxisYMove, -(MOUSE_THRESHOLD + 1));
        events.set(Event::MouseButtonRight, 1);
        for _ in 0..4 {
            right.update(&events);
        }
        assert_eq!(right.gray_index(), 3);
        assert!(!right.read(DigitalPin::Six));
    }

    #[test]
    fn adapter_y_axis_overrides_gray_index() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();

        // Well below -20480: phase 3 ("up")
        events.set(Event::PaddleOneAnalog, -30000);
        d.update(&events);
        assert_eq!(d.gray_index(), 3);

        // Counter resyncs so digital input continues from phase 3 while
        // the adapter keeps reporting the same (now stable) sample
        press(&mut events, Event::JoystickZeroRight);
        for _ in 0..4 {
            d.update(&events);
        }
        assert_eq!(d.gray_index(), 0);
    }

    #[test]
    fn adapter_bands_map_to_phases() {
        for (y_axis, expected) in [
            (-30000, 3), // up
            (30000, 1),  // down
            (16384, 2),  // up + down (within the wide centre band)
            (5000, 0),   // no movement
        ] {
            let mut d = driving(Jack::Left);
            let mut events = EventState::new();
            events.set(Event::PaddleOneAnalog, y_axis);
            d.update(&events);
            assert_eq!(d.gray_index(), expected, "y_axis {y_axis}");
        }
    }

    #[test]
    fn y_axis_jitter_is_ignored() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();

        events.set(Event::PaddleOneAnalog, 13000);
        d.update(&events);
        assert_eq!(d.gray_index(), 2);

        // 13000 -> 12200 is within +/-1024: no change even though 12200
        // is still inside the band that would map to phase 2 on its own
        events.set(Event::PaddleOneAnalog, 12200);
        d.update(&events);
        assert_eq!(d.gray_index(), 2);

        // 13000 -> 11000 exceeds the jitter window and crosses the band
        // boundary: the phase changes
        events.set(Event::PaddleOneAnalog, 11000);
        d.update(&events);
        assert_eq!(d.gray_index(), 0);
    }

    #[test]
    fn sensitivity_clamps_to_bounds() {
        let sense = DrivingSensitivity::new();
        sense.set(MAX_SENSE + 100);
        let above = sense.factor();
        sense.set(MAX_SENSE);
        assert_eq!(above, sense.factor());

        sense.set(MIN_SENSE - 100);
        let below = sense.factor();
        sense.set(MIN_SENSE);
        assert_eq!(below, sense.factor());
    }

    #[test]
    fn sensitivity_is_shared_between_instances() {
        let sense = DrivingSensitivity::new();
        let mut left = Driving::new(Jack::Left, false, sense.clone());
        let mut right = Driving::new(Jack::Right, false, sense.clone());

        // Doubled sensitivity: two counter steps per phase step
        sense.set(20);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroRight);
        press(&mut events, Event::JoystickOneRight);
        for _ in 0..2 {
            left.update(&events);
            right.update(&events);
        }
        assert_eq!(left.gray_index(), 1);
        assert_eq!(right.gray_index(), 1);
    }

    #[test]
    fn observable_reports_state() {
        let mut d = driving(Jack::Left);
        let mut events = EventState::new();
        press(&mut events, Event::JoystickZeroRight);
        for _ in 0..4 {
            d.update(&events);
        }

        assert_eq!(d.query("counter"), Some(Value::I32(4)));
        assert_eq!(d.query("gray_index"), Some(Value::I32(1)));
        assert_eq!(d.query("gray"), Some(Value::U8(0x01)));
        assert_eq!(d.query("pins.six"), Some(Value::Bool(true)));
        assert_eq!(d.query("bogus"), None);
        assert!(d.query_paths().contains(&"sensitivity"));
    }
}
