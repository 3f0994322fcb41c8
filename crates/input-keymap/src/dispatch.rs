//! Glue between host key events and the shared event-state table.

use input_core::{Event, EventState};

use crate::keymap::{EventMode, KeyMap, Mapping};
use crate::keys::{KeyCode, Mod};

/// Resolve a host key press or release through the mapping table and
/// store the resulting event state.
///
/// Returns the resolved event ([`Event::NoType`] when the key is unbound,
/// in which case the state table is untouched).
pub fn dispatch_key(
    map: &KeyMap,
    events: &mut EventState,
    mode: EventMode,
    key: KeyCode,
    modifiers: Mod,
    pressed: bool,
) -> Event {
    let event = map.get(&Mapping::new(mode, key, modifiers));
    if event != Event::NoType {
        events.set(event, i32::from(pressed));
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{key, modkey};

    #[test]
    fn press_and_release_update_event_state() {
        let mut map = KeyMap::new();
        map.add(
            Event::JoystickZeroFire,
            &Mapping::new(EventMode::Emulation, key::SPACE, modkey::NONE),
        );
        let mut events = EventState::new();

        let resolved = dispatch_key(
            &map,
            &mut events,
            EventMode::Emulation,
            key::SPACE,
            modkey::NONE,
            true,
        );
        assert_eq!(resolved, Event::JoystickZeroFire);
        assert_eq!(events.get(Event::JoystickZeroFire), 1);

        dispatch_key(
            &map,
            &mut events,
            EventMode::Emulation,
            key::SPACE,
            modkey::NONE,
            false,
        );
        assert_eq!(events.get(Event::JoystickZeroFire), 0);
    }

    #[test]
    fn unbound_key_leaves_state_untouched() {
        let map = KeyMap::new();
        let mut events = EventState::new();
        let resolved = dispatch_key(
            &map,
            &mut events,
            EventMode::Emulation,
            key::Q,
            modkey::NONE,
            true,
        );
        assert_eq!(resolved, Event::NoType);
        assert_eq!(events.get(Event::NoType), 0);
    }
}
