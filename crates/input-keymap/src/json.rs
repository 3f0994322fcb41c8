//! JSON snapshot of the whole mapping table.
//!
//! The pipe/colon text format covers one mode at a time for legacy
//! settings strings; frontends that keep their configuration in JSON use
//! this whole-table snapshot instead.

use input_core::Event;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::keymap::{EventMode, KeyMap, Mapping};
use crate::keys::{KeyCode, Mod};

#[derive(Debug, Serialize, Deserialize)]
struct StoredMapping {
    mode: u32,
    key: KeyCode,
    #[serde(rename = "mod")]
    modifiers: Mod,
    event: u32,
}

impl KeyMap {
    /// Serialize every mapping across all modes as a JSON array of
    /// `{mode, key, mod, event}` records, sorted for stable output.
    #[must_use]
    pub fn save_json(&self) -> String {
        let mut records: Vec<StoredMapping> = self
            .entries()
            .map(|(mode, key, modifiers, event)| StoredMapping {
                mode: mode.code(),
                key,
                modifiers,
                event: event.code(),
            })
            .collect();
        records.sort_unstable_by_key(|r| (r.mode, r.key, r.modifiers, r.event));
        serde_json::to_string(&records).unwrap_or_default()
    }

    /// Load a [`save_json`] snapshot, inserting into the table. Records
    /// that fail to parse or carry unknown mode/event codes are skipped.
    /// Returns the number of entries loaded.
    ///
    /// [`save_json`]: KeyMap::save_json
    pub fn load_json(&mut self, text: &str) -> usize {
        let Ok(records) = serde_json::from_str::<Vec<JsonValue>>(text) else {
            return 0;
        };
        let mut loaded = 0;
        for record in records {
            let Ok(stored) = serde_json::from_value::<StoredMapping>(record) else {
                continue;
            };
            let Some(mode) = EventMode::from_code(stored.mode) else {
                continue;
            };
            let Some(event) = Event::from_code(stored.event) else {
                continue;
            };
            self.add(event, &Mapping::new(mode, stored.key, stored.modifiers));
            loaded += 1;
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{key, modkey};

    #[test]
    fn json_round_trip_covers_all_modes() {
        let mut map = KeyMap::new();
        map.add(
            Event::JoystickZeroFire,
            &Mapping::new(EventMode::Emulation, key::SPACE, modkey::NONE),
        );
        map.add(
            Event::ConsoleSelect,
            &Mapping::new(EventMode::Menu, key::F1, modkey::SHIFT),
        );

        let text = map.save_json();
        let mut fresh = KeyMap::new();
        assert_eq!(fresh.load_json(&text), 2);
        assert_eq!(fresh.size(), 2);
        assert_eq!(
            fresh.get(&Mapping::new(EventMode::Emulation, key::SPACE, modkey::NONE)),
            Event::JoystickZeroFire
        );
        assert_eq!(
            fresh.get(&Mapping::new(EventMode::Menu, key::F1, modkey::RSHIFT)),
            Event::ConsoleSelect
        );
        assert_eq!(fresh.save_json(), text);
    }

    #[test]
    fn bad_records_are_skipped() {
        let mut map = KeyMap::new();
        let text = r#"[
            {"mode": 0, "key": 44, "mod": 0, "event": 3},
            {"mode": 99, "key": 44, "mod": 0, "event": 3},
            {"mode": 0, "key": 44, "mod": 0, "event": 9999},
            {"key": "not a record"},
            {"mode": 1, "key": 58, "mod": 3, "event": 21}
        ]"#;
        assert_eq!(map.load_json(text), 2);
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn non_array_input_loads_nothing() {
        let mut map = KeyMap::new();
        assert_eq!(map.load_json("not json"), 0);
        assert_eq!(map.load_json("{\"mode\": 0}"), 0);
        assert_eq!(map.size(), 0);
    }
}
