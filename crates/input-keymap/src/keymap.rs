//! The mapping table from physical key triples to logical events.

use std::collections::HashMap;

use input_core::Event;

use crate::keys::{self, KeyCode, Mod};

/// Input context a mapping belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EventMode {
    /// Normal emulation: keys drive the emulated controllers.
    Emulation = 0,
    /// Frontend menus.
    Menu = 1,
    /// Debugger prompt.
    Debugger = 2,
}

impl EventMode {
    /// Stable numeric code for persistence.
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Emulation),
            1 => Some(Self::Menu),
            2 => Some(Self::Debugger),
            _ => None,
        }
    }
}

/// A (mode, key, modifiers) triple identifying one physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub mode: EventMode,
    pub key: KeyCode,
    pub modifiers: Mod,
}

impl Mapping {
    #[must_use]
    pub fn new(mode: EventMode, key: KeyCode, modifiers: Mod) -> Self {
        Self {
            mode,
            key,
            modifiers,
        }
    }

    /// Canonical form used for every table operation: left/right modifier
    /// variants fold to their combined mask, unhandled bits are dropped,
    /// and a key that is itself a modifier carries no modifier mask at
    /// all (so "press Shift" can be bound without Shift masking itself).
    #[must_use]
    pub fn canonical(self) -> Self {
        let modifiers = if keys::is_modifier_key(self.key) {
            keys::modkey::NONE
        } else {
            keys::fold_mod(self.modifiers)
        };
        Self { modifiers, ..self }
    }

    /// Permissive modifier match between two canonical mappings: mode and
    /// key must be equal, and the modifier masks either share a bit or at
    /// least one side is empty.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.mode == other.mode && self.key == other.key && mod_match(self.modifiers, other.modifiers)
    }

    /// Human-readable description, e.g. `"Ctrl+Shift+Space"`.
    #[must_use]
    pub fn desc(&self) -> String {
        format!(
            "{}{}",
            keys::mod_prefix(self.canonical().modifiers),
            keys::key_name(self.key)
        )
    }
}

/// The authoritative table from physical input triples to logical events.
///
/// The permissive modifier relation is weaker than an equivalence (zero
/// matches everything, so it is not transitive), which a hash map keyed
/// directly on `Mapping` could not tolerate. The table is therefore
/// two-level: the hash key is the exact `(mode, key)` pair, so modifiers
/// never enter the hash, and the per-key entries are scanned with the
/// permissive test from [`Mapping::matches`].
#[derive(Debug, Default)]
pub struct KeyMap {
    map: HashMap<(EventMode, KeyCode), Vec<(Mod, Event)>>,
}

impl KeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Add a mapping for the given event, overwriting any entry the
    /// mapping matches. An overwritten entry keeps its stored modifier
    /// mask; last write wins for the event.
    pub fn add(&mut self, event: Event, mapping: &Mapping) {
        let m = mapping.canonical();
        let entries = self.map.entry((m.mode, m.key)).or_default();
        if let Some(entry) = entries
            .iter_mut()
            .find(|(stored, _)| mod_match(*stored, m.modifiers))
        {
            entry.1 = event;
        } else {
            entries.push((m.modifiers, event));
        }
    }

    /// Remove the entry the mapping matches; no-op when absent.
    pub fn erase(&mut self, mapping: &Mapping) {
        let m = mapping.canonical();
        if let Some(entries) = self.map.get_mut(&(m.mode, m.key)) {
            if let Some(pos) = entries
                .iter()
                .position(|(stored, _)| mod_match(*stored, m.modifiers))
            {
                entries.remove(pos);
            }
            if entries.is_empty() {
                self.map.remove(&(m.mode, m.key));
            }
        }
    }

    /// Event bound to the mapping, or [`Event::NoType`] when absent.
    #[must_use]
    pub fn get(&self, mapping: &Mapping) -> Event {
        let m = mapping.canonical();
        self.map
            .get(&(m.mode, m.key))
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|(stored, _)| mod_match(*stored, m.modifiers))
            })
            .map_or(Event::NoType, |&(_, event)| event)
    }

    /// Description of the physical input triple, independent of whether
    /// it is bound.
    #[must_use]
    pub fn get_desc(&self, mapping: &Mapping) -> String {
        mapping.desc()
    }

    /// All mappings bound to `event` within `mode` (unordered).
    #[must_use]
    pub fn get_event_mapping(&self, event: Event, mode: EventMode) -> Vec<Mapping> {
        let mut mappings = Vec::new();
        for (&(m, key), entries) in &self.map {
            if m != mode {
                continue;
            }
            for &(modifiers, e) in entries {
                if e == event {
                    mappings.push(Mapping::new(mode, key, modifiers));
                }
            }
        }
        mappings
    }

    /// Comma-joined descriptions of every mapping bound to `event` in
    /// `mode`, e.g. `"Space, Shift+Return"`.
    #[must_use]
    pub fn get_event_mapping_desc(&self, event: Event, mode: EventMode) -> String {
        let mut descs: Vec<String> = self
            .get_event_mapping(event, mode)
            .iter()
            .map(Mapping::desc)
            .collect();
        descs.sort();
        descs.join(", ")
    }

    /// Serialize every mapping of `mode` as `event:key:mod` records
    /// joined by `|` (decimal fields), sorted for stable output.
    #[must_use]
    pub fn save_mapping(&self, mode: EventMode) -> String {
        let mut records: Vec<(u32, KeyCode, Mod)> = self
            .entries()
            .filter(|&(m, _, _, _)| m == mode)
            .map(|(_, key, modifiers, event)| (event.code(), key, modifiers))
            .collect();
        records.sort_unstable_by_key(|&(event, key, modifiers)| (key, modifiers, event));
        let tokens: Vec<String> = records
            .iter()
            .map(|(event, key, modifiers)| format!("{event}:{key}:{modifiers}"))
            .collect();
        tokens.join("|")
    }

    /// Parse the [`save_mapping`] grammar and insert the entries for
    /// `mode`. Malformed records are skipped, never fatal. Returns the
    /// number of entries loaded.
    ///
    /// [`save_mapping`]: KeyMap::save_mapping
    pub fn load_mapping(&mut self, text: &str, mode: EventMode) -> usize {
        let mut loaded = 0;
        for token in text.split('|') {
            let mut fields = token.split(':');
            let (Some(event), Some(key), Some(modifiers), None) = (
                fields.next().and_then(|f| f.trim().parse::<u32>().ok()),
                fields.next().and_then(|f| f.trim().parse::<KeyCode>().ok()),
                fields.next().and_then(|f| f.trim().parse::<Mod>().ok()),
                fields.next(),
            ) else {
                continue;
            };
            let Some(event) = Event::from_code(event) else {
                continue;
            };
            self.add(event, &Mapping::new(mode, key, modifiers));
            loaded += 1;
        }
        loaded
    }

    /// Remove every mapping with the given mode.
    pub fn erase_mode(&mut self, mode: EventMode) {
        self.map.retain(|&(m, _), _| m != mode);
    }

    /// Remove every mapping bound to `event` within `mode`.
    pub fn erase_event(&mut self, event: Event, mode: EventMode) {
        for (&(m, _), entries) in self.map.iter_mut() {
            if m == mode {
                entries.retain(|&(_, e)| e != event);
            }
        }
        self.map.retain(|_, entries| !entries.is_empty());
    }

    /// Current entry count across all modes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    /// Iterate over every stored entry (unordered).
    pub(crate) fn entries(&self) -> impl Iterator<Item = (EventMode, KeyCode, Mod, Event)> + '_ {
        self.map.iter().flat_map(|(&(mode, key), entries)| {
            entries
                .iter()
                .map(move |&(modifiers, event)| (mode, key, modifiers, event))
        })
    }
}

/// Permissive modifier comparison for canonical masks.
fn mod_match(a: Mod, b: Mod) -> bool {
    a == 0 || b == 0 || a & b != 0
}
