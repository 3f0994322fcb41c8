//! Keyboard mapping tables for console input emulation.
//!
//! Maps (mode, scancode, modifier-mask) triples to logical events. The
//! host input layer consults the table on every key press/release and
//! writes the resolved event into the shared event-state table; see
//! [`dispatch_key`].
//!
//! Modifier matching is deliberately permissive: a mapping recorded with
//! "either Shift" matches events reporting left or right Shift, and a
//! mapping with no modifiers matches any modifier combination. See
//! [`KeyMap`] for how the table keeps hashing sound under that relation.

mod dispatch;
#[cfg(feature = "json")]
mod json;
mod keymap;
pub mod keys;

pub use dispatch::dispatch_key;
pub use keymap::{EventMode, KeyMap, Mapping};
