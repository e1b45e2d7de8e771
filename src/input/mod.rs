//! Input handling: canonical event types, the per-frame GUI input snapshot
//! and the translator that turns one into the other.

/// Canonical events and event information.
pub mod event;
/// Fixed named-key range and keysym table.
pub mod keys;
/// Per-frame GUI input snapshot.
pub mod snapshot;
/// Snapshot to canonical event translation.
pub mod translator;

pub use event::{CanonicalEvent, EventInformation, MouseButton};
pub use keys::NamedKey;
use serde::{Deserialize, Serialize};
pub use snapshot::{ButtonTransitions, InputSnapshot, KeyTransitions, Modifiers};
pub use translator::EventTranslator;

/// Camera actions that can be bound to character keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// fly_to = "f"
/// reset_camera = "r"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Acquire a pivot under the pointer and move the focal point onto it.
    FlyTo,
    /// Frame all visible geometry.
    ResetCamera,
    /// Run the pick callback at the pointer.
    Pick,
}
