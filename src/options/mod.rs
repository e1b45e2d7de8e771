//! Centralized viewport options with TOML preset support.
//!
//! Window, interaction, pivot and key binding settings are consolidated
//! here. Options serialize to/from TOML so an application can ship presets
//! next to its own configuration.

mod interaction;
mod keybindings;
mod pivot;
mod window;

use std::path::Path;

pub use interaction::{InteractionOptions, PointerPolicy, StyleKind};
pub use keybindings::KeybindingOptions;
pub use pivot::PivotOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use window::{GuiBackend, WindowOptions};

use crate::error::EmbedError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[pivot]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Host window and off-screen surface parameters.
    pub window: WindowOptions,
    /// Pointer-driven camera control parameters.
    pub interaction: InteractionOptions,
    /// Pivot style parameters.
    pub pivot: PivotOptions,
    /// Character key bindings.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, EmbedError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| EmbedError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Io`] if the file cannot be read and
    /// [`EmbedError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, EmbedError> {
        let content = std::fs::read_to_string(path).map_err(EmbedError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::OptionsParse`] if serialization fails and
    /// [`EmbedError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), EmbedError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EmbedError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EmbedError::Io)?;
        }
        std::fs::write(path, content).map_err(EmbedError::Io)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), EmbedError> {
        let invalid = |msg: String| Err(EmbedError::InvalidConfiguration(msg));
        let [w, h] = self.window.size;
        if w == 0 || h == 0 {
            return invalid(format!("window.size must be positive, got {w}x{h}"));
        }
        if !positive(self.interaction.motion_factor) {
            return invalid(format!(
                "interaction.motion_factor must be positive, got {}",
                self.interaction.motion_factor
            ));
        }
        if !positive(self.interaction.mouse_wheel_motion_factor) {
            return invalid(format!(
                "interaction.mouse_wheel_motion_factor must be positive, got {}",
                self.interaction.mouse_wheel_motion_factor
            ));
        }
        if !positive(self.pivot.sphere_radius) {
            return invalid(format!(
                "pivot.sphere_radius must be positive, got {}",
                self.pivot.sphere_radius
            ));
        }
        if self.pivot.sphere_resolution < 3 {
            return invalid(format!(
                "pivot.sphere_resolution must be at least 3, got {}",
                self.pivot.sphere_resolution
            ));
        }
        if !self.pivot.tolerance.is_finite() || self.pivot.tolerance < 0.0 {
            return invalid(format!(
                "pivot.tolerance must be non-negative, got {}",
                self.pivot.tolerance
            ));
        }
        if let Some(n) = self.pivot.translation_plane_normal {
            if n.iter().all(|c| *c == 0.0) || n.iter().any(|c| !c.is_finite())
            {
                return invalid(format!(
                    "pivot.translation_plane_normal must be a finite \
                     non-zero vector, got {n:?}"
                ));
            }
        }
        let bad = self.keybindings.invalid_bindings();
        if !bad.is_empty() {
            return invalid(format!(
                "keybindings must be single characters: {}",
                bad.join(", ")
            ));
        }
        let clashes = self.keybindings.duplicate_keys();
        if !clashes.is_empty() {
            return invalid(format!(
                "keybindings bind one key to several actions: {}",
                clashes.join("; ")
            ));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
