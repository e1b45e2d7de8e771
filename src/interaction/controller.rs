use glam::{IVec2, Vec3};
use rustc_hash::FxHashMap;

use super::{
    find_poked_scene, pick, CameraStyle, EventContext, PivotStyle, Trackball,
};
use crate::input::KeyAction;
use crate::options::{KeybindingOptions, Options, StyleKind};
use crate::render::scene_rect;

/// Called by the pick key with the event position (display coordinates)
/// and the world point under it, if any geometry was drawn there.
pub type PickCallback = Box<dyn FnMut(IVec2, Option<Vec3>) + Send>;

/// Owns the camera style strategy and the character key table.
///
/// # Usage
///
/// ```ignore
/// let mut controller = InteractionController::from_options(&options);
/// controller.bind_key('c', KeyAction::ResetCamera);
/// controller.set_pick_callback(Box::new(|pos, world| log::info!("{pos} {world:?}")));
/// ```
pub struct InteractionController {
    style: Box<dyn CameraStyle>,
    key_bindings: FxHashMap<char, KeyAction>,
    pick_callback: Option<PickCallback>,
}

impl InteractionController {
    /// Controller with the given style and key table.
    #[must_use]
    pub fn new(style: Box<dyn CameraStyle>, keys: &KeybindingOptions) -> Self {
        Self {
            style,
            key_bindings: keys.iter().collect(),
            pick_callback: None,
        }
    }

    /// Controller with the style, speeds and key table from `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let style: Box<dyn CameraStyle> = match options.interaction.style {
            StyleKind::Trackball => Box::new(Trackball::new(&options.interaction)),
            StyleKind::Pivot => Box::new(PivotStyle::new(
                &options.interaction,
                &options.pivot,
            )),
        };
        Self::new(style, &options.keybindings)
    }

    /// Installed camera style.
    #[must_use]
    pub fn style(&self) -> &dyn CameraStyle {
        self.style.as_ref()
    }

    /// Mutable access to the installed camera style.
    pub fn style_mut(&mut self) -> &mut dyn CameraStyle {
        self.style.as_mut()
    }

    /// Replace the camera style. The previous style's gesture, if any, is
    /// dropped.
    pub fn set_style(&mut self, style: Box<dyn CameraStyle>) {
        self.style = style;
    }

    /// The installed style as a [`PivotStyle`].
    pub fn pivot_style_mut(&mut self) -> Option<&mut PivotStyle> {
        self.style.as_pivot_mut()
    }

    /// Replace the whole key table.
    pub fn set_key_bindings(&mut self, keys: &KeybindingOptions) {
        self.key_bindings = keys.iter().collect();
    }

    /// Bind one character to an action, replacing any previous binding of
    /// that character.
    pub fn bind_key(&mut self, key: char, action: KeyAction) {
        let _ = self.key_bindings.insert(key, action);
    }

    /// Remove the binding of `key`.
    pub fn unbind_key(&mut self, key: char) -> Option<KeyAction> {
        self.key_bindings.remove(&key)
    }

    /// Action bound to `key`.
    #[must_use]
    pub fn key_action(&self, key: char) -> Option<KeyAction> {
        self.key_bindings.get(&key).copied()
    }

    /// Callback run by [`KeyAction::Pick`].
    pub fn set_pick_callback(&mut self, callback: Option<PickCallback>) {
        self.pick_callback = callback;
    }

    /// Run the action bound to `key`, if any. Unbound keys are ignored.
    pub fn on_char(&mut self, ctx: &mut EventContext<'_>, key: char) {
        let Some(action) = self.key_action(key) else {
            return;
        };
        log::debug!("key {key:?} -> {action:?}");
        match action {
            KeyAction::FlyTo => self.style.fly_to(ctx),
            KeyAction::ResetCamera => Self::reset_camera(ctx),
            KeyAction::Pick => self.pick(ctx),
        }
    }

    fn reset_camera(ctx: &mut EventContext<'_>) {
        let Some(index) = find_poked_scene(&*ctx.window, ctx.position) else {
            return;
        };
        let size = ctx.window.size();
        if let Some(scene) = ctx.scene_mut(index) {
            let aspect = scene_rect(scene.as_ref(), size).aspect();
            scene.reset_camera(aspect);
        }
    }

    fn pick(&mut self, ctx: &mut EventContext<'_>) {
        let Some(callback) = self.pick_callback.as_mut() else {
            return;
        };
        let world = find_poked_scene(&*ctx.window, ctx.position).and_then(|index| {
            pick::acquire(
                &mut *ctx.window,
                index,
                ctx.position,
                self.style.pick_tolerance(),
            )
            .unwrap_or_else(|e| {
                log::warn!("pick failed: {e}");
                None
            })
        });
        callback(ctx.position, world);
    }
}
