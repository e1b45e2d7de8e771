//! `egui` adapter for the embedding widget.
//!
//! [`EguiFrame`] implements [`GuiFrame`] on top of an [`egui::Ui`]. The
//! rendered texture is registered with the application's
//! [`egui_wgpu::Renderer`] as a native texture, so the viewport must render
//! on the same device as the renderer (see
//! [`EmbeddedViewport::with_context`](super::EmbeddedViewport::with_context)).
//!
//! ```ignore
//! egui::CentralPanel::default().show(ctx, |ui| {
//!     let mut gui = EguiFrame::new(ui, &mut textures, &mut renderer, &device);
//!     viewport.frame(&mut gui, None)?;
//! });
//! ```

use egui::{Color32, Key, PointerButton, Rect, Sense, StrokeKind, Ui};

use super::gui::{ChildFlags, GuiFrame, TextureRef, UvRect};
use crate::input::{InputSnapshot, Modifiers, MouseButton, NamedKey};
use crate::render::Size;

/// Keeps the viewport texture registered with an `egui-wgpu` renderer.
///
/// Registration happens on first use; a new texture generation re-points
/// the same egui id at the new view.
#[derive(Debug, Default)]
pub struct EguiTextures {
    registered: Option<(egui::TextureId, u64)>,
}

impl EguiTextures {
    /// Nothing registered yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// egui id showing `texture`, registering or updating it as needed.
    /// `None` if the texture has no wgpu view.
    pub fn texture_id(
        &mut self,
        renderer: &mut egui_wgpu::Renderer,
        device: &wgpu::Device,
        texture: TextureRef<'_>,
    ) -> Option<egui::TextureId> {
        let view = texture.view?;
        let generation = texture.handle.generation;
        let id = match self.registered {
            Some((id, current)) if current == generation => id,
            Some((id, _)) => {
                renderer.update_egui_texture_from_wgpu_texture(
                    device,
                    view,
                    wgpu::FilterMode::Linear,
                    id,
                );
                id
            }
            None => renderer.register_native_texture(
                device,
                view,
                wgpu::FilterMode::Linear,
            ),
        };
        self.registered = Some((id, generation));
        Some(id)
    }

    /// Unregister the texture.
    pub fn free(&mut self, renderer: &mut egui_wgpu::Renderer) {
        if let Some((id, _)) = self.registered.take() {
            renderer.free_texture(&id);
        }
    }
}

/// One frame of an [`egui::Ui`] seen as a [`GuiFrame`].
pub struct EguiFrame<'a> {
    ui: &'a mut Ui,
    textures: &'a mut EguiTextures,
    renderer: &'a mut egui_wgpu::Renderer,
    device: &'a wgpu::Device,
    child: Option<Child>,
}

struct Child {
    rect: Rect,
    response: egui::Response,
    flags: ChildFlags,
}

impl<'a> EguiFrame<'a> {
    /// Adapter drawing into `ui`, registering textures with `renderer`.
    pub fn new(
        ui: &'a mut Ui,
        textures: &'a mut EguiTextures,
        renderer: &'a mut egui_wgpu::Renderer,
        device: &'a wgpu::Device,
    ) -> Self {
        Self {
            ui,
            textures,
            renderer,
            device,
            child: None,
        }
    }
}

impl GuiFrame for EguiFrame<'_> {
    fn available_size(&self) -> Size {
        let available = self.ui.available_size() * self.ui.pixels_per_point();
        Size::new(available.x as i32, available.y as i32)
    }

    fn pixels_per_point(&self) -> f32 {
        self.ui.pixels_per_point()
    }

    fn begin_child(&mut self, id: &str, size: Size, flags: ChildFlags) {
        let ppp = self.ui.pixels_per_point();
        let points = egui::vec2(
            size.width.max(0) as f32 / ppp,
            size.height.max(0) as f32 / ppp,
        );
        let (rect, _) = self.ui.allocate_exact_size(points, Sense::hover());
        let response =
            self.ui
                .interact(rect, self.ui.id().with(id), Sense::click_and_drag());
        if response.clicked() || response.drag_started() {
            response.request_focus();
        }
        self.child = Some(Child {
            rect,
            response,
            flags,
        });
    }

    fn end_child(&mut self) {
        let Some(child) = self.child.take() else {
            return;
        };
        if child.flags.border {
            let stroke = self.ui.visuals().widgets.noninteractive.bg_stroke;
            let _ = self.ui.painter().rect_stroke(
                child.rect,
                0.0,
                stroke,
                StrokeKind::Inside,
            );
        }
        if child.flags.no_scroll_with_mouse && child.response.hovered() {
            self.ui.ctx().input_mut(|input| {
                input.raw_scroll_delta = egui::Vec2::ZERO;
                input.smooth_scroll_delta = egui::Vec2::ZERO;
            });
        }
    }

    fn image(&mut self, texture: TextureRef<'_>, _size: Size, uv: UvRect) {
        let Some(rect) = self.child.as_ref().map(|child| child.rect) else {
            return;
        };
        let Some(id) = self.textures.texture_id(self.renderer, self.device, texture)
        else {
            return;
        };
        let uv = Rect::from_min_max(
            egui::pos2(uv.min[0], uv.min[1]),
            egui::pos2(uv.max[0], uv.max[1]),
        );
        let _ = self.ui.painter().image(id, rect, uv, Color32::WHITE);
    }

    fn input_snapshot(&self) -> InputSnapshot {
        let Some(child) = self.child.as_ref() else {
            return InputSnapshot::default();
        };
        let ppp = self.ui.pixels_per_point();
        let mut snapshot = InputSnapshot {
            hovered: child.response.hovered(),
            focused: child.response.has_focus() || child.response.dragged(),
            ..InputSnapshot::default()
        };
        self.ui.input(|input| {
            if let Some(pos) = input.pointer.latest_pos() {
                snapshot.pointer = image_relative(pos, child.rect.min, ppp);
            }
            snapshot.modifiers = Modifiers {
                ctrl: input.modifiers.ctrl || input.modifiers.mac_cmd,
                shift: input.modifiers.shift,
            };
            snapshot.buttons_down = Some(MouseButton::ALL.map(|button| {
                input.pointer.button_down(PointerButton::from(button))
            }));
            for button in MouseButton::ALL {
                let egui_button = PointerButton::from(button);
                let transitions = snapshot.button_mut(button);
                transitions.pressed = input.pointer.button_pressed(egui_button);
                transitions.released = input.pointer.button_released(egui_button);
                transitions.double_clicked =
                    input.pointer.button_double_clicked(egui_button);
            }
            snapshot.wheel = input.raw_scroll_delta.y;
            for event in &input.events {
                if let egui::Event::Key { key, pressed, .. } = event {
                    if let Some(named) = named_key(*key) {
                        if *pressed {
                            snapshot.keys.press(named);
                        } else {
                            snapshot.keys.release(named);
                        }
                    }
                }
            }
        });
        snapshot
    }
}

/// Pointer position in physical pixels from the image's top-left corner.
fn image_relative(pos: egui::Pos2, origin: egui::Pos2, ppp: f32) -> glam::Vec2 {
    let offset = (pos - origin) * ppp;
    glam::Vec2::new(offset.x, offset.y)
}

/// The polled key an egui key corresponds to.
fn named_key(key: Key) -> Option<NamedKey> {
    Some(match key {
        Key::ArrowDown => NamedKey::DownArrow,
        Key::ArrowLeft => NamedKey::LeftArrow,
        Key::ArrowRight => NamedKey::RightArrow,
        Key::ArrowUp => NamedKey::UpArrow,
        Key::Escape => NamedKey::Escape,
        Key::Tab => NamedKey::Tab,
        Key::Backspace => NamedKey::Backspace,
        Key::Enter => NamedKey::Enter,
        Key::Space => NamedKey::Space,
        Key::Insert => NamedKey::Insert,
        Key::Delete => NamedKey::Delete,
        Key::Home => NamedKey::Home,
        Key::End => NamedKey::End,
        Key::PageUp => NamedKey::PageUp,
        Key::PageDown => NamedKey::PageDown,
        Key::Comma => NamedKey::Comma,
        Key::Minus => NamedKey::Minus,
        Key::Period => NamedKey::Period,
        Key::Slash => NamedKey::Slash,
        Key::Semicolon => NamedKey::Semicolon,
        Key::Backslash => NamedKey::Backslash,
        Key::Equals => NamedKey::Equal,
        Key::OpenBracket => NamedKey::LeftBracket,
        Key::CloseBracket => NamedKey::RightBracket,
        Key::Backtick => NamedKey::GraveAccent,
        Key::Quote => NamedKey::Apostrophe,
        Key::BrowserBack => NamedKey::AppBack,
        Key::Num0 => NamedKey::Num0,
        Key::Num1 => NamedKey::Num1,
        Key::Num2 => NamedKey::Num2,
        Key::Num3 => NamedKey::Num3,
        Key::Num4 => NamedKey::Num4,
        Key::Num5 => NamedKey::Num5,
        Key::Num6 => NamedKey::Num6,
        Key::Num7 => NamedKey::Num7,
        Key::Num8 => NamedKey::Num8,
        Key::Num9 => NamedKey::Num9,
        Key::A => NamedKey::A,
        Key::B => NamedKey::B,
        Key::C => NamedKey::C,
        Key::D => NamedKey::D,
        Key::E => NamedKey::E,
        Key::F => NamedKey::F,
        Key::G => NamedKey::G,
        Key::H => NamedKey::H,
        Key::I => NamedKey::I,
        Key::J => NamedKey::J,
        Key::K => NamedKey::K,
        Key::L => NamedKey::L,
        Key::M => NamedKey::M,
        Key::N => NamedKey::N,
        Key::O => NamedKey::O,
        Key::P => NamedKey::P,
        Key::Q => NamedKey::Q,
        Key::R => NamedKey::R,
        Key::S => NamedKey::S,
        Key::T => NamedKey::T,
        Key::U => NamedKey::U,
        Key::V => NamedKey::V,
        Key::W => NamedKey::W,
        Key::X => NamedKey::X,
        Key::Y => NamedKey::Y,
        Key::Z => NamedKey::Z,
        Key::F1 => NamedKey::F1,
        Key::F2 => NamedKey::F2,
        Key::F3 => NamedKey::F3,
        Key::F4 => NamedKey::F4,
        Key::F5 => NamedKey::F5,
        Key::F6 => NamedKey::F6,
        Key::F7 => NamedKey::F7,
        Key::F8 => NamedKey::F8,
        Key::F9 => NamedKey::F9,
        Key::F10 => NamedKey::F10,
        Key::F11 => NamedKey::F11,
        Key::F12 => NamedKey::F12,
        Key::F13 => NamedKey::F13,
        Key::F14 => NamedKey::F14,
        Key::F15 => NamedKey::F15,
        Key::F16 => NamedKey::F16,
        Key::F17 => NamedKey::F17,
        Key::F18 => NamedKey::F18,
        Key::F19 => NamedKey::F19,
        Key::F20 => NamedKey::F20,
        Key::F21 => NamedKey::F21,
        Key::F22 => NamedKey::F22,
        Key::F23 => NamedKey::F23,
        Key::F24 => NamedKey::F24,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_scaled_to_physical_pixels() {
        let pos = image_relative(egui::pos2(30.0, 15.0), egui::pos2(10.0, 5.0), 2.0);
        assert_eq!(pos, glam::Vec2::new(40.0, 20.0));
        let above = image_relative(egui::pos2(10.0, 0.0), egui::pos2(10.0, 5.0), 1.0);
        assert!(above.y < 0.0);
    }

    #[test]
    fn keys_map_by_position_name() {
        assert_eq!(named_key(Key::F), Some(NamedKey::F));
        assert_eq!(named_key(Key::ArrowLeft), Some(NamedKey::LeftArrow));
        assert_eq!(named_key(Key::Equals), Some(NamedKey::Equal));
        assert_eq!(named_key(Key::Num7), Some(NamedKey::Num7));
        assert_eq!(named_key(Key::F24), Some(NamedKey::F24));
        assert_eq!(named_key(Key::F25), None);
        assert_eq!(named_key(Key::Copy), None);
    }
}
