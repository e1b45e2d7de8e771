//! The embedding widget.
//!
//! [`EmbeddedViewport`] ties an off-screen
//! [`TextureRenderTarget`](crate::render::TextureRenderTarget), an
//! [`Interactor`](crate::interaction::Interactor) and an
//! [`EventTranslator`](crate::input::EventTranslator) together behind a
//! single per-frame call. GUIs plug in through [`GuiFrame`]; the `egui`
//! feature provides [`EguiFrame`] and a standalone host window.

#[cfg(feature = "egui")]
mod egui_frame;
mod gui;
#[cfg(feature = "egui")]
mod host;
/// Compiled-in GUI backends.
pub mod registry;
mod viewport;

#[cfg(feature = "egui")]
pub use egui_frame::{EguiFrame, EguiTextures};
pub use gui::{ChildFlags, GuiFrame, TextureRef, UvRect};
pub use registry::BackendEntry;
pub use viewport::{
    BeforeClose, CloseHandle, EmbeddedViewport, HostHandle,
};
