use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immediate-mode GUI binding used to host the viewport.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GuiBackend {
    /// `egui` with the `egui-wgpu` renderer and `egui-winit` platform layer.
    #[default]
    Egui,
    /// An application-supplied [`GuiFrame`](crate::widget::GuiFrame)
    /// implementation. No standalone host is available for it.
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Standalone host window and off-screen surface parameters.
#[allow(clippy::struct_excessive_bools)]
pub struct WindowOptions {
    /// Title of the standalone host window.
    #[schemars(title = "Title")]
    pub title: String,
    /// Initial host window size in logical pixels.
    #[schemars(skip)]
    pub size: [u32; 2],
    /// Ask scenes to smooth lines.
    #[schemars(title = "Line Smoothing")]
    pub line_smoothing: bool,
    /// Ask scenes to smooth points.
    #[schemars(title = "Point Smoothing")]
    pub point_smoothing: bool,
    /// Ask scenes to smooth polygon edges.
    #[schemars(title = "Polygon Smoothing")]
    pub polygon_smoothing: bool,
    /// Run the standalone host on a worker thread.
    #[schemars(skip)]
    pub background_thread: bool,
    /// Draw a border around the viewport child region.
    #[schemars(title = "Border")]
    pub border: bool,
    /// Clear color of the off-screen surface (linear RGBA).
    #[schemars(skip)]
    pub clear_color: [f32; 4],
    /// GUI binding used by the widget.
    #[schemars(skip)]
    pub backend: GuiBackend,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "embedview".to_owned(),
            size: [1280, 720],
            line_smoothing: false,
            point_smoothing: false,
            polygon_smoothing: false,
            background_thread: false,
            border: false,
            clear_color: [0.32, 0.34, 0.43, 1.0],
            backend: GuiBackend::default(),
        }
    }
}
