use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Camera manipulation strategy installed in the interaction controller.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// Rotate, pan and dolly about the camera focal point.
    Trackball,
    /// Rotate, pan and dolly about a depth-picked point under the pointer.
    #[default]
    Pivot,
}

/// What the event translator does with a pointer left or above the image.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PointerPolicy {
    /// Drop the whole frame of input.
    #[default]
    Suppress,
    /// Dispatch anyway with negative coordinates.
    Forward,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer-driven camera control parameters.
pub struct InteractionOptions {
    /// Camera style installed at construction.
    #[schemars(title = "Style")]
    pub style: StyleKind,
    /// Scales rotate, pan and dolly speeds.
    #[schemars(title = "Motion Factor", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub motion_factor: f32,
    /// Additional scale applied to wheel dolly steps.
    #[schemars(title = "Wheel Motion Factor", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub mouse_wheel_motion_factor: f32,
    /// Recompute camera clipping planes after every camera motion.
    #[schemars(title = "Auto Clipping Range")]
    pub auto_adjust_clipping_range: bool,
    /// Handling of pointer positions outside the image.
    #[schemars(skip)]
    pub pointer_policy: PointerPolicy,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            style: StyleKind::default(),
            motion_factor: 10.0,
            mouse_wheel_motion_factor: 1.0,
            auto_adjust_clipping_range: true,
            pointer_policy: PointerPolicy::default(),
        }
    }
}
