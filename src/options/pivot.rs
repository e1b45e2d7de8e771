use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pivot", inline)]
#[serde(default)]
/// Pivot style parameters.
pub struct PivotOptions {
    /// Radius of the pivot marker sphere before screen-size scaling.
    #[schemars(title = "Sphere Radius", range(min = 0.01, max = 5.0), extend("step" = 0.01))]
    pub sphere_radius: f32,
    /// Theta/phi segment count of the marker sphere.
    #[schemars(title = "Sphere Resolution", range(min = 3, max = 128))]
    pub sphere_resolution: u32,
    /// Pick tolerance as a fraction of the window diagonal.
    #[schemars(title = "Tolerance", range(min = 0.0, max = 0.1), extend("step" = 0.001))]
    pub tolerance: f32,
    /// Plane normal that constrains panning. `None` pans in the view plane.
    #[schemars(skip)]
    pub translation_plane_normal: Option<[f32; 3]>,
}

impl Default for PivotOptions {
    fn default() -> Self {
        Self {
            sphere_radius: 0.25,
            sphere_resolution: 16,
            tolerance: 0.002,
            translation_plane_normal: None,
        }
    }
}
