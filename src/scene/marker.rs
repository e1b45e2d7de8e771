use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Pivot marker sphere handed to scenes for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotMarker {
    /// World-space center.
    pub center: Vec3,
    /// Unscaled sphere radius.
    pub radius: f32,
    /// Theta and phi segment count.
    pub resolution: u32,
    /// Per-frame scale keeping the marker's on-screen size constant.
    pub scale: f32,
}

impl PivotMarker {
    /// World-space radius after scaling.
    #[must_use]
    pub fn world_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Model matrix placing a unit sphere at the marker.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.world_radius()),
            glam::Quat::IDENTITY,
            self.center,
        )
    }

    /// Unit UV sphere tessellated at this marker's resolution.
    #[must_use]
    pub fn mesh(&self) -> SphereMesh {
        SphereMesh::uv(self.resolution)
    }
}

/// Indexed triangle mesh of a unit sphere; positions double as normals.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    /// Vertex positions on the unit sphere.
    pub positions: Vec<[f32; 3]>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Latitude/longitude sphere with `resolution` segments in each
    /// direction (clamped to at least 3).
    #[must_use]
    pub fn uv(resolution: u32) -> Self {
        let theta_res = resolution.max(3);
        let phi_res = resolution.max(3);

        let mut positions =
            Vec::with_capacity(((theta_res + 1) * (phi_res + 1)) as usize);
        for ring in 0..=phi_res {
            let phi = PI * ring as f32 / phi_res as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for seg in 0..=theta_res {
                let theta = 2.0 * PI * seg as f32 / theta_res as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                positions.push([
                    sin_phi * cos_theta,
                    cos_phi,
                    sin_phi * sin_theta,
                ]);
            }
        }

        let stride = theta_res + 1;
        let mut indices = Vec::with_capacity((theta_res * phi_res * 6) as usize);
        for ring in 0..phi_res {
            for seg in 0..theta_res {
                let a = ring * stride + seg;
                let b = a + stride;
                if ring != 0 {
                    indices.extend_from_slice(&[a, a + 1, b]);
                }
                if ring != phi_res - 1 {
                    indices.extend_from_slice(&[a + 1, b + 1, b]);
                }
            }
        }

        Self { positions, indices }
    }
}
