use glam::{Mat4, Quat, Vec3, Vec4};

use super::bounds::Bounds;

/// Smallest allowed ratio of near to far clipping distance.
const NEAR_CLIPPING_TOLERANCE: f32 = 0.001;

/// A rectangle of the render surface in display pixels, origin at the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl DisplayRect {
    /// Width over height, `1.0` for a degenerate rectangle.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Center point in display pixels.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Whether the display point lies inside this rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width
            && y < self.y + self.height
    }
}

/// Look-at camera with perspective or parallel projection.
///
/// The camera orbits its focal point; [`view_up`](Self::view_up) is kept
/// orthogonal to the direction of projection by
/// [`orthogonalize_view_up`](Self::orthogonalize_view_up). Angles are in
/// degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at point.
    pub focal_point: Vec3,
    /// Up direction.
    pub view_up: Vec3,
    /// Vertical field of view in degrees.
    pub view_angle: f32,
    /// Near and far clipping distances along the direction of projection.
    pub clipping_range: [f32; 2],
    /// Use an orthographic projection instead of a perspective one.
    pub parallel_projection: bool,
    /// Half the height of the orthographic view volume in world units.
    pub parallel_scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::Z,
            focal_point: Vec3::ZERO,
            view_up: Vec3::Y,
            view_angle: 30.0,
            clipping_range: [0.01, 1000.01],
            parallel_projection: false,
            parallel_scale: 1.0,
        }
    }
}

impl Camera {
    /// Unit vector from the eye toward the focal point.
    #[must_use]
    pub fn direction_of_projection(&self) -> Vec3 {
        (self.focal_point - self.position).normalize_or_zero()
    }

    /// Unit vector from the focal point toward the eye.
    #[must_use]
    pub fn view_plane_normal(&self) -> Vec3 {
        -self.direction_of_projection()
    }

    /// Screen-right direction (first row of the view matrix).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.view_up
            .cross(self.view_plane_normal())
            .normalize_or_zero()
    }

    /// Eye to focal point distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.focal_point)
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    /// Projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let [near, far] = self.clipping_range;
        if self.parallel_projection {
            let s = self.parallel_scale;
            Mat4::orthographic_rh(-s * aspect, s * aspect, -s, s, near, far)
        } else {
            // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
            // convention)
            Mat4::perspective_rh(
                self.view_angle.to_radians(),
                aspect,
                near,
                far,
            )
        }
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a world point to display coordinates. The returned `z` is the
    /// depth-buffer value in `[0, 1]`.
    #[must_use]
    pub fn world_to_display(&self, world: Vec3, viewport: &DisplayRect) -> Vec3 {
        let clip = self.view_projection(viewport.aspect())
            * Vec4::new(world.x, world.y, world.z, 1.0);
        let ndc = clip.truncate() / clip.w;
        Vec3::new(
            viewport.x + (ndc.x + 1.0) * 0.5 * viewport.width,
            viewport.y + (ndc.y + 1.0) * 0.5 * viewport.height,
            ndc.z,
        )
    }

    /// Unproject a display point with its depth-buffer value back to world
    /// space.
    #[must_use]
    pub fn display_to_world(
        &self,
        display: Vec3,
        viewport: &DisplayRect,
    ) -> Vec3 {
        let ndc = Vec4::new(
            2.0 * (display.x - viewport.x) / viewport.width - 1.0,
            2.0 * (display.y - viewport.y) / viewport.height - 1.0,
            display.z,
            1.0,
        );
        let world =
            self.view_projection(viewport.aspect()).inverse() * ndc;
        world.truncate() / world.w
    }

    /// Rotate the eye about the view-up axis through the focal point.
    pub fn azimuth(&mut self, degrees: f32) {
        let axis = self.view_up.normalize_or_zero();
        let rot = Quat::from_axis_angle(axis, degrees.to_radians());
        self.position =
            self.focal_point + rot * (self.position - self.focal_point);
    }

    /// Rotate the eye about the screen-horizontal axis through the focal
    /// point. Positive angles move the eye up.
    pub fn elevation(&mut self, degrees: f32) {
        let axis = -self.right();
        let rot = Quat::from_axis_angle(axis, degrees.to_radians());
        self.position =
            self.focal_point + rot * (self.position - self.focal_point);
    }

    /// Rotate the view-up vector about the direction of projection.
    pub fn roll(&mut self, degrees: f32) {
        let axis = self.direction_of_projection();
        let rot = Quat::from_axis_angle(axis, degrees.to_radians());
        self.view_up = rot * self.view_up;
    }

    /// Move the eye toward the focal point, dividing the distance by
    /// `factor`. Factors above one move closer.
    pub fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let distance = self.distance() / factor;
        self.position =
            self.focal_point - self.direction_of_projection() * distance;
    }

    /// Zoom a parallel projection by dividing its scale by `factor`.
    pub fn zoom_parallel(&mut self, factor: f32) {
        if factor > 0.0 {
            self.parallel_scale /= factor;
        }
    }

    /// Shift eye and focal point by the same offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.focal_point += offset;
    }

    /// Rotate eye and focal point about `point`: first by `elevation` about
    /// the negative screen-right axis, then by `azimuth` about view-up.
    pub fn rotate_about(&mut self, point: Vec3, azimuth: f32, elevation: f32) {
        let up = self.view_up.normalize_or_zero();
        let axis = -self.right();
        if up == Vec3::ZERO || axis == Vec3::ZERO {
            return;
        }
        let transform = Mat4::from_translation(point)
            * Mat4::from_axis_angle(up, azimuth.to_radians())
            * Mat4::from_axis_angle(axis, elevation.to_radians())
            * Mat4::from_translation(-point);
        self.position = transform.transform_point3(self.position);
        self.focal_point = transform.transform_point3(self.focal_point);
    }

    /// Make view-up orthogonal to the direction of projection.
    pub fn orthogonalize_view_up(&mut self) {
        let up = self.view_plane_normal().cross(self.right());
        if up != Vec3::ZERO {
            self.view_up = up.normalize();
        }
    }

    /// Frame `bounds` so the bounding sphere fits the smaller field of view
    /// for the given aspect ratio, keeping the current view direction.
    pub fn reset_to_bounds(&mut self, bounds: &Bounds, aspect: f32) {
        if !bounds.is_valid() {
            return;
        }
        let center = bounds.center();
        let mut radius = bounds.diagonal() * 0.5;
        if radius <= 0.0 {
            radius = 0.5;
        }

        let mut vpn = self.view_plane_normal();
        if vpn == Vec3::ZERO {
            vpn = Vec3::Z;
        }
        if self.view_up.cross(vpn).length_squared() < 1e-12 {
            self.view_up = if vpn.y.abs() < 0.9 { Vec3::Y } else { Vec3::Z };
        }

        let half_v = self.view_angle.to_radians() * 0.5;
        let half = if aspect < 1.0 {
            (half_v.tan() * aspect).atan()
        } else {
            half_v
        };
        let distance = radius / half.sin();

        self.focal_point = center;
        self.position = center + vpn * distance;
        self.parallel_scale = if aspect < 1.0 { radius / aspect } else { radius };
        self.orthogonalize_view_up();
        self.reset_clipping_range(bounds);
    }

    /// Fit the clipping planes tightly around `bounds`.
    pub fn reset_clipping_range(&mut self, bounds: &Bounds) {
        if !bounds.is_valid() {
            return;
        }
        let dop = self.direction_of_projection();
        let (mut near, mut far) = bounds
            .corners()
            .iter()
            .map(|c| (*c - self.position).dot(dop))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });

        let spread = (far - near).max(1e-3);
        near -= spread * 0.01;
        far += spread * 0.01;
        if far <= 0.0 {
            far = 1.0;
        }
        near = near.max(far * NEAR_CLIPPING_TOLERANCE);
        self.clipping_range = [near, far];
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera, aspect: f32) {
        self.view_proj = camera.view_projection(aspect).to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> DisplayRect {
        DisplayRect {
            x: 0.0,
            y: 0.0,
            width: 400.0,
            height: 300.0,
        }
    }

    #[test]
    fn unprojection_inverts_projection() {
        let camera = Camera {
            position: Vec3::new(3.0, 2.0, 10.0),
            ..Camera::default()
        };
        let world = Vec3::new(0.5, -0.25, 0.3);
        let display = camera.world_to_display(world, &viewport());
        assert!(display.z > 0.0 && display.z < 1.0);
        let back = camera.display_to_world(display, &viewport());
        assert!((back - world).length() < 1e-3, "{back:?}");
    }

    #[test]
    fn parallel_unprojection_inverts_projection() {
        let camera = Camera {
            parallel_projection: true,
            parallel_scale: 2.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            ..Camera::default()
        };
        let world = Vec3::new(1.0, 0.5, 0.0);
        let display = camera.world_to_display(world, &viewport());
        let back = camera.display_to_world(display, &viewport());
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn focal_point_projects_to_viewport_center() {
        let camera = Camera::default();
        let display = camera.world_to_display(Vec3::ZERO, &viewport());
        assert!((display.x - 200.0).abs() < 1e-3);
        assert!((display.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn dolly_above_one_moves_closer() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Camera::default()
        };
        camera.dolly(2.0);
        assert!((camera.distance() - 5.0).abs() < 1e-5);
        assert_eq!(camera.focal_point, Vec3::ZERO);
    }

    #[test]
    fn elevation_moves_eye_up() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Camera::default()
        };
        camera.elevation(30.0);
        assert!(camera.position.y > 0.0);
        assert!((camera.distance() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn rotate_about_preserves_distance_to_point() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Camera::default()
        };
        let pivot = Vec3::new(1.0, 1.0, 0.0);
        let before = camera.position.distance(pivot);
        camera.rotate_about(pivot, 25.0, -10.0);
        camera.orthogonalize_view_up();
        assert!((camera.position.distance(pivot) - before).abs() < 1e-4);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);
    }

    #[test]
    fn reset_frames_bounds_on_the_view_axis() {
        let mut camera = Camera::default();
        let bounds = Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        camera.reset_to_bounds(&bounds, 1.0);
        assert_eq!(camera.focal_point, Vec3::ZERO);
        let radius = 3.0_f32.sqrt();
        let expected = radius / 15.0_f32.to_radians().sin();
        assert!((camera.distance() - expected).abs() < 1e-3);
        let [near, far] = camera.clipping_range;
        assert!(near > 0.0 && near < expected - 1.0);
        assert!(far > expected + 1.0);
    }

    #[test]
    fn narrow_aspect_backs_off_further() {
        let bounds = Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let mut wide = Camera::default();
        wide.reset_to_bounds(&bounds, 2.0);
        let mut tall = Camera::default();
        tall.reset_to_bounds(&bounds, 0.5);
        assert!(tall.distance() > wide.distance());
    }
}
