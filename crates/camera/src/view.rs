use foundation::math::{Vec2, Vec3};
use scene::picking::Ray;

use crate::orbit::OrbitState;

/// Vertical field of view of the globe camera.
pub const DEFAULT_FOV_Y_DEG: f64 = 75.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;

/// Canvas size in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Pixel position to normalized device coordinates (+Y up).
    pub fn to_ndc(&self, pos_px: Vec2) -> Vec2 {
        Vec2::new(
            (pos_px.x / self.width) * 2.0 - 1.0,
            -(pos_px.y / self.height) * 2.0 + 1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Where the camera sits and what it looks at for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub fov_y_rad: f64,
}

struct Basis {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl CameraPose {
    /// Spherical placement around the (offset) look-at point:
    ///
    /// ```text
    /// eye.x = r sin(yaw) cos(pitch) + offset.x
    /// eye.y = r sin(pitch)          + offset.y
    /// eye.z = r cos(yaw) cos(pitch)
    /// ```
    ///
    /// The camera looks at `(offset.x, offset.y, 0)`, not the globe center.
    pub fn from_orbit(state: &OrbitState) -> Self {
        let r = state.radius;
        let (sy, cy) = state.yaw.sin_cos();
        let (sp, cp) = state.pitch.sin_cos();
        Self {
            eye: Vec3::new(
                r * sy * cp + state.offset.x,
                r * sp + state.offset.y,
                r * cy * cp,
            ),
            look_at: Vec3::new(state.offset.x, state.offset.y, 0.0),
            fov_y_rad: DEFAULT_FOV_Y_DEG.to_radians(),
        }
    }

    fn basis(&self) -> Basis {
        let forward = (self.look_at - self.eye)
            .normalized()
            .unwrap_or(Vec3::new(0.0, 0.0, -1.0));
        let right = forward
            .cross(Vec3::Y)
            .normalized()
            .unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let up = right.cross(forward);
        Basis { forward, right, up }
    }

    /// Ray from the eye through a pointer position.
    pub fn ray_through(&self, pos_px: Vec2, viewport: Viewport) -> Ray {
        let ndc = viewport.to_ndc(pos_px);
        let tan_half = (0.5 * self.fov_y_rad).tan();
        let b = self.basis();
        let dir = b.forward
            + b.right * (ndc.x * tan_half * viewport.aspect())
            + b.up * (ndc.y * tan_half);
        Ray::new(self.eye, dir.normalized().unwrap_or(b.forward))
    }

    /// Pixel position of a world point, or `None` if it is behind the near plane.
    pub fn project_to_screen(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        let b = self.basis();
        let rel = world - self.eye;
        let depth = rel.dot(b.forward);
        if depth <= NEAR_PLANE {
            return None;
        }
        let tan_half = (0.5 * self.fov_y_rad).tan();
        let ndc_x = rel.dot(b.right) / (depth * tan_half * viewport.aspect());
        let ndc_y = rel.dot(b.up) / (depth * tan_half);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc_y) * 0.5 * viewport.height,
        ))
    }

    /// Column-major view-projection matrix (right-handed, depth 0..1).
    pub fn view_proj_matrix(&self, aspect: f64) -> [[f32; 4]; 4] {
        let view = self.view_matrix();
        let proj = mat4_perspective_rh_z0(self.fov_y_rad, aspect, NEAR_PLANE, FAR_PLANE);
        mat4_mul(proj, view)
    }

    fn view_matrix(&self) -> [[f32; 4]; 4] {
        let Basis { forward: f, right: s, up: u } = self.basis();
        let e = self.eye;
        [
            [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
            [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
            [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
            [
                (-s.dot(e)) as f32,
                (-u.dot(e)) as f32,
                f.dot(e) as f32,
                1.0,
            ],
        ]
    }
}

/// `a * b` for column-major matrices.
fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    b.map(|column| {
        std::array::from_fn(|row| (0..4).map(|k| a[k][row] * column[k]).sum())
    })
}

fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect.max(1e-6)) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::{CameraPose, Viewport};
    use crate::orbit::{OrbitController, OrbitState};
    use foundation::math::{Vec2, Vec3, project_marker};
    use scene::picking::{PickOptions, hit_test};
    use scene::prefabs::spawn_country_markers;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn default_orbit_places_camera_on_plus_z() {
        let pose = OrbitController::default().pose();
        assert_close(pose.eye.x, 0.0, 1e-12);
        assert_close(pose.eye.y, 0.0, 1e-12);
        assert_close(pose.eye.z, 3.0, 1e-12);
        assert_eq!(pose.look_at, Vec3::ZERO);
    }

    #[test]
    fn offset_shifts_eye_and_look_at_together() {
        let state = OrbitState {
            yaw: 0.7,
            pitch: -0.3,
            radius: 2.5,
            offset: Vec2::new(-1.5, 0.25),
        };
        let pose = CameraPose::from_orbit(&state);
        assert_eq!(pose.look_at, Vec3::new(-1.5, 0.25, 0.0));
        assert_close((pose.eye - pose.look_at).length(), 2.5, 1e-12);
        assert_close(pose.eye.x, 2.5 * 0.7f64.sin() * 0.3f64.cos() - 1.5, 1e-12);
        assert_close(pose.eye.z, 2.5 * 0.7f64.cos() * 0.3f64.cos(), 1e-12);
    }

    #[test]
    fn center_pixel_ray_points_at_look_at() {
        let pose = OrbitController::default().pose();
        let vp = Viewport::new(800.0, 600.0);
        let ray = pose.ray_through(Vec2::new(400.0, 300.0), vp);
        assert_close(ray.dir.x, 0.0, 1e-12);
        assert_close(ray.dir.y, 0.0, 1e-12);
        assert_close(ray.dir.z, -1.0, 1e-12);
    }

    #[test]
    fn screen_projection_and_pointer_ray_agree() {
        let registry = spawn_country_markers();
        let mut ctrl = OrbitController::default();
        let india = registry.find("India").expect("india");
        ctrl.focus(india.position).expect("focus");
        for _ in 0..400 {
            ctrl.advance();
        }

        let pose = ctrl.pose();
        let vp = Viewport::new(1280.0, 720.0);
        let px = pose.project_to_screen(india.position, vp).expect("visible");
        let hit = hit_test(&registry, pose.ray_through(px, vp), PickOptions::default())
            .expect("hit");
        assert_eq!(hit.marker, india.id);
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let pose = OrbitController::default().pose();
        let vp = Viewport::default();
        assert!(pose.project_to_screen(Vec3::new(0.0, 0.0, 5.0), vp).is_none());
        assert!(pose.project_to_screen(project_marker(0.0, 90.0), vp).is_some());
    }

    fn transform(m: &[[f32; 4]; 4], p: Vec3) -> [f32; 4] {
        let v = [p.x as f32, p.y as f32, p.z as f32, 1.0];
        std::array::from_fn(|row| (0..4).map(|k| m[k][row] * v[k]).sum())
    }

    #[test]
    fn view_proj_agrees_with_screen_projection() {
        let registry = spawn_country_markers();
        let mut ctrl = OrbitController::default();
        let india = registry.find("India").expect("india");
        ctrl.focus(india.position).expect("focus");
        for _ in 0..400 {
            ctrl.advance();
        }

        let pose = ctrl.pose();
        let vp = Viewport::new(1280.0, 720.0);
        let clip = transform(&pose.view_proj_matrix(vp.aspect()), india.position);
        assert!(clip[3] > 0.0);
        let (ndc_x, ndc_y, depth) = (clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]);
        assert!((0.0..=1.0).contains(&depth));

        let px = pose.project_to_screen(india.position, vp).expect("visible");
        assert_close(f64::from(ndc_x), px.x / vp.width * 2.0 - 1.0, 1e-4);
        assert_close(f64::from(ndc_y), 1.0 - px.y / vp.height * 2.0, 1e-4);
    }

    #[test]
    fn view_proj_maps_look_at_to_screen_center() {
        let pose = OrbitController::default().pose();
        let m = pose.view_proj_matrix(16.0 / 9.0);
        // Column-major multiply of (0, 0, 0, 1).
        let clip = [m[3][0], m[3][1], m[3][2], m[3][3]];
        assert!(clip[3] > 0.0);
        assert!((clip[0] / clip[3]).abs() < 1e-6);
        assert!((clip[1] / clip[3]).abs() < 1e-6);
    }
}
