use glam::{Mat4, Vec3};
use vislab_common::RenderSettings;
use vislab_render::RenderView;

/// Fly camera with position, yaw, pitch, and projection parameters.
/// Near and far planes come from [`RenderSettings`].
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 5.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -15.0_f32.to_radians(),
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            speed: 3.0,
            sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Move by a camera-relative intent (x = right, y = up, z = forward)
    /// scaled by `speed * dt`. Up is world up.
    pub fn translate(&mut self, intent: Vec3, dt: f32) {
        let step = self.speed * dt;
        self.position += self.right() * intent.x * step
            + Vec3::Y * intent.y * step
            + self.forward() * intent.z * step;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(
            -89.0_f32.to_radians(),
            89.0_f32.to_radians(),
        );
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Perspective or orthographic projection depending on the settings.
    /// The orthographic box matches the perspective frustum's extent at the
    /// distance to the origin.
    pub fn projection_matrix(&self, settings: &RenderSettings) -> Mat4 {
        let s = settings.sanitized();
        if s.perspective {
            Mat4::perspective_rh(self.fov, self.aspect, s.near, s.far)
        } else {
            let distance = self.position.length().max(1.0);
            let half_h = distance * (self.fov * 0.5).tan();
            let half_w = half_h * self.aspect;
            Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, s.near, s.far)
        }
    }

    pub fn render_view(&self, settings: &RenderSettings) -> RenderView {
        RenderView {
            eye: self.position,
            view: self.view_matrix(),
            projection: self.projection_matrix(settings),
        }
    }
}

/// Fixed camera looking down -Z at the z = 0 plane.
/// The view spans [-aspect, aspect] x [-1, 1] divided by `zoom`.
#[derive(Debug, Clone)]
pub struct OrthoCamera {
    pub aspect: f32,
    pub zoom: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            zoom: 1.0,
        }
    }
}

impl OrthoCamera {
    const EYE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub fn render_view(&self) -> RenderView {
        let zoom = self.zoom.max(0.01);
        let half_h = 1.0 / zoom;
        let half_w = self.aspect / zoom;
        RenderView {
            eye: Self::EYE,
            view: Mat4::look_at_rh(Self::EYE, Vec3::ZERO, Vec3::Y),
            projection: Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, 0.0, 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = FlyCamera::default();
        let vp = cam.render_view(&RenderSettings::default()).view_projection();
        assert!(vp.is_finite());
    }

    #[test]
    fn default_camera_sees_origin() {
        let cam = FlyCamera::default();
        let vp = cam.render_view(&RenderSettings::default()).view_projection();
        let clip = vp.project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1.0 && clip.y.abs() < 1.0);
        assert!((0.0..1.0).contains(&clip.z));
    }

    #[test]
    fn camera_movement() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.translate(Vec3::new(0.0, 0.0, 1.0), 1.0);
        assert!((cam.position - start - cam.forward() * cam.speed).length() < 1e-5);
        let before = cam.position;
        cam.translate(Vec3::new(0.0, -1.0, 0.0), 0.5);
        assert!((cam.position.y - (before.y - cam.speed * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians());
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn projection_switches_with_settings() {
        let cam = FlyCamera::default();
        let persp = RenderSettings::default();
        let ortho = RenderSettings {
            perspective: false,
            ..persp
        };
        let p = cam.projection_matrix(&persp);
        let o = cam.projection_matrix(&ortho);
        assert_ne!(p, o);
        // Orthographic projections keep w = 1.
        assert_eq!(o.row(3), glam::Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(o.is_finite());
    }

    #[test]
    fn invalid_planes_still_project() {
        let cam = FlyCamera::default();
        let settings = RenderSettings {
            near: 50.0,
            far: -3.0,
            ..RenderSettings::default()
        };
        assert!(cam.projection_matrix(&settings).is_finite());
    }

    #[test]
    fn ortho_camera_maps_view_edges() {
        let cam = OrthoCamera {
            aspect: 2.0,
            zoom: 1.0,
        };
        let vp = cam.render_view().view_projection();
        let corner = vp.project_point3(Vec3::new(2.0, 1.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&corner.z));
    }
}
