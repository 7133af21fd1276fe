use glam::{Mat4, Vec3};
use ofrenda_render::Projection;

/// Damped orbit camera circling a target point.
///
/// Drag input adds angular velocity; `update` applies a damped fraction of it
/// each frame, so the view keeps gliding briefly after the mouse stops.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub damping: f32,
    pub sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub projection: Projection,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(50.0, 0.05)
    }
}

const PITCH_LIMIT: f32 = 1.55;

impl OrbitCamera {
    /// Camera at `(0, 0, distance)` looking at the origin.
    pub fn new(distance: f32, damping: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.0,
            pitch: 0.0,
            damping,
            sensitivity: 0.005,
            min_distance: 5.0,
            max_distance: 400.0,
            projection: Projection {
                fov_y_radians: 75.0_f32.to_radians(),
                aspect: 16.0 / 9.0,
                near: 0.1,
                far: 1000.0,
            },
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Accumulate a mouse drag in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * self.sensitivity;
        self.pitch_velocity += dy * self.sensitivity;
    }

    /// Scroll zoom; positive `steps` move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance =
            (self.distance * 0.9_f32.powf(steps)).clamp(self.min_distance, self.max_distance);
    }

    /// Apply one frame of damped motion.
    pub fn update(&mut self) {
        if self.damping > 0.0 {
            self.yaw += self.yaw_velocity * self.damping;
            self.pitch += self.pitch_velocity * self.damping;
            self.yaw_velocity *= 1.0 - self.damping;
            self.pitch_velocity *= 1.0 - self.damping;
        } else {
            self.yaw += self.yaw_velocity;
            self.pitch += self.pitch_velocity;
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
        }
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_on_z_axis() {
        let cam = OrbitCamera::default();
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn drag_glides_then_settles() {
        let mut cam = OrbitCamera::default();
        cam.drag(100.0, 0.0);
        cam.update();
        let first = cam.yaw;
        assert!(first < 0.0);
        for _ in 0..500 {
            cam.update();
        }
        let settled = cam.yaw;
        cam.update();
        assert!(settled < first);
        assert!((cam.yaw - settled).abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::new(50.0, 0.0);
        cam.drag(0.0, 10_000.0);
        cam.update();
        assert_eq!(cam.pitch, PITCH_LIMIT);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, cam.min_distance);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, cam.max_distance);
    }

    #[test]
    fn distance_is_kept_while_orbiting() {
        let mut cam = OrbitCamera::new(30.0, 0.0);
        cam.drag(50.0, -20.0);
        cam.update();
        assert!((cam.eye().length() - 30.0).abs() < 1e-3);
    }
}
