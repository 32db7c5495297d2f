use glam::Vec3;
use std::f32::consts::PI;

use crate::camera::PerspectiveCamera;

pub const DEFAULT_DAMPING_FACTOR: f32 = 0.05;

const MIN_POLAR_EPSILON: f32 = 1e-6;
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit-style camera controls: rotate around, dolly toward and pan the look-at target.
///
/// Gestures accumulate into pending deltas; `update` applies them. With damping enabled
/// only `damping_factor` of the pending delta is applied per update and the remainder
/// decays, which gives the camera its inertia.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

/// Offset from the target in spherical coordinates, Y up
#[derive(Debug, Clone, Copy)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Orbit by a pointer drag of `(dx, dy)` pixels in a viewport `viewport_height` tall
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let per_pixel = 2.0 * PI * self.rotate_speed / viewport_height;
        self.delta_theta -= dx * per_pixel;
        self.delta_phi -= dy * per_pixel;
    }

    /// Dolly toward the target for positive `steps`, away for negative
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= 0.95f32.powf(steps * self.zoom_speed);
    }

    /// Slide camera and target together by a pointer drag of `(dx, dy)` pixels
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let distance = (camera.position - self.target).length()
            * (camera.fov_y_degrees.to_radians() * 0.5).tan();
        let world_per_pixel = 2.0 * distance * self.pan_speed / viewport_height;

        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        self.pan_offset += -right * dx * world_per_pixel + up * dy * world_per_pixel;
    }

    /// True while gestures are still being applied
    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta != 0.0
            || self.delta_phi != 0.0
            || self.scale != 1.0
            || self.pan_offset != Vec3::ZERO
    }

    /// Drop any accumulated gesture motion
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    /// Apply pending motion to the camera and orient it at the target.
    /// Returns true when the camera position changed.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if !self.has_pending_motion() {
            camera.look_at(self.target);
            return false;
        }

        let step = if self.enable_damping {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut spherical = Spherical::from_offset(camera.position - self.target);
        spherical.theta += self.delta_theta * step;
        spherical.phi += self.delta_phi * step;

        let min_phi = self.min_polar_angle.max(MIN_POLAR_EPSILON);
        let max_phi = self.max_polar_angle.min(PI - MIN_POLAR_EPSILON);
        spherical.phi = spherical.phi.clamp(min_phi, max_phi.max(min_phi));

        let scale = 1.0 + (self.scale - 1.0) * step;
        spherical.radius = (spherical.radius * scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        let previous = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - step;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.scale = 1.0 + (self.scale - 1.0) * decay;
            self.pan_offset *= decay;
            self.settle();
        } else {
            self.stop();
        }

        camera.position.distance_squared(previous) > SETTLE_EPSILON * SETTLE_EPSILON
    }

    /// Snap negligible residual motion to zero so damping terminates
    fn settle(&mut self) {
        if self.delta_theta.abs() < SETTLE_EPSILON {
            self.delta_theta = 0.0;
        }
        if self.delta_phi.abs() < SETTLE_EPSILON {
            self.delta_phi = 0.0;
        }
        if (self.scale - 1.0).abs() < SETTLE_EPSILON {
            self.scale = 1.0;
        }
        if self.pan_offset.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON {
            self.pan_offset = Vec3::ZERO;
        }
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spherical_round_trip_off_axis() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!(back.distance(offset) < 1e-5);
    }

    #[test]
    fn test_spherical_theta_measured_from_z() {
        let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 5.0));
        assert!(s.theta.abs() < 1e-6);
        assert!((s.phi - PI / 2.0).abs() < 1e-6);
        assert!((s.radius - 5.0).abs() < 1e-6);
    }
}
