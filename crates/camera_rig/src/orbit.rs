use axes::UpFrame;
use glam::{Vec2, Vec3};
use settings::CameraSettings;
use std::f32::consts::TAU;
use tracing::trace;

use crate::camera::Camera;
use crate::spherical::Spherical;

/// Per-frame exponential smoothing coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub rotation_ease: f32,
    pub translation_ease: f32,
    pub friction: f32,
}

impl Easing {
    pub fn rotation_step(&self) -> f32 {
        self.rotation_ease * self.friction
    }

    pub fn translation_step(&self) -> f32 {
        self.translation_ease * self.friction
    }
}

impl From<&CameraSettings> for Easing {
    fn from(settings: &CameraSettings) -> Self {
        Self {
            rotation_ease: settings.rotation_ease,
            translation_ease: settings.translation_ease,
            friction: settings.friction,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::from(&CameraSettings::default())
    }
}

/// Orbit position and pan target, each held as an immediate *end* value
/// (written by input) and an *eased* value (advanced once per frame).
#[derive(Debug, Clone)]
pub struct OrbitState {
    radius: f32,
    spherical_end: Spherical,
    spherical_eased: Spherical,
    target_end: Vec3,
    target_eased: Vec3,
    frame: UpFrame,
}

impl OrbitState {
    /// Captures the orbit from the camera's current placement around `target`.
    pub fn from_camera(camera: &Camera, target: Vec3) -> Self {
        let frame = UpFrame::new(camera.up);
        let mut spherical = Spherical::from_vec3(frame.to_canonical(camera.position - target));
        spherical.make_safe();
        Self {
            radius: spherical.radius,
            spherical_end: spherical,
            spherical_eased: spherical,
            target_end: target,
            target_eased: target,
            frame,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn spherical_end(&self) -> Spherical {
        self.spherical_end
    }

    pub fn spherical_eased(&self) -> Spherical {
        self.spherical_eased
    }

    pub fn target_end(&self) -> Vec3 {
        self.target_end
    }

    pub fn target_eased(&self) -> Vec3 {
        self.target_eased
    }

    /// Steers the orbit by a pixel delta. Only the end value moves.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.spherical_end.theta += TAU * delta.x / height;
        self.spherical_end.phi += TAU * delta.y / height;
        self.spherical_end.make_safe();
    }

    /// Slides the end target along the camera's local right/up axes so the
    /// scene follows the pointer at the target's depth.
    pub fn pan(&mut self, delta: Vec2, camera: &Camera, viewport_height: u32, pan_speed: f32) {
        let height = viewport_height.max(1) as f32;
        let target_distance = (camera.position - self.target_eased).length();
        let world_per_pixel = camera.visible_extent_at(target_distance).height / height;
        let scale = world_per_pixel * pan_speed;
        let offset = -(camera.right() * delta.x + camera.up_axis() * delta.y) * scale;
        self.target_end += offset;
    }

    /// Advances the eased values one frame and returns the new eye position.
    pub fn step(&mut self, easing: &Easing) -> Vec3 {
        let rotation = easing.rotation_step();
        let translation = easing.translation_step();

        let eased = &mut self.spherical_eased;
        eased.theta += (self.spherical_end.theta - eased.theta) * rotation;
        eased.phi += (self.spherical_end.phi - eased.phi) * rotation;
        self.target_eased += (self.target_end - self.target_eased) * translation;

        let offset = Spherical::new(self.radius, eased.phi, eased.theta).to_vec3();
        let eye = self.target_eased + self.frame.from_canonical(offset);
        trace!(
            theta = eased.theta,
            phi = eased.phi,
            x = eye.x,
            y = eye.y,
            z = eye.z,
            "orbit step"
        );
        eye
    }

    /// Writes the eased orbit into `camera` and refreshes its world matrix.
    pub fn apply(&mut self, camera: &mut Camera, easing: &Easing) {
        camera.position = self.step(easing);
        camera.look_at(self.target_eased);
        camera.update_world_matrix();
    }
}
