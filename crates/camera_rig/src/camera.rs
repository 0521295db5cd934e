use glam::{Mat3, Mat4, Quat, Vec3};
use std::{cell::RefCell, rc::Rc};

/// Camera handle shared between the host renderer and the controller.
pub type SharedCamera = Rc<RefCell<Camera>>;

/// Perspective render-target camera.
///
/// Looks down its local -Z axis. `world` is only refreshed by
/// [`Camera::update_world_matrix`]; renderers read that, not `position`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    world: Mat4,
}

/// World-space size of the view frustum cross-section at some depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleExtent {
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(position: Vec3, up: Vec3, fov_y_deg: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            orientation: Quat::IDENTITY,
            up,
            fov_y_deg,
            aspect,
            world: Mat4::IDENTITY,
        };
        camera.update_world_matrix();
        camera
    }

    pub fn shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    /// Turns the camera so it faces `target`. Leaves the orientation alone if
    /// the direction is undefined (target at the eye or along `up`).
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        let up = right.cross(forward);
        let basis = Mat3::from_cols(right, up, -forward);
        self.orientation = Quat::from_mat3(&basis).normalize();
    }

    pub fn update_world_matrix(&mut self) {
        self.world = Mat4::from_rotation_translation(self.orientation, self.position);
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Local right axis (column 0 of the world matrix).
    pub fn right(&self) -> Vec3 {
        self.world.x_axis.truncate()
    }

    /// Local up axis (column 1 of the world matrix).
    pub fn up_axis(&self) -> Vec3 {
        self.world.y_axis.truncate()
    }

    pub fn forward(&self) -> Vec3 {
        -self.world.z_axis.truncate()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn visible_extent_at(&self, distance: f32) -> VisibleExtent {
        let height = 2.0 * (self.fov_y_deg.to_radians() * 0.5).tan() * distance;
        VisibleExtent {
            width: height * self.aspect,
            height,
        }
    }
}
