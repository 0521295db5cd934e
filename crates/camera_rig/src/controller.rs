use glam::Vec3;
use settings::{CameraSettings, SettingsError};
use tracing::{debug, warn};

use crate::camera::SharedCamera;
use crate::frame::{FrameHandle, FrameLoop, FrameScheduler};
use crate::input::{EventResponse, GestureDelta, InputTracker, PointerEvent};
use crate::orbit::{Easing, OrbitState};
use crate::ControllerError;

/// Smallest camera-to-target distance an orbit can be built from.
const MIN_RADIUS: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Enabled,
    Disabled,
}

/// Mouse-driven orbit/pan controller for one mounted page.
///
/// Input only writes the orbit's end state; the camera is touched exclusively
/// from [`OrbitController::on_frame`]. Once disabled, a controller stays
/// disabled; mount a fresh one instead.
#[derive(Debug)]
pub struct OrbitController {
    camera: SharedCamera,
    input: InputTracker,
    orbit: OrbitState,
    easing: Easing,
    pan_speed: f32,
    viewport: (u32, u32),
    frames: FrameLoop,
    lifecycle: Lifecycle,
}

impl OrbitController {
    pub fn new(
        camera: SharedCamera,
        target: Vec3,
        settings: &CameraSettings,
    ) -> Result<Self, ControllerError> {
        if let Err(err) = settings.validate() {
            warn!(%err, "rejecting camera settings");
            return Err(err.into());
        }
        let orbit = {
            let cam = camera.borrow();
            OrbitState::from_camera(&cam, target)
        };
        if !orbit.radius().is_finite() || orbit.radius() < MIN_RADIUS {
            return Err(ControllerError::DegenerateRadius(orbit.radius()));
        }
        debug!(radius = orbit.radius(), "orbit controller created");
        Ok(Self {
            camera,
            input: InputTracker::new(settings),
            orbit,
            easing: Easing::from(settings),
            pan_speed: settings.pan_speed,
            viewport: (1, 1),
            frames: FrameLoop::default(),
            lifecycle: Lifecycle::Uninitialized,
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn pan_speed(&self) -> f32 {
        self.pan_speed
    }

    /// Changes the pan multiplier for subsequent drags. Must be positive.
    pub fn set_pan_speed(&mut self, pan_speed: f32) -> Result<(), ControllerError> {
        if !pan_speed.is_finite() || pan_speed <= 0.0 {
            return Err(out_of_range("pan_speed", pan_speed));
        }
        self.pan_speed = pan_speed;
        Ok(())
    }

    /// Changes the shared easing damping. Must lie in (0, 1); takes effect
    /// on the next frame, including an ease already in flight.
    pub fn set_friction(&mut self, friction: f32) -> Result<(), ControllerError> {
        if !(friction > 0.0 && friction < 1.0) {
            return Err(out_of_range("friction", friction));
        }
        self.easing.friction = friction;
        Ok(())
    }

    /// Attaches input listeners and starts the frame loop.
    pub fn enable(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), ControllerError> {
        match self.lifecycle {
            Lifecycle::Enabled => Ok(()),
            Lifecycle::Disabled => Err(ControllerError::Disabled),
            Lifecycle::Uninitialized => {
                self.input.attach();
                self.frames.start(scheduler);
                self.lifecycle = Lifecycle::Enabled;
                debug!("orbit controller enabled");
                Ok(())
            }
        }
    }

    /// Detaches every listener and cancels the pending frame. Safe to call
    /// more than once, or before `enable`.
    pub fn disable(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.input.detach();
        self.frames.stop(scheduler);
        if self.lifecycle != Lifecycle::Disabled {
            debug!("orbit controller disabled");
        }
        self.lifecycle = Lifecycle::Disabled;
    }

    pub fn destroy(mut self, scheduler: &mut dyn FrameScheduler) {
        self.disable(scheduler);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.borrow_mut().set_aspect(width, height);
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventResponse {
        let (response, gesture) = self.input.handle(event);
        let height = self.viewport.1;
        match gesture {
            Some(GestureDelta::Rotate(delta)) => self.orbit.rotate(delta, height),
            Some(GestureDelta::Pan(delta)) => {
                let camera = self.camera.borrow();
                self.orbit.pan(delta, &camera, height, self.pan_speed);
            }
            None => {}
        }
        response
    }

    /// Runs one frame of easing if `handle` belongs to this controller's loop.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut dyn FrameScheduler) -> bool {
        if !self.frames.on_frame(handle, scheduler) {
            return false;
        }
        let mut camera = self.camera.borrow_mut();
        self.orbit.apply(&mut camera, &self.easing);
        true
    }
}

fn out_of_range(field: &'static str, value: f32) -> ControllerError {
    ControllerError::Settings(SettingsError::OutOfRange { field, value })
}
