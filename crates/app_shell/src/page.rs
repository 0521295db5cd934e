use camera_rig::{
    Camera, ControllerError, EventResponse, FrameScheduler, OrbitController, PointerEvent,
    SharedCamera,
};
use glam::Vec3;
use settings::UserSettings;
use std::time::Instant;

use crate::overlay::{DebugOverlay, Tweak};

const HOME_DISTANCE: f32 = 15.0;

/// The 3D home page: camera, orbit controller and debug overlay, alive
/// between mount and unmount.
pub struct HomePage {
    camera: SharedCamera,
    controller: OrbitController,
    overlay: DebugOverlay,
}

impl HomePage {
    pub fn mount(
        settings: &UserSettings,
        viewport: (u32, u32),
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<Self, ControllerError> {
        let axes = settings.camera.axis_preset.axis_system();
        let mut camera = Camera::new(
            axes.back_vec() * HOME_DISTANCE,
            axes.up_vec(),
            settings.camera.fov_degrees,
            1.0,
        );
        camera.look_at(Vec3::ZERO);
        camera.update_world_matrix();
        let camera = camera.shared();

        let mut controller = OrbitController::new(camera.clone(), Vec3::ZERO, &settings.camera)?;
        controller.set_viewport(viewport.0, viewport.1);
        controller.enable(scheduler)?;

        let mut overlay = DebugOverlay::new(&settings.debug, &settings.camera);
        overlay.info(format!(
            "Mounted home page ({}, fov {:.0})",
            settings.camera.axis_preset.label(),
            settings.camera.fov_degrees
        ));
        Ok(Self {
            camera,
            controller,
            overlay,
        })
    }

    pub fn unmount(self, scheduler: &mut dyn FrameScheduler) {
        self.controller.destroy(scheduler);
        tracing::info!("Unmounted home page");
    }

    pub fn select_next_option(&mut self) {
        self.overlay.options.select_next();
        let message = self
            .overlay
            .options
            .selected()
            .map(|option| format!("Selected {} ({:.2})", option.tweak.label(), option.value));
        if let Some(message) = message {
            self.overlay.info(message);
        }
    }

    /// Steps the selected option and pushes the new value into the controller.
    pub fn nudge_option(&mut self, direction: f32) {
        let Some(nudged) = self.overlay.options.nudge_selected(direction) else {
            return;
        };
        let label = nudged.tweak.label();
        if nudged.at_limit {
            self.overlay.warn(format!("{label} is pinned at {:.2}", nudged.value));
            return;
        }
        let applied = match nudged.tweak {
            Tweak::PanSpeed => self.controller.set_pan_speed(nudged.value),
            Tweak::Friction => self.controller.set_friction(nudged.value),
        };
        match applied {
            Ok(()) => self.overlay.info(format!("{label} = {:.2}", nudged.value)),
            Err(err) => self.overlay.warn(format!("{label} rejected: {err}")),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.controller.set_viewport(width.max(1), height.max(1));
    }

    pub fn pointer(&mut self, event: &PointerEvent) -> EventResponse {
        self.controller.handle_pointer(event)
    }

    /// Runs the frame callback and refreshes stats. Returns a new title when
    /// the readout should be redrawn.
    pub fn frame(
        &mut self,
        handle: camera_rig::FrameHandle,
        scheduler: &mut dyn FrameScheduler,
        now: Instant,
    ) -> Option<String> {
        if !self.controller.on_frame(handle, scheduler) {
            return None;
        }
        self.overlay.stats.tick(now)?;
        Some(self.summary())
    }

    pub fn summary(&self) -> String {
        let eye = self.camera.borrow().position;
        self.overlay.summary(&self.controller, eye)
    }
}
