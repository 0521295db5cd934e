mod display;
mod overlay;
mod page;
mod pointer;

use anyhow::{Context, Result};
use camera_rig::EventResponse;
use display::DisplaySync;
use page::HomePage;
use pointer::PointerAdapter;
use settings::{SettingsStore, UserSettings};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowAttributes, WindowId},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings_store = SettingsStore::new().context("settings store init failed")?;
    let user_settings = match settings_store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("Using default settings (failed to load): {err}");
            UserSettings::default()
        }
    };
    info!("Settings file: {}", settings_store.path().display());

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = SandboxApp::new(user_settings);
    event_loop.run_app(&mut app).context("event loop error")?;
    Ok(())
}

struct SandboxApp {
    user_settings: UserSettings,
    window: Option<Window>,
    window_id: Option<WindowId>,
    page: Option<HomePage>,
    display: DisplaySync,
    pointer: PointerAdapter,
    last_frame_time: Option<Instant>,
}

impl SandboxApp {
    fn new(user_settings: UserSettings) -> Self {
        Self {
            user_settings,
            window: None,
            window_id: None,
            page: None,
            display: DisplaySync::default(),
            pointer: PointerAdapter::default(),
            last_frame_time: None,
        }
    }

    fn unmount(&mut self) {
        if let Some(page) = self.page.take() {
            page.unmount(&mut self.display);
        }
    }

    fn handle_key(&mut self, key: &Key) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        match key {
            Key::Named(NamedKey::Tab) => page.select_next_option(),
            Key::Named(NamedKey::ArrowUp) => page.nudge_option(1.0),
            Key::Named(NamedKey::ArrowDown) => page.nudge_option(-1.0),
            _ => return,
        }
        if let Some(window) = self.window.as_ref() {
            window.set_title(&page.summary());
        }
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop
            .create_window(WindowAttributes::default().with_title("orbit-sandbox".to_string()))
        {
            Ok(window) => window,
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let viewport = (size.width.max(1), size.height.max(1));
        match HomePage::mount(&self.user_settings, viewport, &mut self.display) {
            Ok(page) => {
                window.set_title(&page.summary());
                self.page = Some(page);
            }
            Err(err) => {
                error!("failed to mount home page: {err}");
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window_id = Some(window.id());
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if Some(window_id) != self.window_id {
            return;
        }

        if let (Some(pointer_event), Some(page)) =
            (self.pointer.translate(&event), self.page.as_mut())
        {
            if page.pointer(&pointer_event) == EventResponse::SuppressDefault {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(page) = self.page.as_mut() {
                    page.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.handle_key(&event.logical_key);
            }
            WindowEvent::RedrawRequested => {
                let Some(handle) = self.display.fire() else {
                    return;
                };
                let now = Instant::now();
                self.last_frame_time = Some(now);
                if let Some(page) = self.page.as_mut() {
                    if let Some(title) = page.frame(handle, &mut self.display, now) {
                        if let Some(window) = self.window.as_ref() {
                            window.set_title(&title);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.display.has_pending() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }
        // Optional FPS cap from settings (0 = uncapped, paced by vsync).
        let fps_cap = self.user_settings.fps_cap.max(0.0);
        if fps_cap > 0.0 {
            let target = Duration::from_secs_f32(1.0 / fps_cap);
            if let Some(last) = self.last_frame_time {
                let wait_until = last + target;
                if Instant::now() < wait_until {
                    event_loop.set_control_flow(ControlFlow::WaitUntil(wait_until));
                    return;
                }
            }
        }
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}
