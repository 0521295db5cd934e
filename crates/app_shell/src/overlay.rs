use camera_rig::{OrbitController, Spherical};
use glam::Vec3;
use settings::{CameraSettings, DebugSettings};
use std::{
    collections::VecDeque,
    fmt,
    time::{Duration, Instant},
};

const FPS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Rolling frames-per-second estimate.
#[derive(Debug, Default)]
pub struct FrameStats {
    window_start: Option<Instant>,
    frames_in_window: u32,
    fps: f32,
}

impl FrameStats {
    /// Counts one displayed frame. Returns the new estimate whenever a
    /// sampling window closes.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames_in_window += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < FPS_WINDOW {
            return None;
        }
        self.fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
        self.frames_in_window = 0;
        self.window_start = Some(now);
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Controller parameter a debug option drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tweak {
    PanSpeed,
    Friction,
}

impl Tweak {
    pub fn label(self) -> &'static str {
        match self {
            Tweak::PanSpeed => "Pan speed",
            Tweak::Friction => "Friction",
        }
    }
}

/// A tweakable number with an allowed range and a per-keypress step.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOption {
    pub tweak: Tweak,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// Outcome of nudging the selected option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudged {
    pub tweak: Tweak,
    pub value: f32,
    /// The option was already pinned at the bound it was pushed against.
    pub at_limit: bool,
}

#[derive(Debug, Clone)]
pub struct DebugOptions {
    options: Vec<DebugOption>,
    selected: usize,
}

impl DebugOptions {
    /// Options seeded from the live camera settings.
    pub fn for_camera(camera: &CameraSettings) -> Self {
        Self {
            options: vec![
                DebugOption {
                    tweak: Tweak::PanSpeed,
                    value: camera.pan_speed.clamp(0.25, 5.0),
                    min: 0.25,
                    max: 5.0,
                    step: 0.25,
                },
                DebugOption {
                    tweak: Tweak::Friction,
                    value: camera.friction.clamp(0.05, 0.95),
                    min: 0.05,
                    max: 0.95,
                    step: 0.05,
                },
            ],
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<&DebugOption> {
        self.options.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    /// Moves the selected option `direction` steps, clamped into its range.
    pub fn nudge_selected(&mut self, direction: f32) -> Option<Nudged> {
        let option = self.options.get_mut(self.selected)?;
        let previous = option.value;
        option.value = (option.value + option.step * direction).clamp(option.min, option.max);
        Some(Nudged {
            tweak: option.tweak,
            value: option.value,
            at_limit: option.value == previous,
        })
    }
}

/// Stats, tweakables and log for one mounted page.
///
/// Owned by the host page and dropped on unmount; nothing here is global.
#[derive(Debug)]
pub struct DebugOverlay {
    pub stats: FrameStats,
    pub options: DebugOptions,
    show_stats: bool,
    log: VecDeque<LogEntry>,
    log_capacity: usize,
}

impl DebugOverlay {
    pub fn new(debug: &DebugSettings, camera: &CameraSettings) -> Self {
        Self {
            stats: FrameStats::default(),
            options: DebugOptions::for_camera(camera),
            show_stats: debug.show_stats,
            log: VecDeque::with_capacity(debug.log_capacity.min(1024)),
            log_capacity: debug.log_capacity.max(1),
        }
    }

    fn push(&mut self, level: LogLevel, message: String) {
        self.log.push_back(LogEntry { level, message });
        while self.log.len() > self.log_capacity {
            self.log.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let msg = message.into();
        tracing::info!("{msg}");
        self.push(LogLevel::Info, msg);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let msg = message.into();
        tracing::warn!("{msg}");
        self.push(LogLevel::Warn, msg);
    }

    /// One-line readout used as the window title. Ends with the newest log
    /// entry, if any.
    pub fn summary(&self, controller: &OrbitController, eye: Vec3) -> String {
        let eased: Spherical = controller.orbit().spherical_eased();
        let target = controller.orbit().target_eased();
        let mut line = format!(
            "orbit-sandbox | azimuth {:.2} polar {:.2} | eye ({:.1}, {:.1}, {:.1}) | target ({:.2}, {:.2}, {:.2})",
            eased.theta, eased.phi, eye.x, eye.y, eye.z, target.x, target.y, target.z
        );
        if self.show_stats {
            line.push_str(&format!(" | {:.0} fps", self.stats.fps()));
        }
        if let Some(option) = self.options.selected() {
            line.push_str(&format!(" | {} = {:.2}", option.tweak.label(), option.value));
        }
        if let Some(entry) = self.log.back() {
            line.push_str(&format!(" | {entry}"));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_rig::Camera;

    fn overlay(log_capacity: usize) -> DebugOverlay {
        DebugOverlay::new(
            &DebugSettings {
                show_stats: true,
                log_capacity,
            },
            &CameraSettings::default(),
        )
    }

    #[test]
    fn fps_estimate_closes_half_second_windows() {
        let mut stats = FrameStats::default();
        let start = Instant::now();
        assert_eq!(stats.tick(start), None);
        for i in 1..30 {
            assert_eq!(stats.tick(start + Duration::from_millis(i * 16)), None);
        }
        let fps = stats.tick(start + Duration::from_millis(500)).expect("window closed");
        assert!((fps - 62.0).abs() < 0.5, "{fps}");
    }

    #[test]
    fn options_start_from_camera_settings() {
        let camera = CameraSettings {
            pan_speed: 2.0,
            friction: 0.6,
            ..CameraSettings::default()
        };
        let mut options = DebugOptions::for_camera(&camera);
        assert_eq!(options.selected().map(|o| (o.tweak, o.value)), Some((Tweak::PanSpeed, 2.0)));
        options.select_next();
        assert_eq!(options.selected().map(|o| (o.tweak, o.value)), Some((Tweak::Friction, 0.6)));
        options.select_next();
        assert_eq!(options.selected().map(|o| o.tweak), Some(Tweak::PanSpeed));
    }

    #[test]
    fn nudging_steps_and_clamps() {
        let mut options = DebugOptions::for_camera(&CameraSettings::default());
        let nudged = options.nudge_selected(1.0).expect("selected");
        assert_eq!(nudged.tweak, Tweak::PanSpeed);
        assert_eq!(nudged.value, 1.25);
        assert!(!nudged.at_limit);

        for _ in 0..40 {
            options.nudge_selected(-1.0);
        }
        let pinned = options.nudge_selected(-1.0).expect("selected");
        assert_eq!(pinned.value, 0.25);
        assert!(pinned.at_limit);
    }

    #[test]
    fn log_is_bounded() {
        let mut overlay = overlay(3);
        for i in 0..5 {
            overlay.info(format!("message {i}"));
        }
        overlay.warn("last");
        let messages: Vec<_> = overlay.log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["message 3", "message 4", "last"]);
    }

    #[test]
    fn summary_reports_orbit_and_latest_log_entry() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 15.0), Vec3::Y, 30.0, 1.0).shared();
        let controller =
            OrbitController::new(camera, Vec3::ZERO, &CameraSettings::default()).expect("ctl");
        let mut overlay = overlay(8);
        let line = overlay.summary(&controller, Vec3::new(0.0, 0.0, 15.0));
        assert!(line.contains("azimuth 0.00"), "{line}");
        assert!(line.contains("polar 1.57"), "{line}");
        assert!(line.contains("eye (0.0, 0.0, 15.0)"), "{line}");
        assert!(line.contains("fps"), "{line}");
        assert!(line.contains("Pan speed = 1.00"), "{line}");
        assert!(!line.contains("[INFO]"), "{line}");

        overlay.info("first");
        overlay.warn("Friction is pinned at 0.95");
        let line = overlay.summary(&controller, Vec3::ZERO);
        assert!(line.ends_with("| [WARN] Friction is pinned at 0.95"), "{line}");
    }
}
