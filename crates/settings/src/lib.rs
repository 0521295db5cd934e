use axes::UpAxisPreset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "orbit-sandbox";
const APPLICATION: &str = "orbit-sandbox";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("setting `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub camera: CameraSettings,
    pub debug: DebugSettings,
    /// Optional FPS cap. 0.0 = uncapped (driven by vsync).
    pub fps_cap: f32,
}

impl UserSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.camera.validate()?;
        if !self.fps_cap.is_finite() || self.fps_cap < 0.0 {
            return Err(SettingsError::OutOfRange {
                field: "fps_cap",
                value: self.fps_cap,
            });
        }
        Ok(())
    }
}

/// Pointer-driven orbit controls.
///
/// The three easing coefficients multiply together once per displayed frame,
/// so the defaults converge to within 1% of a new target in roughly 55 frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub rotate_button: MouseButtonSetting,
    pub pan_button: MouseButtonSetting,
    pub rotation_ease: f32,
    pub translation_ease: f32,
    pub friction: f32,
    pub pan_speed: f32,
    pub fov_degrees: f32,
    pub axis_preset: UpAxisPreset,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotate_button: MouseButtonSetting::Primary,
            pan_button: MouseButtonSetting::Secondary,
            rotation_ease: 0.1,
            translation_ease: 0.1,
            friction: 0.8,
            pan_speed: 1.0,
            fov_degrees: 30.0,
            axis_preset: UpAxisPreset::default(),
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_open_unit("rotation_ease", self.rotation_ease)?;
        check_open_unit("translation_ease", self.translation_ease)?;
        check_open_unit("friction", self.friction)?;
        if !self.pan_speed.is_finite() || self.pan_speed <= 0.0 {
            return Err(SettingsError::OutOfRange {
                field: "pan_speed",
                value: self.pan_speed,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(SettingsError::OutOfRange {
                field: "fov_degrees",
                value: self.fov_degrees,
            });
        }
        Ok(())
    }
}

fn check_open_unit(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}

/// Developer overlay shown by the host page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    pub show_stats: bool,
    pub log_capacity: usize,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_stats: true,
            log_capacity: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MouseButtonSetting {
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at(config_dir.join(SETTINGS_FILE)))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<UserSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(UserSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings: UserSettings = serde_json::from_reader(reader)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
