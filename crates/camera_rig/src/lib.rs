//! Pointer-driven orbit/pan camera rig.
//!
//! Pointer events feed an [`InputTracker`], which classifies each drag as a
//! rotate or a pan and hands the pixel delta to [`OrbitState`]. Those writes
//! only move the orbit's end values. A display-synced [`FrameLoop`] then
//! eases the current values toward them and writes the result into the
//! shared [`Camera`].

pub mod camera;
pub mod controller;
pub mod frame;
pub mod input;
pub mod orbit;
pub mod spherical;

use thiserror::Error;

pub use camera::{Camera, SharedCamera, VisibleExtent};
pub use controller::{Lifecycle, OrbitController};
pub use frame::{FrameHandle, FrameLoop, FrameScheduler, ManualScheduler};
pub use input::{
    EventResponse, Gesture, GestureDelta, InputTracker, ListenerSet, PointerButton, PointerEvent,
    PointerState,
};
pub use orbit::{Easing, OrbitState};
pub use spherical::Spherical;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("invalid camera settings: {0}")]
    Settings(#[from] settings::SettingsError),
    #[error("camera is too close to its orbit target (distance {0})")]
    DegenerateRadius(f32),
    #[error("controller was disabled; mount a new one instead")]
    Disabled,
}
