use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The canonical up axis all orbit math is expressed in.
pub const CANONICAL_UP: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSign {
    Positive,
    Negative,
}

impl AxisSign {
    pub const fn scalar(self) -> f32 {
        match self {
            AxisSign::Positive => 1.0,
            AxisSign::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    direction: AxisDirection,
    sign: AxisSign,
}

impl Axis {
    pub const fn positive(direction: AxisDirection) -> Self {
        Self {
            direction,
            sign: AxisSign::Positive,
        }
    }

    pub const fn negative(direction: AxisDirection) -> Self {
        Self {
            direction,
            sign: AxisSign::Negative,
        }
    }

    pub fn vector(self) -> Vec3 {
        let base = match self.direction {
            AxisDirection::X => Vec3::X,
            AxisDirection::Y => Vec3::Y,
            AxisDirection::Z => Vec3::Z,
        };
        base * self.sign.scalar()
    }
}

/// World axis layout: which world axis points up and which one the default
/// camera looks back along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSystem {
    right: Axis,
    up: Axis,
    back: Axis,
}

impl AxisSystem {
    pub const fn new(right: Axis, up: Axis, back: Axis) -> Self {
        Self { right, up, back }
    }

    pub fn right_vec(&self) -> Vec3 {
        self.right.vector()
    }

    pub fn up_vec(&self) -> Vec3 {
        self.up.vector()
    }

    /// Direction from the scene origin toward a camera in its home position.
    pub fn back_vec(&self) -> Vec3 {
        self.back.vector()
    }

    pub fn basis(&self) -> Mat3 {
        Mat3::from_cols(self.right_vec(), self.up_vec(), self.back_vec())
    }
}

impl Default for AxisSystem {
    fn default() -> Self {
        UpAxisPreset::default().axis_system()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UpAxisPreset {
    /// X right, Y up, camera home on +Z (WebGL / three.js layout)
    #[default]
    YUp,
    /// X right, Z up, camera home on -Y (architectural / Blender layout)
    ZUp,
}

impl UpAxisPreset {
    pub const ALL: [UpAxisPreset; 2] = [UpAxisPreset::YUp, UpAxisPreset::ZUp];

    pub const fn label(&self) -> &'static str {
        match self {
            UpAxisPreset::YUp => "Y up",
            UpAxisPreset::ZUp => "Z up",
        }
    }

    pub const fn axis_system(self) -> AxisSystem {
        match self {
            UpAxisPreset::YUp => AxisSystem::new(
                Axis::positive(AxisDirection::X),
                Axis::positive(AxisDirection::Y),
                Axis::positive(AxisDirection::Z),
            ),
            UpAxisPreset::ZUp => AxisSystem::new(
                Axis::positive(AxisDirection::X),
                Axis::positive(AxisDirection::Z),
                Axis::negative(AxisDirection::Y),
            ),
        }
    }
}

impl From<UpAxisPreset> for AxisSystem {
    fn from(value: UpAxisPreset) -> Self {
        value.axis_system()
    }
}

/// Rotation pair that maps a camera's native up vector onto [`CANONICAL_UP`]
/// and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpFrame {
    to_canonical: Quat,
    from_canonical: Quat,
}

impl UpFrame {
    /// Builds the frame for `up`. A zero vector falls back to the identity frame.
    pub fn new(up: Vec3) -> Self {
        let up = up.normalize_or_zero();
        if up == Vec3::ZERO {
            return Self::default();
        }
        let to_canonical = Quat::from_rotation_arc(up, CANONICAL_UP);
        Self {
            to_canonical,
            from_canonical: to_canonical.inverse(),
        }
    }

    pub fn to_canonical(&self, world: Vec3) -> Vec3 {
        self.to_canonical * world
    }

    pub fn from_canonical(&self, canonical: Vec3) -> Vec3 {
        self.from_canonical * canonical
    }
}

impl Default for UpFrame {
    fn default() -> Self {
        Self {
            to_canonical: Quat::IDENTITY,
            from_canonical: Quat::IDENTITY,
        }
    }
}
