use glam::Vec3;
use std::f32::consts::PI;

/// Margin kept between the polar angle and the poles.
pub const POLE_EPSILON: f32 = 1e-6;

/// Spherical coordinates around the canonical +Y axis.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuth around +Y
/// measured from +Z toward +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }

    /// Clamps `phi` away from the poles so the look direction never lines
    /// up with the up axis.
    pub fn make_safe(&mut self) -> &mut Self {
        self.phi = clamp_polar(self.phi);
        self
    }
}

pub fn clamp_polar(phi: f32) -> f32 {
    if phi.is_nan() {
        return PI / 2.0;
    }
    phi.clamp(POLE_EPSILON, PI - POLE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_points() {
        let s = Spherical::from_vec3(Vec3::new(0.0, 0.0, 150.0));
        assert_eq!(s.radius, 150.0);
        assert!((s.phi - PI / 2.0).abs() < 1e-6);
        assert_eq!(s.theta, 0.0);

        let s = Spherical::from_vec3(Vec3::new(10.0, 0.0, 0.0));
        assert!((s.theta - PI / 2.0).abs() < 1e-6);

        let s = Spherical::from_vec3(Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(s.phi, 0.0);
    }

    #[test]
    fn converts_back_to_cartesian() {
        let v = Vec3::new(0.0, 50.0, 150.0);
        let back = Spherical::from_vec3(v).to_vec3();
        assert!((back - v).length() < 1e-3);
    }

    #[test]
    fn zero_vector_is_degenerate_but_finite() {
        let s = Spherical::from_vec3(Vec3::ZERO);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn make_safe_stays_off_the_poles() {
        for phi in [-100.0, -0.0, 0.0, PI, 7.0, 1e9] {
            let mut s = Spherical::new(1.0, phi, 0.0);
            s.make_safe();
            assert!(s.phi > 0.0 && s.phi < PI, "phi {phi} -> {}", s.phi);
        }
        let mut s = Spherical::new(1.0, f32::NAN, 0.0);
        assert!(s.make_safe().phi.is_finite());
    }

    #[test]
    fn make_safe_keeps_interior_angles() {
        let mut s = Spherical::new(3.0, 1.2, -0.4);
        s.make_safe();
        assert_eq!(s, Spherical::new(3.0, 1.2, -0.4));
    }
}
