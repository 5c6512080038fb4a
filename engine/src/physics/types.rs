//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library, plus the few
//! scalar and frame helpers the control code shares.

pub use glam::{EulerRot, Mat4, Quat, Vec3};

/// Body-local forward axis (+Z).
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;
/// Body-local up axis (+Y).
pub const LOCAL_UP: Vec3 = Vec3::Y;
/// Body-local right axis (+X).
pub const LOCAL_RIGHT: Vec3 = Vec3::X;

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// World-space forward/up/right unit vectors of an oriented body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Basis {
    /// Rotate the local axes by `orientation`.
    pub fn from_orientation(orientation: Quat) -> Self {
        Self {
            forward: orientation * LOCAL_FORWARD,
            up: orientation * LOCAL_UP,
            right: orientation * LOCAL_RIGHT,
        }
    }
}

/// Decompose an orientation into (yaw, pitch, roll) radians using YXZ order.
#[inline]
pub fn yaw_pitch_roll(orientation: Quat) -> (f32, f32, f32) {
    orientation.to_euler(EulerRot::YXZ)
}

/// Rebuild an orientation from (yaw, pitch, roll) radians using YXZ order.
#[inline]
pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.1), 1.0);
        assert_eq!(lerp(4.0, 4.0, 0.7), 4.0);
    }

    #[test]
    fn test_identity_basis() {
        let basis = Basis::from_orientation(Quat::IDENTITY);
        assert_eq!(basis.forward, Vec3::Z);
        assert_eq!(basis.up, Vec3::Y);
        assert_eq!(basis.right, Vec3::X);
    }

    #[test]
    fn test_euler_round_trip_preserves_angles() {
        let q = from_yaw_pitch_roll(0.3, -0.4, 0.2);
        let (yaw, pitch, roll) = yaw_pitch_roll(q);
        assert!((yaw - 0.3).abs() < 1e-5);
        assert!((pitch + 0.4).abs() < 1e-5);
        assert!((roll - 0.2).abs() < 1e-5);
    }
}
