//! Rigid-body handle
//!
//! The physics engine owns body state; control code only borrows it through
//! the [`RigidBody`] trait. [`Body`] is a kinematic stand-in used by the
//! sandbox and tests: it integrates velocities and applies impulses, but has
//! no gravity, contacts or constraint solving.

use glam::{Quat, Vec3};

/// Accessor and impulse API for one rigid body.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn orientation(&self) -> Quat;
    /// Implementations must keep the stored orientation unit-length.
    fn set_orientation(&mut self, orientation: Quat);
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Apply an impulse at a world-space point.
    fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3);

    /// Apply a body-local impulse at a body-local point.
    fn apply_local_impulse(&mut self, impulse: Vec3, local_point: Vec3) {
        let orientation = self.orientation();
        let world_point = self.position() + orientation * local_point;
        self.apply_impulse(orientation * impulse, world_point);
    }

    /// Teleport to `position` with identity orientation and no motion.
    fn reset_to(&mut self, position: Vec3) {
        self.set_position(position);
        self.set_orientation(Quat::IDENTITY);
        self.set_linear_velocity(Vec3::ZERO);
        self.set_angular_velocity(Vec3::ZERO);
    }
}

/// Position, orientation and velocities of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

/// Kinematic stand-in body with scalar mass and inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub state: RigidBodyState,
    /// Mass in kilograms (clamped above zero)
    mass: f32,
    /// Scalar moment of inertia (clamped above zero)
    inertia: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            state: RigidBodyState::default(),
            mass: 1.0,
            inertia: 1.0,
        }
    }
}

impl Body {
    /// Create a body at rest with the given mass; inertia defaults to mass.
    pub fn new(position: Vec3, mass: f32) -> Self {
        let mass = mass.max(0.001);
        Self {
            state: RigidBodyState {
                position,
                ..Default::default()
            },
            mass,
            inertia: mass,
        }
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.state.orientation = orientation.normalize();
        self
    }

    pub fn with_inertia(mut self, inertia: f32) -> Self {
        self.inertia = inertia.max(0.001);
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Semi-implicit Euler step of position and orientation.
    pub fn integrate(&mut self, dt: f32) {
        self.state.position += self.state.linear_velocity * dt;

        let rotation = Quat::from_scaled_axis(self.state.angular_velocity * dt);
        self.state.orientation = (rotation * self.state.orientation).normalize();
    }
}

impl RigidBody for Body {
    fn position(&self) -> Vec3 {
        self.state.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    fn orientation(&self) -> Quat {
        self.state.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        let normalized = orientation.normalize();
        // A zero quaternion cannot be normalized; keep the previous pose.
        if normalized.is_finite() {
            self.state.orientation = normalized;
        }
    }

    fn linear_velocity(&self) -> Vec3 {
        self.state.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.state.linear_velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.state.angular_velocity
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.state.angular_velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        self.state.linear_velocity += impulse / self.mass;
        let lever = world_point - self.state.position;
        self.state.angular_velocity += lever.cross(impulse) / self.inertia;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_at_center_is_pure_linear() {
        let mut body = Body::new(Vec3::ZERO, 2.0);
        body.apply_impulse(Vec3::new(0.0, -4.0, 0.0), Vec3::ZERO);
        assert_eq!(body.linear_velocity(), Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_offset_impulse_adds_spin() {
        let mut body = Body::new(Vec3::ZERO, 1.0);
        body.apply_local_impulse(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        // (0,0,1) x (0,-5,0) = (5,0,0)
        assert!((body.angular_velocity() - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_orientation_stays_normalized() {
        let mut body = Body::default();
        body.set_orientation(Quat::from_xyzw(0.0, 2.0, 0.0, 2.0));
        assert!((body.orientation().length() - 1.0).abs() < 1e-5);

        body.set_angular_velocity(Vec3::new(0.3, 1.2, -0.7));
        for _ in 0..100 {
            body.integrate(1.0 / 60.0);
        }
        assert!((body.orientation().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        let mut body = Body::default();
        body.set_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(body.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn test_reset_to() {
        let mut body = Body::new(Vec3::new(5.0, 5.0, 5.0), 1.0)
            .with_orientation(Quat::from_rotation_y(1.0));
        body.set_linear_velocity(Vec3::ONE);
        body.set_angular_velocity(Vec3::ONE);

        body.reset_to(Vec3::new(-1.5, 0.5, 3.0));
        assert_eq!(body.position(), Vec3::new(-1.5, 0.5, 3.0));
        assert_eq!(body.orientation(), Quat::IDENTITY);
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
    }
}
