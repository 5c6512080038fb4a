//! Raycast vehicle handle
//!
//! Per-wheel engine force and steering API consumed by the ground vehicle
//! model. [`WheelRig`] is the stand-in: it records the commanded values and
//! turns them into a crude drive/yaw on the chassis (no suspension, no tyre
//! model) so the sandbox moves.

use glam::{Quat, Vec3};

use super::body::RigidBody;
use super::types::LOCAL_FORWARD;

/// Number of wheels on the stand-in rig.
pub const WHEEL_COUNT: usize = 4;

/// Per-wheel control API of a raycast vehicle.
pub trait RaycastVehicle {
    /// Set drive force on one wheel. Out-of-range indices are ignored.
    fn apply_engine_force(&mut self, force: f32, wheel: usize);
    /// Set steering angle (radians) on one wheel. Out-of-range indices are ignored.
    fn set_steering_value(&mut self, angle: f32, wheel: usize);
}

/// Commanded state of one wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelState {
    pub engine_force: f32,
    pub steering: f32,
}

/// Four-wheel stand-in rig. Wheels 0,1 are the front axle, 2,3 the rear.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelRig {
    wheels: [WheelState; WHEEL_COUNT],
    /// Axle separation used for the bicycle-model yaw rate (meters)
    pub wheelbase: f32,
}

impl Default for WheelRig {
    fn default() -> Self {
        Self {
            wheels: [WheelState::default(); WHEEL_COUNT],
            wheelbase: 0.3,
        }
    }
}

impl WheelRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wheel(&self, index: usize) -> Option<&WheelState> {
        self.wheels.get(index)
    }

    pub fn wheels(&self) -> &[WheelState; WHEEL_COUNT] {
        &self.wheels
    }

    pub fn total_engine_force(&self) -> f32 {
        self.wheels.iter().map(|w| w.engine_force).sum()
    }

    /// Push the commanded forces onto the chassis for one step.
    ///
    /// Drive accelerates along the chassis forward axis; the rear-wheel
    /// steering angle yaws the chassis proportionally to forward speed.
    pub fn drive<B: RigidBody + ?Sized>(&self, chassis: &mut B, mass: f32, dt: f32) {
        let orientation = chassis.orientation();
        let forward = orientation * LOCAL_FORWARD;

        let acceleration = self.total_engine_force() / mass.max(0.001);
        let mut velocity = chassis.linear_velocity() + forward * acceleration * dt;
        let speed = velocity.dot(forward);

        let steer = (self.wheels[2].steering + self.wheels[3].steering) * 0.5;
        if steer != 0.0 && self.wheelbase > 0.0 {
            let yaw_rate = -speed * steer.tan() / self.wheelbase;
            let turn = Quat::from_rotation_y(yaw_rate * dt);
            chassis.set_orientation(turn * orientation);
            velocity = turn * velocity;
        }

        chassis.set_linear_velocity(velocity);
        let spin = chassis.angular_velocity();
        chassis.set_angular_velocity(Vec3::new(spin.x, 0.0, spin.z));
    }
}

impl RaycastVehicle for WheelRig {
    fn apply_engine_force(&mut self, force: f32, wheel: usize) {
        if let Some(w) = self.wheels.get_mut(wheel) {
            w.engine_force = force;
        }
    }

    fn set_steering_value(&mut self, angle: f32, wheel: usize) {
        if let Some(w) = self.wheels.get_mut(wheel) {
            w.steering = angle;
        }
    }
}
