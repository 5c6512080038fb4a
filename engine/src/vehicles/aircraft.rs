//! Aircraft dynamics
//!
//! Turns aircraft intents into velocity changes on a rigid body once per tick.
//! Control authority grows with forward speed, so a slow aircraft barely
//! responds to the stick. Thrust, drag and lift all scale with engine power.

use glam::Vec3;

use crate::input::{Intent, IntentSet};
use crate::physics::{Basis, RigidBody};

use super::params::{AerialTuning, clamp_unit};

/// Per-tick readout of the aerodynamic terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AerialTelemetry {
    /// Velocity component along the body's forward axis, before thrust
    pub forward_speed: f32,
    /// Control authority in [0, 1]
    pub flight_mode_influence: f32,
    /// Velocity added along forward by thrust this tick
    pub thrust: f32,
    /// Fraction of velocity removed by drag
    pub drag: f32,
    /// Velocity added along up by lift
    pub lift: f32,
    /// Whether the reset intent teleported the body
    pub reset: bool,
}

/// Aircraft control-to-motion model.
#[derive(Debug, Clone, Default)]
pub struct AerialDynamicsModel {
    pub tuning: AerialTuning,
}

impl AerialDynamicsModel {
    pub fn new(tuning: AerialTuning) -> Self {
        Self { tuning }
    }

    /// Advance the body one tick.
    ///
    /// Returns `None` without touching anything when the body is missing.
    pub fn update<B: RigidBody + ?Sized>(
        &self,
        body: Option<&mut B>,
        intents: IntentSet,
        engine_power: f32,
    ) -> Option<AerialTelemetry> {
        let Some(body) = body else {
            log::trace!("aircraft body missing, skipping tick");
            return None;
        };
        let t = &self.tuning;
        let power = clamp_unit(engine_power);

        let basis = Basis::from_orientation(body.orientation());
        let mut velocity = body.linear_velocity();
        let forward_speed = velocity.dot(basis.forward);
        let influence = if t.full_authority_speed > 0.0 {
            (forward_speed / t.full_authority_speed).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut spin = body.angular_velocity() * t.angular_damping;

        let authority = influence * power;
        if intents.contains(Intent::PitchUp) {
            spin -= basis.right * t.pitch_torque * authority;
        }
        if intents.contains(Intent::PitchDown) {
            spin += basis.right * t.pitch_torque * authority;
        }
        if intents.contains(Intent::YawLeft) {
            spin += basis.up * t.yaw_torque * authority;
        }
        if intents.contains(Intent::YawRight) {
            spin -= basis.up * t.yaw_torque * authority;
        }
        if intents.contains(Intent::RollLeft) {
            spin -= basis.forward * t.roll_torque * authority;
        }
        if intents.contains(Intent::RollRight) {
            spin += basis.forward * t.roll_torque * authority;
        }

        if t.hard_stop_when_idle && !intents.any_rotation() {
            spin = Vec3::ZERO;
            velocity = Vec3::ZERO;
        }

        let throttle = intents.contains(Intent::Throttle);
        let brake = intents.contains(Intent::Brake);
        let speed_modifier = match (throttle, brake) {
            (true, false) => t.throttle_modifier,
            (false, true) => t.brake_modifier,
            _ => t.idle_modifier,
        };
        let thrust = (speed_modifier + t.thrust_bias) * power;
        velocity += basis.forward * thrust;

        // Capped at 1 so drag can slow the body but never reverse it
        let drag = (velocity.length() * t.drag_coefficient * power).min(1.0);
        velocity *= 1.0 - drag;

        let lift = (velocity.length() * t.lift_coefficient * power).clamp(0.0, t.max_lift);
        velocity += basis.up * lift;

        spin *= t.angular_damping;

        body.set_linear_velocity(velocity);
        body.set_angular_velocity(spin);

        let reset = intents.contains(Intent::Reset);
        if reset {
            body.reset_to(t.spawn_point);
            log::info!("aircraft reset to {:?}", t.spawn_point);
        }

        Some(AerialTelemetry {
            forward_speed,
            flight_mode_influence: influence,
            thrust,
            drag,
            lift,
            reset,
        })
    }
}
