//! Vehicle Tuning
//!
//! Constants for each vehicle class, grouped so they can be loaded from a
//! config file. `Default` returns the stock handling values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where vehicles reappear on reset.
pub const SPAWN_POINT: Vec3 = Vec3::new(-1.5, 0.5, 3.0);

/// Engine parameters shared by the dynamics model and the stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Engine power in [0, 1]; scales every thrust, drag, lift and torque term
    engine_power: f32,
    /// Rotational acceleration per tick (radians/tick²)
    pub acceleration: f32,
    /// Rotational velocity clamp (radians/tick)
    pub max_velocity: f32,
    /// Per-tick multiplier applied to rotational velocity
    pub friction_factor: f32,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            engine_power: 0.5,
            acceleration: 0.0008,
            max_velocity: 0.04,
            friction_factor: 0.96,
        }
    }
}

impl EngineParameters {
    pub fn with_engine_power(mut self, power: f32) -> Self {
        self.set_engine_power(power);
        self
    }

    #[inline]
    pub fn engine_power(&self) -> f32 {
        self.engine_power
    }

    /// Set engine power, clamped to [0, 1]. NaN becomes 0.
    pub fn set_engine_power(&mut self, power: f32) {
        self.engine_power = clamp_unit(power);
    }
}

/// Clamp to [0, 1], mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Aerodynamic constants for the aircraft dynamics model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AerialTuning {
    /// Forward speed at which control surfaces reach full authority
    pub full_authority_speed: f32,
    /// Angular velocity multiplier, applied before and after control input
    pub angular_damping: f32,
    pub pitch_torque: f32,
    pub yaw_torque: f32,
    pub roll_torque: f32,
    pub throttle_modifier: f32,
    pub brake_modifier: f32,
    /// Thrust modifier with neither or both of throttle/brake held
    pub idle_modifier: f32,
    /// Constant added to every thrust modifier
    pub thrust_bias: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    pub max_lift: f32,
    /// Zero all velocity on ticks with no rotational input
    pub hard_stop_when_idle: bool,
    pub spawn_point: Vec3,
}

impl Default for AerialTuning {
    fn default() -> Self {
        Self {
            full_authority_speed: 10.0,
            angular_damping: 0.98,
            pitch_torque: 0.04,
            yaw_torque: 0.02,
            roll_torque: 0.055,
            throttle_modifier: 0.06,
            brake_modifier: -0.05,
            idle_modifier: 0.02,
            thrust_bias: 0.003,
            drag_coefficient: 0.003,
            lift_coefficient: 0.005,
            max_lift: 0.05,
            hard_stop_when_idle: true,
            spawn_point: SPAWN_POINT,
        }
    }
}

/// Drive, steering and righting-impulse constants for the ground vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    pub engine_force: f32,
    /// Steering angle on the driven wheels (radians)
    pub steer_angle: f32,
    /// Opposite-sign angle on the other axle (radians)
    pub counter_steer_angle: f32,
    pub driven_wheels: [usize; 2],
    pub counter_steer_wheels: [usize; 2],
    /// Body-local impulse applied by the arrow-key nudges
    pub nudge_impulse: Vec3,
    /// Distance of the nose/tail nudge points from the chassis center
    pub nudge_longitudinal_offset: f32,
    /// Distance of the side nudge points from the chassis center
    pub nudge_lateral_offset: f32,
    pub spawn_point: Vec3,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            engine_force: 150.0,
            steer_angle: 0.35,
            counter_steer_angle: 0.1,
            driven_wheels: [2, 3],
            counter_steer_wheels: [0, 1],
            nudge_impulse: Vec3::new(0.0, -5.0, 0.0),
            nudge_longitudinal_offset: 1.0,
            nudge_lateral_offset: 0.5,
            spawn_point: SPAWN_POINT,
        }
    }
}

/// Auto-level and free-flight constants for the stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerTuning {
    /// Fraction of the remaining pitch/roll error removed per tick
    pub slerp_factor: f32,
    pub pitch_limit_degrees: f32,
    pub roll_limit_degrees: f32,
    /// Starting value of the forward speed accumulator (units/tick)
    pub initial_speed: f32,
    /// Change of the speed accumulator per tick of throttle/brake
    pub speed_step: f32,
    pub min_yaw_acceleration: f32,
    pub max_yaw_acceleration: f32,
}

impl Default for StabilizerTuning {
    fn default() -> Self {
        Self {
            slerp_factor: 0.05,
            pitch_limit_degrees: 45.0,
            roll_limit_degrees: 45.0,
            initial_speed: 0.006,
            speed_step: 0.001,
            min_yaw_acceleration: 0.0001,
            max_yaw_acceleration: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_power_is_clamped() {
        let mut engine = EngineParameters::default();
        engine.set_engine_power(1.7);
        assert_eq!(engine.engine_power(), 1.0);
        engine.set_engine_power(-0.2);
        assert_eq!(engine.engine_power(), 0.0);
        engine.set_engine_power(f32::NAN);
        assert_eq!(engine.engine_power(), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: AerialTuning = serde_json::from_str(r#"{ "max_lift": 0.08 }"#).unwrap();
        assert_eq!(tuning.max_lift, 0.08);
        assert_eq!(tuning.pitch_torque, 0.04);
        assert!(tuning.hard_stop_when_idle);
    }

    #[test]
    fn test_ground_defaults() {
        let tuning = GroundTuning::default();
        assert_eq!(tuning.engine_force, 150.0);
        assert_eq!(tuning.driven_wheels, [2, 3]);
        assert_eq!(tuning.counter_steer_wheels, [0, 1]);
    }
}
