//! Orientation stabilizer
//!
//! Drives the aircraft's free-flight mode: scalar yaw/pitch/roll velocities
//! with friction, a forward speed accumulator, and an auto-level that eases
//! pitch and roll back toward the orientation captured on the first tick
//! whenever the pitch/roll controls are released.

use glam::{Quat, Vec3};

use crate::input::{Intent, IntentSet};
use crate::physics::types::{LOCAL_FORWARD, from_yaw_pitch_roll, lerp, yaw_pitch_roll};
use crate::physics::RigidBody;

use super::params::{EngineParameters, StabilizerTuning};

/// Lifecycle of the stabilizer. `Tracking` is terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilizerPhase {
    Uninitialized,
    Tracking { initial_orientation: Quat },
}

#[derive(Debug, Clone)]
pub struct OrientationStabilizer {
    phase: StabilizerPhase,
    pub tuning: StabilizerTuning,
    pub engine: EngineParameters,
    yaw_velocity: f32,
    pitch_velocity: f32,
    roll_velocity: f32,
    /// Forward distance per tick
    speed: f32,
}

impl Default for OrientationStabilizer {
    fn default() -> Self {
        Self::new(StabilizerTuning::default(), EngineParameters::default())
    }
}

impl OrientationStabilizer {
    pub fn new(tuning: StabilizerTuning, engine: EngineParameters) -> Self {
        Self {
            phase: StabilizerPhase::Uninitialized,
            tuning,
            engine,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            roll_velocity: 0.0,
            speed: tuning.initial_speed,
        }
    }

    pub fn phase(&self) -> StabilizerPhase {
        self.phase
    }

    pub fn initial_orientation(&self) -> Option<Quat> {
        match self.phase {
            StabilizerPhase::Uninitialized => None,
            StabilizerPhase::Tracking { initial_orientation } => Some(initial_orientation),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current (yaw, pitch, roll) velocities in radians per tick.
    pub fn rotation_velocity(&self) -> Vec3 {
        Vec3::new(self.yaw_velocity, self.pitch_velocity, self.roll_velocity)
    }

    /// Advance one tick. A missing body leaves all state untouched.
    pub fn update<B: RigidBody + ?Sized>(&mut self, body: Option<&mut B>, intents: IntentSet) {
        let Some(body) = body else {
            log::trace!("stabilizer body missing, skipping tick");
            return;
        };

        let initial = match self.phase {
            StabilizerPhase::Tracking { initial_orientation } => initial_orientation,
            StabilizerPhase::Uninitialized => {
                let captured = body.orientation();
                self.phase = StabilizerPhase::Tracking {
                    initial_orientation: captured,
                };
                log::debug!("stabilizer captured reference orientation {:?}", captured);
                captured
            }
        };

        // The dynamics model already teleported the body this tick
        if intents.contains(Intent::Reset) {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            self.roll_velocity = 0.0;
            self.speed = self.tuning.initial_speed;
            return;
        }

        self.accelerate(intents);

        let mut orientation = body.orientation();
        if !intents.any_pitch_or_roll() {
            orientation = self.level(orientation, initial);
        }

        orientation = orientation
            * Quat::from_rotation_y(self.yaw_velocity)
            * Quat::from_rotation_x(self.pitch_velocity)
            * Quat::from_rotation_z(self.roll_velocity);
        body.set_orientation(orientation);

        let forward = body.orientation() * LOCAL_FORWARD;
        body.set_position(body.position() + forward * self.speed);
    }

    fn accelerate(&mut self, intents: IntentSet) {
        let e = &self.engine;
        let t = &self.tuning;

        self.yaw_velocity *= e.friction_factor;
        self.pitch_velocity *= e.friction_factor;
        self.roll_velocity *= e.friction_factor;

        let ratio = if e.max_velocity > 0.0 {
            self.speed.abs() / e.max_velocity
        } else {
            1.0
        };
        let yaw_acceleration = lerp(t.min_yaw_acceleration, e.acceleration, ratio)
            .clamp(t.min_yaw_acceleration, t.max_yaw_acceleration);

        self.yaw_velocity += intents.axis(Intent::YawLeft, Intent::YawRight) * yaw_acceleration;
        self.pitch_velocity += intents.axis(Intent::PitchUp, Intent::PitchDown) * e.acceleration;
        self.roll_velocity += intents.axis(Intent::RollLeft, Intent::RollRight) * e.acceleration;

        if intents.contains(Intent::Throttle) {
            self.speed += t.speed_step;
        }
        if intents.contains(Intent::Brake) {
            self.speed -= t.speed_step;
        }

        let max = e.max_velocity.abs();
        self.yaw_velocity = self.yaw_velocity.clamp(-max, max);
        self.pitch_velocity = self.pitch_velocity.clamp(-max, max);
        self.roll_velocity = self.roll_velocity.clamp(-max, max);
    }

    /// Ease pitch and roll toward the reference, keeping yaw.
    fn level(&self, orientation: Quat, initial: Quat) -> Quat {
        let (yaw, pitch, roll) = yaw_pitch_roll(orientation);
        let (_, initial_pitch, initial_roll) = yaw_pitch_roll(initial);

        let pitch = level_axis(
            pitch,
            initial_pitch,
            self.tuning.pitch_limit_degrees.to_radians(),
            self.tuning.slerp_factor,
        );
        let roll = level_axis(
            roll,
            initial_roll,
            self.tuning.roll_limit_degrees.to_radians(),
            self.tuning.slerp_factor,
        );
        from_yaw_pitch_roll(yaw, pitch, roll)
    }
}

/// Slack on the band edge; easing toward a limit never lands exactly on it.
const BAND_TOLERANCE: f32 = 1e-3;

/// Beyond the band, head for the nearest limit; inside it, head for the
/// reference (clamped into the band so the two targets never fight).
fn level_axis(current: f32, reference: f32, limit: f32, factor: f32) -> f32 {
    let limit = limit.abs();
    let target = if current > limit + BAND_TOLERANCE {
        limit
    } else if current < -limit - BAND_TOLERANCE {
        -limit
    } else {
        reference.clamp(-limit, limit)
    };
    lerp(current, target, factor)
}
