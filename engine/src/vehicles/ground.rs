//! Ground vehicle dynamics
//!
//! Maps ground-vehicle intents onto the raycast vehicle's per-wheel engine
//! force and steering, and applies small body-local impulses from the arrow
//! keys so a flipped or stuck car can be rocked back onto its wheels.

use glam::Vec3;

use crate::input::{Intent, IntentSet};
use crate::physics::{RaycastVehicle, RigidBody, WHEEL_COUNT};

use super::params::GroundTuning;

/// Wheeled vehicle control model.
#[derive(Debug, Clone, Default)]
pub struct GroundDynamicsModel {
    pub tuning: GroundTuning,
}

impl GroundDynamicsModel {
    pub fn new(tuning: GroundTuning) -> Self {
        Self { tuning }
    }

    /// Apply one tick of intents. Returns `false` when either handle is missing.
    pub fn update<V, B>(&self, vehicle: Option<&mut V>, chassis: Option<&mut B>, intents: IntentSet) -> bool
    where
        V: RaycastVehicle + ?Sized,
        B: RigidBody + ?Sized,
    {
        let (Some(vehicle), Some(chassis)) = (vehicle, chassis) else {
            log::trace!("ground vehicle or chassis missing, skipping tick");
            return false;
        };
        let t = &self.tuning;

        // Throttle wins when both pedals are held
        let force = if intents.contains(Intent::Throttle) {
            t.engine_force
        } else if intents.contains(Intent::Brake) {
            -t.engine_force
        } else {
            0.0
        };
        for &wheel in &t.driven_wheels {
            vehicle.apply_engine_force(force, wheel);
        }

        // Steer right wins when both are held
        let (steer, counter) = if intents.contains(Intent::SteerRight) {
            (t.steer_angle, -t.counter_steer_angle)
        } else if intents.contains(Intent::SteerLeft) {
            (-t.steer_angle, t.counter_steer_angle)
        } else {
            (0.0, 0.0)
        };
        if steer == 0.0 {
            for wheel in 0..WHEEL_COUNT {
                vehicle.set_steering_value(0.0, wheel);
            }
        } else {
            for &wheel in &t.driven_wheels {
                vehicle.set_steering_value(steer, wheel);
            }
            for &wheel in &t.counter_steer_wheels {
                vehicle.set_steering_value(counter, wheel);
            }
        }

        let long = t.nudge_longitudinal_offset;
        let lat = t.nudge_lateral_offset;
        let nudges = [
            (Intent::NudgeBack, Vec3::new(0.0, 0.0, long)),
            (Intent::NudgeForward, Vec3::new(0.0, 0.0, -long)),
            (Intent::NudgeLeft, Vec3::new(-lat, 0.0, 0.0)),
            (Intent::NudgeRight, Vec3::new(lat, 0.0, 0.0)),
        ];
        for (intent, point) in nudges {
            if intents.contains(intent) {
                chassis.apply_local_impulse(t.nudge_impulse, point);
            }
        }

        if intents.contains(Intent::Reset) {
            chassis.reset_to(t.spawn_point);
            log::info!("ground vehicle reset to {:?}", t.spawn_point);
        }

        true
    }
}
