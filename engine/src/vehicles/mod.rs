//! Vehicles Module
//!
//! Control models for the two vehicle classes and the composites that bind
//! them to bodies in a [`PhysicsWorld`].
//!
//! # Submodules
//!
//! - [`params`] - Tuning constants, loadable from config
//! - [`aircraft`] - Thrust/drag/lift and speed-scaled control torques
//! - [`ground`] - Per-wheel drive, steering and righting impulses
//! - [`stabilizer`] - Free-flight rotation and pitch/roll auto-level

pub mod aircraft;
pub mod ground;
pub mod params;
pub mod stabilizer;

use glam::{Quat, Vec3};

pub use aircraft::{AerialDynamicsModel, AerialTelemetry};
pub use ground::GroundDynamicsModel;
pub use params::{AerialTuning, EngineParameters, GroundTuning, SPAWN_POINT, StabilizerTuning};
pub use stabilizer::{OrientationStabilizer, StabilizerPhase};

use crate::input::IntentSet;
use crate::physics::{Body, BodyHandle, PhysicsWorld, RigidBody, VehicleHandle, WheelRig};

/// Kind of vehicle, used by the camera to decide which views apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Aircraft,
    GroundVehicle,
    Rocket,
}

impl VehicleCategory {
    /// Rockets have no cockpit view.
    pub fn supports_first_person(self) -> bool {
        !matches!(self, VehicleCategory::Rocket)
    }
}

/// Read-only snapshot of a vehicle handed to the camera each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedVehicle {
    pub position: Vec3,
    pub orientation: Quat,
    pub first_person: bool,
    pub category: VehicleCategory,
}

impl TrackedVehicle {
    pub fn from_body<B: RigidBody + ?Sized>(body: &B, category: VehicleCategory, first_person: bool) -> Self {
        Self {
            position: body.position(),
            orientation: body.orientation(),
            first_person,
            category,
        }
    }
}

/// Aircraft body plus its dynamics model and stabilizer.
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub body: BodyHandle,
    pub dynamics: AerialDynamicsModel,
    pub stabilizer: OrientationStabilizer,
    pub engine: EngineParameters,
    /// Request the cockpit view while this aircraft is tracked
    pub first_person: bool,
    telemetry: Option<AerialTelemetry>,
}

impl Aircraft {
    /// Mass of the aircraft body (kg)
    pub const MASS: f32 = 1.0;

    /// Add an aircraft body at the spawn point.
    pub fn spawn(
        world: &mut PhysicsWorld,
        aerial: AerialTuning,
        stabilizer: StabilizerTuning,
        engine: EngineParameters,
    ) -> Self {
        let body = world.add_body(Body::new(aerial.spawn_point, Self::MASS));
        Self {
            body,
            dynamics: AerialDynamicsModel::new(aerial),
            stabilizer: OrientationStabilizer::new(stabilizer, engine),
            engine,
            first_person: false,
            telemetry: None,
        }
    }

    pub fn update_dynamics(&mut self, world: &mut PhysicsWorld, intents: IntentSet) -> Option<AerialTelemetry> {
        let telemetry = self
            .dynamics
            .update(world.body_mut(self.body), intents, self.engine.engine_power());
        if telemetry.is_some() {
            self.telemetry = telemetry;
        }
        telemetry
    }

    pub fn update_stabilizer(&mut self, world: &mut PhysicsWorld, intents: IntentSet) {
        self.stabilizer.update(world.body_mut(self.body), intents);
    }

    /// Most recent telemetry, if the body has ever been updated.
    pub fn telemetry(&self) -> Option<AerialTelemetry> {
        self.telemetry
    }

    pub fn tracked(&self, world: &PhysicsWorld) -> Option<TrackedVehicle> {
        world
            .body(self.body)
            .map(|body| TrackedVehicle::from_body(body, VehicleCategory::Aircraft, self.first_person))
    }
}

/// Ground vehicle chassis and wheel rig plus its dynamics model.
#[derive(Debug, Clone)]
pub struct GroundVehicle {
    pub chassis: BodyHandle,
    pub vehicle: VehicleHandle,
    pub dynamics: GroundDynamicsModel,
    pub first_person: bool,
}

impl GroundVehicle {
    /// Mass of the chassis (kg)
    pub const MASS: f32 = 150.0;

    /// Add a chassis with a four-wheel rig at the spawn point.
    pub fn spawn(world: &mut PhysicsWorld, tuning: GroundTuning) -> Option<Self> {
        let chassis = world.add_body(Body::new(tuning.spawn_point, Self::MASS));
        let vehicle = world.add_vehicle(chassis, WheelRig::new())?;
        Some(Self {
            chassis,
            vehicle,
            dynamics: GroundDynamicsModel::new(tuning),
            first_person: false,
        })
    }

    pub fn update(&self, world: &mut PhysicsWorld, intents: IntentSet) -> bool {
        match world.vehicle_and_chassis_mut(self.vehicle) {
            Some((rig, chassis)) => self.dynamics.update(Some(rig), Some(chassis), intents),
            None => self.dynamics.update::<WheelRig, Body>(None, None, intents),
        }
    }

    pub fn tracked(&self, world: &PhysicsWorld) -> Option<TrackedVehicle> {
        world
            .body(self.chassis)
            .map(|body| TrackedVehicle::from_body(body, VehicleCategory::GroundVehicle, self.first_person))
    }
}
