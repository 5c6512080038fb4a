//! Physics module
//!
//! The rigid-body solver is an external collaborator. This module defines the
//! handle traits the control code talks to ([`RigidBody`], [`RaycastVehicle`])
//! and a small kinematic stand-in ([`PhysicsWorld`]) so the pipeline runs
//! headless. The stand-in integrates velocities and applies impulses; it does
//! no collision detection and applies no gravity.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`body`] - Rigid-body trait and stand-in body
//! - [`vehicle`] - Raycast vehicle trait and stand-in wheel rig
//! - [`world`] - Handle-based owner of bodies and rigs

pub mod body;
pub mod types;
pub mod vehicle;
pub mod world;

pub use body::{Body, RigidBody, RigidBodyState};
pub use types::{Basis, EulerRot, Mat4, Quat, Vec3, lerp};
pub use vehicle::{RaycastVehicle, WHEEL_COUNT, WheelRig, WheelState};
pub use world::{BodyHandle, PhysicsWorld, VehicleHandle};
