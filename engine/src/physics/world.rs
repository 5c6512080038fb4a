//! Physics world stand-in
//!
//! Owns every body and wheel rig; control code looks them up by handle each
//! tick. A stale or unknown handle yields `None`, which callers treat as a
//! skipped tick rather than an error.

use std::collections::HashMap;

use super::body::Body;
use super::vehicle::WheelRig;

/// Handle to a body owned by [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(u32);

/// Handle to a wheel rig owned by [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleHandle(u32);

#[derive(Debug, Clone)]
struct RigEntry {
    rig: WheelRig,
    chassis: BodyHandle,
}

/// Collection of stand-in bodies and rigs.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    bodies: HashMap<BodyHandle, Body>,
    rigs: HashMap<VehicleHandle, RigEntry>,
    next_id: u32,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.allocate());
        self.bodies.insert(handle, body);
        handle
    }

    /// Remove a body and any rig driving it.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.rigs.retain(|_, entry| entry.chassis != handle);
        self.bodies.remove(&handle)
    }

    /// Attach a wheel rig to an existing chassis body.
    pub fn add_vehicle(&mut self, chassis: BodyHandle, rig: WheelRig) -> Option<VehicleHandle> {
        if !self.bodies.contains_key(&chassis) {
            return None;
        }
        let handle = VehicleHandle(self.allocate());
        self.rigs.insert(handle, RigEntry { rig, chassis });
        Some(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(&handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(&handle)
    }

    pub fn vehicle(&self, handle: VehicleHandle) -> Option<&WheelRig> {
        self.rigs.get(&handle).map(|entry| &entry.rig)
    }

    /// Borrow a rig and its chassis together.
    pub fn vehicle_and_chassis_mut(
        &mut self,
        handle: VehicleHandle,
    ) -> Option<(&mut WheelRig, &mut Body)> {
        let entry = self.rigs.get_mut(&handle)?;
        let chassis = self.bodies.get_mut(&entry.chassis)?;
        Some((&mut entry.rig, chassis))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance every body by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }

        for entry in self.rigs.values() {
            if let Some(chassis) = self.bodies.get_mut(&entry.chassis) {
                let mass = chassis.mass();
                entry.rig.drive(chassis, mass, dt);
            }
        }

        for body in self.bodies.values_mut() {
            body.integrate(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::RigidBody;
    use glam::Vec3;

    #[test]
    fn test_missing_handle_is_none() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_body(Body::default());
        world.remove_body(handle);
        assert!(world.body(handle).is_none());
        assert!(world.body_mut(handle).is_none());
    }

    #[test]
    fn test_vehicle_needs_chassis() {
        let mut world = PhysicsWorld::new();
        let chassis = world.add_body(Body::default());
        world.remove_body(chassis);
        assert!(world.add_vehicle(chassis, WheelRig::new()).is_none());
    }

    #[test]
    fn test_removing_chassis_drops_rig() {
        let mut world = PhysicsWorld::new();
        let chassis = world.add_body(Body::default());
        let vehicle = world.add_vehicle(chassis, WheelRig::new()).unwrap();
        world.remove_body(chassis);
        assert!(world.vehicle(vehicle).is_none());
        assert!(world.vehicle_and_chassis_mut(vehicle).is_none());
    }

    #[test]
    fn test_step_integrates_position() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_body(Body::default());
        world
            .body_mut(handle)
            .unwrap()
            .set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));

        world.step(0.5);
        assert_eq!(world.body(handle).unwrap().position(), Vec3::new(0.5, 0.0, 0.0));

        // Non-positive or NaN steps are ignored
        world.step(f32::NAN);
        world.step(-1.0);
        assert_eq!(world.body(handle).unwrap().position(), Vec3::new(0.5, 0.0, 0.0));
    }
}
