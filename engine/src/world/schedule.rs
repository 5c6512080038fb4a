//! Update schedule
//!
//! Systems register with an order key and run once per tick in ascending
//! order. Registration order breaks ties.

use std::collections::HashMap;

/// Per-tick systems of the sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemId {
    AircraftDynamics,
    Stabilizer,
    GroundDynamics,
    Physics,
    Camera,
}

impl SystemId {
    /// Stock order key.
    pub fn default_order(self) -> i32 {
        match self {
            SystemId::AircraftDynamics => 10,
            SystemId::Stabilizer => 20,
            SystemId::GroundDynamics => 30,
            SystemId::Physics => 40,
            SystemId::Camera => 50,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    systems: HashMap<SystemId, (i32, u32)>,
    next_seq: u32,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every system at its default order.
    pub fn standard() -> Self {
        let mut schedule = Self::new();
        for id in [
            SystemId::AircraftDynamics,
            SystemId::Stabilizer,
            SystemId::GroundDynamics,
            SystemId::Physics,
            SystemId::Camera,
        ] {
            schedule.register(id, id.default_order());
        }
        schedule
    }

    /// Register or re-order a system.
    pub fn register(&mut self, id: SystemId, order: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.systems.insert(id, (order, seq));
    }

    /// Returns `false` if the system was not registered.
    pub fn unregister(&mut self, id: SystemId) -> bool {
        self.systems.remove(&id).is_some()
    }

    pub fn contains(&self, id: SystemId) -> bool {
        self.systems.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Systems in execution order.
    pub fn ordered(&self) -> Vec<SystemId> {
        let mut entries: Vec<_> = self.systems.iter().map(|(&id, &key)| (key, id)).collect();
        entries.sort_by_key(|&(key, _)| key);
        entries.into_iter().map(|(_, id)| id).collect()
    }
}
