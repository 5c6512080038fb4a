//! Sandbox World
//!
//! Owns the input state, the physics stand-in, both vehicles, the camera and
//! the time scale, and runs the scheduled systems once per frame.
//!
//! Exactly one input receiver is active: the focused vehicle or, in free-fly
//! mode, the camera. Shift+C hands input to the camera and back again.

use crate::camera::{CameraOperator, CameraTransform};
use crate::input::{ControlScheme, Intent, IntentSet, InputState, KeyCode, ModifierState};
use crate::physics::PhysicsWorld;
use crate::vehicles::{AerialTelemetry, Aircraft, GroundVehicle, TrackedVehicle};

use super::config::{ConfigError, SandboxConfig};
use super::schedule::{Schedule, SystemId};
use super::time::TimeScale;

/// Vehicle the camera follows and the keyboard drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleFocus {
    #[default]
    Aircraft,
    GroundVehicle,
}

/// Who consumes keyboard intents this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputReceiver {
    Vehicle(VehicleFocus),
    Camera,
}

impl InputReceiver {
    pub fn scheme(self) -> ControlScheme {
        match self {
            InputReceiver::Vehicle(VehicleFocus::Aircraft) => ControlScheme::Aircraft,
            InputReceiver::Vehicle(VehicleFocus::GroundVehicle) => ControlScheme::GroundVehicle,
            InputReceiver::Camera => ControlScheme::FreeCamera,
        }
    }
}

/// Complete simulation state for one window.
#[derive(Debug, Clone)]
pub struct Sandbox {
    pub input: InputState,
    pub physics: PhysicsWorld,
    pub aircraft: Aircraft,
    pub ground: Option<GroundVehicle>,
    pub camera: CameraOperator,
    pub time: TimeScale,
    pub schedule: Schedule,
    config: SandboxConfig,
    focus: VehicleFocus,
    receiver: InputReceiver,
    previous_receiver: Option<InputReceiver>,
    last_transform: CameraTransform,
    ticks: u64,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        let mut physics = PhysicsWorld::new();
        let aircraft = Aircraft::spawn(&mut physics, config.aerial, config.stabilizer, config.engine);
        let ground = GroundVehicle::spawn(&mut physics, config.ground);
        if ground.is_none() {
            log::warn!("ground vehicle rig could not be attached");
        }
        let camera = CameraOperator::new(config.camera);
        let last_transform = camera.transform();

        Self {
            input: InputState::new(),
            physics,
            aircraft,
            ground,
            camera,
            time: TimeScale::new(),
            schedule: Schedule::standard(),
            config,
            focus: VehicleFocus::default(),
            receiver: InputReceiver::Vehicle(VehicleFocus::default()),
            previous_receiver: None,
            last_transform,
            ticks: 0,
        }
    }

    /// Validate `config` before building the sandbox.
    pub fn from_config(config: SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn receiver(&self) -> InputReceiver {
        self.receiver
    }

    pub fn focus(&self) -> VehicleFocus {
        self.focus
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Camera pose from the last tick.
    pub fn camera_transform(&self) -> CameraTransform {
        self.last_transform
    }

    pub fn telemetry(&self) -> Option<AerialTelemetry> {
        self.aircraft.telemetry()
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.input.set_key(key, pressed);
    }

    pub fn set_modifiers(&mut self, modifiers: ModifierState) {
        self.input.set_modifiers(modifiers);
    }

    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.input.add_mouse_delta(dx, dy);
    }

    pub fn handle_mouse_wheel(&mut self, delta: f32) {
        self.input.add_scroll(delta);
    }

    /// Drive and follow another vehicle. Leaves free-fly if active.
    pub fn set_focus(&mut self, focus: VehicleFocus) {
        if self.receiver == InputReceiver::Camera {
            self.camera.input_receiver_release();
        }
        self.focus = focus;
        self.previous_receiver = None;
        self.set_receiver(InputReceiver::Vehicle(focus));
    }

    /// Whether the focused vehicle requests the cockpit view.
    pub fn is_first_person(&self) -> bool {
        match self.focus {
            VehicleFocus::Aircraft => self.aircraft.first_person,
            VehicleFocus::GroundVehicle => self.ground.as_ref().is_some_and(|g| g.first_person),
        }
    }

    /// Request the cockpit view for the focused vehicle.
    pub fn set_first_person(&mut self, enabled: bool) {
        match self.focus {
            VehicleFocus::Aircraft => self.aircraft.first_person = enabled,
            VehicleFocus::GroundVehicle => {
                if let Some(ground) = self.ground.as_mut() {
                    ground.first_person = enabled;
                }
            }
        }
    }

    fn set_receiver(&mut self, receiver: InputReceiver) {
        if self.receiver != receiver {
            log::info!("input receiver {:?} -> {:?}", self.receiver, receiver);
            self.receiver = receiver;
        }
    }

    fn enter_free_camera(&mut self) {
        self.previous_receiver = Some(self.receiver);
        self.camera.input_receiver_init();
        self.set_receiver(InputReceiver::Camera);
    }

    fn leave_free_camera(&mut self) {
        let receiver = self
            .previous_receiver
            .take()
            .unwrap_or(InputReceiver::Vehicle(self.focus));
        self.camera.input_receiver_release();
        self.set_receiver(receiver);
    }

    fn tracked(&self) -> Option<TrackedVehicle> {
        match self.focus {
            VehicleFocus::Aircraft => self.aircraft.tracked(&self.physics),
            VehicleFocus::GroundVehicle => self.ground.as_ref().and_then(|g| g.tracked(&self.physics)),
        }
    }

    /// Run one frame of `dt` wall-clock seconds and return the camera pose.
    pub fn tick(&mut self, dt: f32) -> CameraTransform {
        let frame = self.input.poll(self.receiver.scheme());

        match self.receiver {
            InputReceiver::Camera => {
                if self.camera.handle_keyboard_event(frame.pressed) {
                    self.leave_free_camera();
                }
            }
            InputReceiver::Vehicle(_) => {
                if frame.pressed.contains(Intent::FreeCameraToggle) {
                    self.enter_free_camera();
                }
            }
        }

        let (dx, dy) = frame.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            self.camera.handle_mouse_move(dx, dy);
        }
        if frame.scroll != 0.0 {
            self.camera.handle_mouse_wheel(&mut self.time, frame.scroll);
        }
        let step = self.time.advance(dt);

        let intents_for = |focus: VehicleFocus, receiver: InputReceiver| -> IntentSet {
            if receiver == InputReceiver::Vehicle(focus) {
                frame.held
            } else {
                IntentSet::EMPTY
            }
        };
        let aircraft_intents = intents_for(VehicleFocus::Aircraft, self.receiver);
        let ground_intents = intents_for(VehicleFocus::GroundVehicle, self.receiver);
        // Vehicles hold still while time is paused
        let running = step > 0.0;

        for system in self.schedule.ordered() {
            match system {
                SystemId::AircraftDynamics if running => {
                    self.aircraft.update_dynamics(&mut self.physics, aircraft_intents);
                }
                SystemId::Stabilizer if running => {
                    self.aircraft.update_stabilizer(&mut self.physics, aircraft_intents);
                }
                SystemId::GroundDynamics if running => {
                    if let Some(ground) = self.ground.as_ref() {
                        ground.update(&mut self.physics, ground_intents);
                    }
                }
                SystemId::Physics => self.physics.step(step),
                SystemId::Camera => {
                    if self.receiver == InputReceiver::Camera {
                        self.camera
                            .input_receiver_update(step, frame.held, self.config.camera.free_camera_speed);
                    }
                    let tracked = self.tracked();
                    self.last_transform = self.camera.update(self.time.value(), tracked.as_ref());
                }
                _ => {}
            }
        }

        self.ticks += 1;
        self.last_transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMode;
    use crate::physics::RigidBody;

    fn press(sandbox: &mut Sandbox, key: KeyCode, shift: bool) {
        sandbox.set_modifiers(ModifierState {
            shift,
            ..Default::default()
        });
        sandbox.handle_key(key, true);
    }

    fn release(sandbox: &mut Sandbox, key: KeyCode) {
        sandbox.handle_key(key, false);
        sandbox.set_modifiers(ModifierState::default());
    }

    #[test]
    fn test_starts_on_aircraft() {
        let sandbox = Sandbox::default();
        assert_eq!(sandbox.receiver(), InputReceiver::Vehicle(VehicleFocus::Aircraft));
        assert_eq!(sandbox.physics.body_count(), 2);
    }

    #[test]
    fn test_shift_c_round_trip() {
        let mut sandbox = Sandbox::default();
        sandbox.tick(1.0 / 60.0);

        press(&mut sandbox, KeyCode::C, true);
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.receiver(), InputReceiver::Camera);
        assert_eq!(sandbox.camera.mode(), CameraMode::FreeFly);

        // Holding the chord does not toggle again
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.receiver(), InputReceiver::Camera);

        release(&mut sandbox, KeyCode::C);
        sandbox.tick(1.0 / 60.0);
        press(&mut sandbox, KeyCode::C, true);
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.receiver(), InputReceiver::Vehicle(VehicleFocus::Aircraft));
        assert_eq!(sandbox.camera.mode(), CameraMode::Orbit);
    }

    #[test]
    fn test_free_camera_does_not_drive_aircraft() {
        let mut sandbox = Sandbox::default();
        sandbox.aircraft.dynamics.tuning.hard_stop_when_idle = false;
        press(&mut sandbox, KeyCode::C, true);
        sandbox.tick(1.0 / 60.0);
        release(&mut sandbox, KeyCode::C);

        // W is fly-forward for the camera, not throttle
        sandbox.handle_key(KeyCode::W, true);
        sandbox.tick(1.0 / 60.0);
        let telemetry = sandbox.telemetry().unwrap();
        assert!((telemetry.thrust - 0.023 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_paused_vehicles_hold_still() {
        let mut sandbox = Sandbox::default();
        for _ in 0..60 {
            sandbox.handle_mouse_wheel(1.0);
            sandbox.tick(1.0 / 60.0);
        }
        assert!(sandbox.time.is_paused());
        for _ in 0..200 {
            sandbox.tick(1.0 / 60.0);
        }

        let body = sandbox.aircraft.body;
        let before = sandbox.physics.body(body).unwrap().position();
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.physics.body(body).unwrap().position(), before);
    }

    #[test]
    fn test_focus_switches_scheme() {
        let mut sandbox = Sandbox::default();
        sandbox.set_focus(VehicleFocus::GroundVehicle);
        sandbox.handle_key(KeyCode::P, true);
        sandbox.tick(1.0 / 60.0);

        let ground = sandbox.ground.as_ref().unwrap();
        assert_eq!(sandbox.physics.vehicle(ground.vehicle).unwrap().total_engine_force(), 300.0);
    }

    #[test]
    fn test_first_person_follows_focus() {
        let mut sandbox = Sandbox::default();
        sandbox.set_first_person(true);
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.camera.mode(), CameraMode::FirstPerson);

        sandbox.set_focus(VehicleFocus::GroundVehicle);
        assert!(!sandbox.is_first_person());
        sandbox.tick(1.0 / 60.0);
        assert_eq!(sandbox.camera.mode(), CameraMode::Orbit);
    }

    #[test]
    fn test_unregistered_system_stops() {
        let mut sandbox = Sandbox::default();
        sandbox.schedule.unregister(SystemId::AircraftDynamics);
        sandbox.tick(1.0 / 60.0);
        assert!(sandbox.telemetry().is_none());
    }
}
