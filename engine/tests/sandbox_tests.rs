//! Sandbox Tests - Frame Loop, Receiver Hand-off and Config
//!
//! Drives the whole pipeline through Sandbox the way the window shell does.

use aerocar_engine::camera::CameraMode;
use aerocar_engine::input::{KeyCode, ModifierState};
use aerocar_engine::physics::RigidBody;
use aerocar_engine::vehicles::SPAWN_POINT;
use aerocar_engine::world::{
    ConfigError, InputReceiver, Sandbox, SandboxConfig, SystemId, VehicleFocus,
};
use approx::assert_relative_eq;
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn shift() -> ModifierState {
    ModifierState {
        shift: true,
        ..Default::default()
    }
}

fn tap_free_camera(sandbox: &mut Sandbox) {
    sandbox.set_modifiers(shift());
    sandbox.handle_key(KeyCode::C, true);
    sandbox.tick(DT);
    sandbox.handle_key(KeyCode::C, false);
    sandbox.set_modifiers(ModifierState::default());
    sandbox.tick(DT);
}

fn aircraft_position(sandbox: &Sandbox) -> Vec3 {
    sandbox.physics.body(sandbox.aircraft.body).unwrap().position()
}

#[test]
fn test_camera_follows_aircraft() {
    let mut sandbox = Sandbox::default();
    let mut pose = sandbox.tick(DT);
    for _ in 0..120 {
        pose = sandbox.tick(DT);
    }
    let aircraft = aircraft_position(&sandbox);
    assert_eq!(pose.look_at, aircraft);
    assert_relative_eq!(pose.position.distance(aircraft), 3.0, epsilon = 1e-3);
}

#[test]
fn test_aircraft_drifts_forward_at_idle() {
    let mut sandbox = Sandbox::default();
    for _ in 0..30 {
        sandbox.tick(DT);
    }
    // The stabilizer carries the body forward even with no input
    assert!(aircraft_position(&sandbox).z > SPAWN_POINT.z);
}

#[test]
fn test_reset_key_returns_aircraft_to_spawn() {
    let mut sandbox = Sandbox::default();
    sandbox.handle_key(KeyCode::W, true);
    for _ in 0..60 {
        sandbox.tick(DT);
    }
    sandbox.handle_key(KeyCode::W, false);
    assert!(aircraft_position(&sandbox).distance(SPAWN_POINT) > 0.1);

    sandbox.handle_key(KeyCode::R, true);
    sandbox.tick(DT);
    let body = sandbox.physics.body(sandbox.aircraft.body).unwrap();
    assert_eq!(body.linear_velocity(), Vec3::ZERO);
    assert_eq!(body.angular_velocity(), Vec3::ZERO);
    assert_eq!(body.position(), SPAWN_POINT);
}

#[test]
fn test_free_camera_hand_off_restores_previous_receiver() {
    let mut sandbox = Sandbox::default();
    sandbox.set_focus(VehicleFocus::GroundVehicle);
    sandbox.tick(DT);

    tap_free_camera(&mut sandbox);
    assert_eq!(sandbox.receiver(), InputReceiver::Camera);
    assert_eq!(sandbox.camera.mode(), CameraMode::FreeFly);

    // Fly away; the ground vehicle is no longer driven by P
    let before = sandbox.camera.target;
    sandbox.handle_key(KeyCode::W, true);
    sandbox.handle_key(KeyCode::P, true);
    for _ in 0..20 {
        sandbox.tick(DT);
    }
    sandbox.handle_key(KeyCode::W, false);
    sandbox.handle_key(KeyCode::P, false);
    assert!(sandbox.camera.target.distance(before) > 0.1);
    let ground = sandbox.ground.as_ref().unwrap();
    assert_eq!(sandbox.physics.vehicle(ground.vehicle).unwrap().total_engine_force(), 0.0);

    tap_free_camera(&mut sandbox);
    assert_eq!(sandbox.receiver(), InputReceiver::Vehicle(VehicleFocus::GroundVehicle));
    assert_eq!(sandbox.camera.mode(), CameraMode::Orbit);
}

#[test]
fn test_mouse_moves_camera_once_per_tick() {
    let mut sandbox = Sandbox::default();
    sandbox.handle_mouse_move(10.0, 0.0);
    sandbox.handle_mouse_move(10.0, 20.0);
    sandbox.tick(DT);
    assert_relative_eq!(sandbox.camera.theta(), 350.0, epsilon = 1e-4);
    assert_relative_eq!(sandbox.camera.phi(), 8.0, epsilon = 1e-4);

    // Consumed; the next tick does not re-apply it
    sandbox.tick(DT);
    assert_relative_eq!(sandbox.camera.theta(), 350.0, epsilon = 1e-4);
}

#[test]
fn test_wheel_slows_time() {
    let mut sandbox = Sandbox::default();
    sandbox.handle_mouse_wheel(1.0);
    sandbox.tick(DT);
    assert_relative_eq!(sandbox.time.target(), 1.0 / 1.3, epsilon = 1e-6);
    assert!(sandbox.time.value() < 1.0);
}

#[test]
fn test_unregistered_stabilizer_stops_drift() {
    let mut sandbox = Sandbox::default();
    sandbox.schedule.unregister(SystemId::Stabilizer);
    sandbox.tick(DT);
    let start = aircraft_position(&sandbox);
    for _ in 0..30 {
        sandbox.tick(DT);
    }
    // Hard stop leaves only the idle creep, integrated over seconds
    let moved = aircraft_position(&sandbox).distance(start);
    assert!(moved < 0.05);
}

#[test]
fn test_config_from_json_builds_sandbox() {
    let config = SandboxConfig::from_json(
        r#"{
            "engine": { "engine_power": 1.0 },
            "camera": { "initial_radius": 6.0, "follow_mode": true }
        }"#,
    )
    .unwrap();
    let mut sandbox = Sandbox::from_config(config).unwrap();
    sandbox.tick(DT);
    assert_eq!(sandbox.camera.mode(), CameraMode::Chase);
    assert_eq!(sandbox.aircraft.engine.engine_power(), 1.0);
}

#[test]
fn test_invalid_config_rejected() {
    let result = SandboxConfig::from_json(r#"{ "engine": { "engine_power": -2.0 } }"#);
    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
}
