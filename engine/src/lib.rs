//! Aerocar Engine Library
//!
//! Control-to-motion pipeline for a small vehicle sandbox: keyboard intents
//! drive an aircraft and a ground vehicle, a stabilizer levels the aircraft
//! when the stick is released, and a camera operator follows whichever
//! vehicle has focus.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic keyboard state, intents and binding tables
//! - [`physics`] - Rigid-body and raycast-vehicle traits with a kinematic stand-in
//! - [`vehicles`] - Aircraft and ground vehicle models, auto-level stabilizer
//! - [`camera`] - Orbit, free-fly, cockpit and chase camera
//! - [`world`] - Config, time scale, schedule and the sandbox world
//!
//! # Example
//!
//! ```ignore
//! use aerocar_engine::input::KeyCode;
//! use aerocar_engine::world::Sandbox;
//!
//! let mut sandbox = Sandbox::default();
//!
//! // Throttle up for one frame
//! sandbox.handle_key(KeyCode::W, true);
//! let pose = sandbox.tick(1.0 / 60.0);
//! let view = pose.view_matrix();
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod vehicles;
pub mod world;

// Re-export commonly used types
pub use camera::{CameraMode, CameraOperator, CameraTransform};
pub use input::{ControlScheme, InputState, Intent, IntentSet, KeyCode, KeyboardState};
pub use vehicles::{AerialDynamicsModel, GroundDynamicsModel, OrientationStabilizer};
pub use world::{Sandbox, SandboxConfig, TimeScale};
