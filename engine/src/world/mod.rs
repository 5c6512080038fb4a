//! World Module
//!
//! Top-level simulation container: configuration, time scale, the system
//! schedule and the [`Sandbox`] that ties vehicles, physics and camera
//! together.

pub mod config;
pub mod sandbox;
pub mod schedule;
pub mod time;

pub use config::{ConfigError, SandboxConfig};
pub use sandbox::{InputReceiver, Sandbox, VehicleFocus};
pub use schedule::{Schedule, SystemId};
pub use time::{MAX_TIME_STEP, MIN_TIME_SCALE, TimeScale};
