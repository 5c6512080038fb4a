//! Camera Module
//!
//! Provides the camera operator that orbits, follows and free-flies around
//! the scene. This module is window-system agnostic - it only deals with
//! camera state and math.

pub mod operator;

pub use operator::{
    CameraMode, CameraOperator, CameraSettings, CameraTransform, MIN_RADIUS, PHI_LIMIT,
    spherical_to_cartesian,
};
