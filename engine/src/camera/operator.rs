//! Camera Operator Module
//!
//! Spherical-coordinate camera that orbits a target, follows the tracked
//! vehicle, switches into its cockpit view, and detaches for free flight.
//! This is window-system agnostic: it consumes deltas and intents and
//! produces a [`CameraTransform`].
//!
//! Angles are kept in degrees. `theta` wraps around [0, 360) and `phi` is
//! held inside ±85° so the look-at basis never degenerates at the poles.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{Intent, IntentSet};
use crate::physics::lerp;
use crate::vehicles::TrackedVehicle;
use crate::world::TimeScale;

/// Smallest orbit radius
pub const MIN_RADIUS: f32 = 0.001;
/// Elevation limit (degrees)
pub const PHI_LIMIT: f32 = 85.0;
/// Frame rate the free-fly speed constants are tuned for
const REFERENCE_TICK_RATE: f32 = 60.0;

/// Camera mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    /// Orbit the target at `radius`
    #[default]
    Orbit,
    /// Detached; the camera is the input receiver
    FreeFly,
    /// Cockpit view of the tracked vehicle
    FirstPerson,
    /// Trail the tracked vehicle at a body-relative offset
    Chase,
}

/// Render-facing camera pose.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraTransform {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl CameraTransform {
    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }
}

/// Tunable camera constants.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Mouse sensitivity (x = azimuth, y = elevation)
    pub sensitivity: Vec2,
    pub initial_radius: f32,
    /// Per-tick radius smoothing
    pub radius_lerp: f32,
    /// Per-tick smoothing of the cockpit look point
    pub look_lerp: f32,
    /// Body-local look direction in the cockpit view
    pub first_person_look: Vec3,
    /// Per-tick smoothing of free-fly axis velocities
    pub velocity_lerp: f32,
    /// Free-fly distance per reference tick
    pub base_speed: f32,
    pub fast_multiplier: f32,
    /// User multiplier on free-fly speed
    pub free_camera_speed: f32,
    /// Trail behind the tracked vehicle instead of orbiting it
    pub follow_mode: bool,
    /// Body-local camera offset in chase mode
    pub chase_offset: Vec3,
    pub chase_lerp: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::new(1.0, 0.8),
            initial_radius: 3.0,
            radius_lerp: 0.1,
            look_lerp: 0.05,
            first_person_look: Vec3::new(0.0, -0.1, 1.0),
            velocity_lerp: 0.3,
            base_speed: 0.06,
            fast_multiplier: 10.0,
            free_camera_speed: 1.0,
            follow_mode: false,
            chase_offset: Vec3::new(0.0, 1.0, -3.0),
            chase_lerp: 0.05,
        }
    }
}

/// Unit direction from the target to the camera for (theta, phi) in degrees.
pub fn spherical_to_cartesian(theta: f32, phi: f32) -> Vec3 {
    let (theta, phi) = (theta.to_radians(), phi.to_radians());
    Vec3::new(theta.sin() * phi.cos(), phi.sin(), theta.cos() * phi.cos())
}

/// Camera operator state
#[derive(Clone, Debug)]
pub struct CameraOperator {
    pub settings: CameraSettings,
    /// Point the camera orbits (or flies, in free-fly mode)
    pub target: Vec3,
    /// Azimuth (degrees), in [0, 360)
    theta: f32,
    /// Elevation (degrees), in [-85, 85]
    phi: f32,
    radius: f32,
    target_radius: f32,
    up_velocity: f32,
    forward_velocity: f32,
    right_velocity: f32,
    mode: CameraMode,
    position: Vec3,
    look_point: Vec3,
}

impl Default for CameraOperator {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraOperator {
    pub fn new(settings: CameraSettings) -> Self {
        let radius = settings.initial_radius.max(MIN_RADIUS);
        let mut camera = Self {
            settings,
            target: Vec3::ZERO,
            theta: 0.0,
            phi: 0.0,
            radius,
            target_radius: radius,
            up_velocity: 0.0,
            forward_velocity: 0.0,
            right_velocity: 0.0,
            mode: CameraMode::Orbit,
            position: Vec3::ZERO,
            look_point: Vec3::ZERO,
        };
        camera.position = camera.orbit_position();
        camera.mode = camera.base_mode();
        camera
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Free-fly axis velocities (up, forward, right) in [-1, 1].
    pub fn fly_velocity(&self) -> Vec3 {
        Vec3::new(self.up_velocity, self.forward_velocity, self.right_velocity)
    }

    fn base_mode(&self) -> CameraMode {
        if self.settings.follow_mode {
            CameraMode::Chase
        } else {
            CameraMode::Orbit
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            log::debug!("camera mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn orbit_position(&self) -> Vec3 {
        self.target + spherical_to_cartesian(self.theta, self.phi) * self.radius
    }

    /// Set mouse sensitivity. Non-positive or non-finite values are ignored.
    pub fn set_sensitivity(&mut self, x: f32, y: f32) {
        if x.is_finite() && x > 0.0 {
            self.settings.sensitivity.x = x;
        }
        if y.is_finite() && y > 0.0 {
            self.settings.sensitivity.y = y;
        }
    }

    /// Set the orbit radius, never below [`MIN_RADIUS`].
    pub fn set_radius(&mut self, value: f32, instant: bool) {
        self.target_radius = value.max(MIN_RADIUS);
        if instant {
            self.radius = self.target_radius;
        }
    }

    /// Rotate the view by a mouse delta (pixels).
    pub fn move_view(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let sensitivity = self.settings.sensitivity;
        self.theta = (self.theta - dx * sensitivity.x / 2.0).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negatives
        if self.theta >= 360.0 {
            self.theta = 0.0;
        }
        self.phi = (self.phi + dy * sensitivity.y / 2.0).clamp(-PHI_LIMIT, PHI_LIMIT);
    }

    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.move_view(dx, dy);
    }

    /// The wheel drives the global time scale rather than zoom.
    pub fn handle_mouse_wheel(&mut self, time_scale: &mut TimeScale, delta: f32) {
        time_scale.scroll(delta);
    }

    /// Returns `true` when the camera, as input receiver, asks to hand input back.
    pub fn handle_keyboard_event(&mut self, pressed: IntentSet) -> bool {
        self.mode == CameraMode::FreeFly && pressed.contains(Intent::FreeCameraToggle)
    }

    /// Take over input: fly from where the camera currently is.
    pub fn input_receiver_init(&mut self) {
        self.target = self.position;
        self.set_radius(0.0, true);
        self.up_velocity = 0.0;
        self.forward_velocity = 0.0;
        self.right_velocity = 0.0;
        self.set_mode(CameraMode::FreeFly);
    }

    /// Give input back and zoom out to the usual orbit.
    pub fn input_receiver_release(&mut self) {
        self.set_radius(self.settings.initial_radius, false);
        let mode = self.base_mode();
        self.set_mode(mode);
    }

    /// Move the free-fly target from the held intents.
    pub fn input_receiver_update(&mut self, time_step: f32, intents: IntentSet, free_camera_speed: f32) {
        if !time_step.is_finite() || !free_camera_speed.is_finite() {
            return;
        }
        let s = &self.settings;
        let boost = if intents.contains(Intent::FlyFast) { s.fast_multiplier } else { 1.0 };
        let speed = s.base_speed * time_step * REFERENCE_TICK_RATE * boost * free_camera_speed;

        let t = s.velocity_lerp;
        self.up_velocity = lerp(self.up_velocity, intents.axis(Intent::FlyDown, Intent::FlyUp), t);
        self.forward_velocity = lerp(self.forward_velocity, intents.axis(Intent::FlyBack, Intent::FlyForward), t);
        self.right_velocity = lerp(self.right_velocity, intents.axis(Intent::FlyLeft, Intent::FlyRight), t);

        let forward = -spherical_to_cartesian(self.theta, self.phi);
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.target += up * speed * self.up_velocity;
        self.target += forward * speed * self.forward_velocity;
        self.target += right * speed * self.right_velocity;
    }

    /// Advance one tick.
    ///
    /// Outside free flight the target snaps to `tracked`, and the mode follows
    /// the vehicle's cockpit request.
    pub fn update(&mut self, time_scale: f32, tracked: Option<&TrackedVehicle>) -> CameraTransform {
        let tracked = if self.mode == CameraMode::FreeFly { None } else { tracked };

        if self.mode != CameraMode::FreeFly {
            let mode = match tracked {
                Some(v) if v.first_person && v.category.supports_first_person() => CameraMode::FirstPerson,
                _ => self.base_mode(),
            };
            self.set_mode(mode);
        }
        if let Some(vehicle) = tracked {
            self.target = vehicle.position;
        }

        self.radius = lerp(self.radius, self.target_radius, self.settings.radius_lerp);
        let orbit = self.orbit_position();

        let look_at = match (self.mode, tracked) {
            (CameraMode::FirstPerson, Some(vehicle)) => {
                self.position = orbit;
                let goal = self.target + vehicle.orientation * self.settings.first_person_look;
                self.look_point = self.look_point.lerp(goal, self.settings.look_lerp);
                self.look_point
            }
            (CameraMode::Chase, Some(vehicle)) => {
                let desired = vehicle.position + vehicle.orientation * self.settings.chase_offset;
                let t = (self.settings.chase_lerp * time_scale.max(0.0)).min(1.0);
                self.position = self.position.lerp(desired, t);
                self.look_point = vehicle.position;
                self.look_point
            }
            _ => {
                self.position = orbit;
                self.look_point = self.target;
                self.target
            }
        };

        self.transform_with(look_at)
    }

    fn transform_with(&self, look_at: Vec3) -> CameraTransform {
        CameraTransform {
            position: self.position,
            look_at,
            up: Vec3::Y,
        }
    }

    /// Pose from the last update.
    pub fn transform(&self) -> CameraTransform {
        self.transform_with(self.look_point)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.transform().view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicles::VehicleCategory;
    use glam::Quat;

    fn vehicle(first_person: bool, category: VehicleCategory) -> TrackedVehicle {
        TrackedVehicle {
            position: Vec3::new(1.0, 2.0, 3.0),
            orientation: Quat::IDENTITY,
            first_person,
            category,
        }
    }

    #[test]
    fn test_spherical_axes() {
        assert!((spherical_to_cartesian(0.0, 0.0) - Vec3::Z).length() < 1e-6);
        assert!((spherical_to_cartesian(90.0, 0.0) - Vec3::X).length() < 1e-6);
        assert!((spherical_to_cartesian(0.0, 90.0) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_move_clamps_phi_and_wraps_theta() {
        let mut camera = CameraOperator::default();
        camera.move_view(0.0, 1000.0);
        assert_eq!(camera.phi(), PHI_LIMIT);
        camera.move_view(0.0, -5000.0);
        assert_eq!(camera.phi(), -PHI_LIMIT);

        camera.move_view(10.0, 0.0);
        assert!((camera.theta() - 355.0).abs() < 1e-4);
        camera.move_view(-730.0, 0.0);
        assert!((camera.theta() - 0.0).abs() < 1e-3 || (camera.theta() - 360.0).abs() < 1e-3);
        assert!(camera.theta() >= 0.0 && camera.theta() < 360.0);
    }

    #[test]
    fn test_move_ignores_non_finite() {
        let mut camera = CameraOperator::default();
        camera.move_view(f32::NAN, 3.0);
        camera.move_view(1.0, f32::INFINITY);
        assert_eq!(camera.theta(), 0.0);
        assert_eq!(camera.phi(), 0.0);
    }

    #[test]
    fn test_set_radius_never_below_min() {
        let mut camera = CameraOperator::default();
        camera.set_radius(-4.0, false);
        assert_eq!(camera.target_radius(), MIN_RADIUS);
        assert_eq!(camera.radius(), 3.0);

        camera.set_radius(-4.0, true);
        assert_eq!(camera.radius(), MIN_RADIUS);

        camera.set_radius(f32::NAN, true);
        assert_eq!(camera.radius(), MIN_RADIUS);
    }

    #[test]
    fn test_radius_eases() {
        let mut camera = CameraOperator::default();
        camera.set_radius(13.0, false);
        camera.update(1.0, None);
        assert!((camera.radius() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_looks_at_tracked_target() {
        let mut camera = CameraOperator::default();
        let car = vehicle(false, VehicleCategory::GroundVehicle);
        let pose = camera.update(1.0, Some(&car));

        assert_eq!(camera.mode(), CameraMode::Orbit);
        assert_eq!(pose.look_at, car.position);
        assert!((pose.position - (car.position + Vec3::new(0.0, 0.0, 3.0))).length() < 1e-5);
    }

    #[test]
    fn test_first_person_unless_rocket() {
        let mut camera = CameraOperator::default();
        camera.update(1.0, Some(&vehicle(true, VehicleCategory::Aircraft)));
        assert_eq!(camera.mode(), CameraMode::FirstPerson);

        camera.update(1.0, Some(&vehicle(true, VehicleCategory::Rocket)));
        assert_eq!(camera.mode(), CameraMode::Orbit);
    }

    #[test]
    fn test_first_person_look_point_eases() {
        let mut camera = CameraOperator::default();
        let plane = vehicle(true, VehicleCategory::Aircraft);
        let goal = plane.position + Vec3::new(0.0, -0.1, 1.0);

        let first = camera.update(1.0, Some(&plane));
        assert!((first.look_at - Vec3::ZERO.lerp(goal, 0.05)).length() < 1e-5);
        assert_eq!(first.up, Vec3::Y);

        for _ in 0..400 {
            camera.update(1.0, Some(&plane));
        }
        assert!((camera.transform().look_at - goal).length() < 1e-3);
    }

    #[test]
    fn test_free_fly_detaches() {
        let mut camera = CameraOperator::default();
        let car = vehicle(false, VehicleCategory::GroundVehicle);
        let pose = camera.update(1.0, Some(&car));

        camera.input_receiver_init();
        assert_eq!(camera.mode(), CameraMode::FreeFly);
        assert_eq!(camera.target, pose.position);
        assert_eq!(camera.radius(), MIN_RADIUS);

        let moved = TrackedVehicle {
            position: Vec3::new(50.0, 0.0, 0.0),
            ..car
        };
        camera.update(1.0, Some(&moved));
        assert_eq!(camera.target, pose.position);
        assert_eq!(camera.mode(), CameraMode::FreeFly);
    }

    #[test]
    fn test_toggle_only_requests_release_in_free_fly() {
        let mut camera = CameraOperator::default();
        let toggle = IntentSet::from_intents(&[Intent::FreeCameraToggle]);
        assert!(!camera.handle_keyboard_event(toggle));

        camera.input_receiver_init();
        assert!(camera.handle_keyboard_event(toggle));
        assert!(!camera.handle_keyboard_event(IntentSet::EMPTY));

        camera.input_receiver_release();
        assert_eq!(camera.mode(), CameraMode::Orbit);
        assert_eq!(camera.target_radius(), 3.0);
    }

    #[test]
    fn test_free_fly_moves_along_view() {
        let mut camera = CameraOperator::default();
        camera.update(1.0, None);
        camera.input_receiver_init();
        let start = camera.target;

        let forward = IntentSet::from_intents(&[Intent::FlyForward]);
        camera.input_receiver_update(1.0 / 60.0, forward, 1.0);
        // Velocity eased 30% toward 1, then 0.06 per reference tick
        assert!((camera.fly_velocity().y - 0.3).abs() < 1e-6);
        let step = camera.target - start;
        assert!((step - Vec3::new(0.0, 0.0, -0.018)).length() < 1e-5);

        let fast = IntentSet::from_intents(&[Intent::FlyForward, Intent::FlyFast]);
        let before = camera.target;
        camera.input_receiver_update(1.0 / 60.0, fast, 1.0);
        assert!((camera.target - before).length() > 0.2);
    }

    #[test]
    fn test_chase_trails_body() {
        let mut camera = CameraOperator::new(CameraSettings {
            follow_mode: true,
            ..Default::default()
        });
        assert_eq!(camera.mode(), CameraMode::Chase);

        let plane = vehicle(false, VehicleCategory::Aircraft);
        for _ in 0..500 {
            camera.update(1.0, Some(&plane));
        }
        let pose = camera.transform();
        assert!((pose.position - (plane.position + Vec3::new(0.0, 1.0, -3.0))).length() < 1e-3);
        assert_eq!(pose.look_at, plane.position);
    }

    #[test]
    fn test_mouse_wheel_scrolls_time() {
        let mut camera = CameraOperator::default();
        let mut time = TimeScale::new();
        camera.handle_mouse_wheel(&mut time, 1.0);
        assert!(time.target() < 1.0);
    }

    #[test]
    fn test_view_matrix_maps_target_ahead() {
        let mut camera = CameraOperator::default();
        camera.update(1.0, None);
        let view = camera.view_matrix();
        let p = view.transform_point3(Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!((p - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }
}
