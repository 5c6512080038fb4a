//! Time scale
//!
//! Slow-motion control driven by the mouse wheel. The scale eases toward its
//! target every tick so wheel steps never jolt the simulation.

/// Smallest non-zero target; scrolling below it pauses.
pub const MIN_TIME_SCALE: f32 = 0.003;
/// Longest simulated step per frame (seconds)
pub const MAX_TIME_STEP: f32 = 1.0 / 30.0;
/// Distance at which `value` snaps onto `target`
const SNAP_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    value: f32,
    target: f32,
    /// Factor per tick by which `value` closes on `target`
    pub ease: f32,
    /// Multiplier applied per wheel notch
    pub step: f32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            value: 1.0,
            target: 1.0,
            ease: 0.2,
            step: 1.3,
        }
    }
}

impl TimeScale {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_paused(&self) -> bool {
        self.target == 0.0
    }

    /// Wheel up slows time down, wheel down speeds it back up to 1.
    pub fn scroll(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        if delta > 0.0 {
            self.target /= self.step;
            if self.target < MIN_TIME_SCALE {
                self.target = 0.0;
            }
        } else {
            self.target = (self.target * self.step).clamp(MIN_TIME_SCALE, 1.0);
        }
    }

    /// Ease toward the target and return the simulated step for a frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.value += (self.target - self.value) * self.ease;
        if (self.target - self.value).abs() < SNAP_EPSILON {
            self.value = self.target;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        (dt * self.value).min(MAX_TIME_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_pauses_then_resumes() {
        let mut time = TimeScale::new();
        let mut notches = 0;
        while !time.is_paused() {
            time.scroll(1.0);
            notches += 1;
            assert!(notches < 100);
        }
        assert_eq!(time.target(), 0.0);

        // From a pause the first notch back lands on the floor
        time.scroll(-1.0);
        assert_eq!(time.target(), MIN_TIME_SCALE);
    }

    #[test]
    fn test_scroll_down_caps_at_one() {
        let mut time = TimeScale::new();
        time.scroll(-1.0);
        assert_eq!(time.target(), 1.0);

        time.scroll(1.0);
        assert!((time.target() - 1.0 / 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_value_eases_toward_target() {
        let mut time = TimeScale::new();
        time.scroll(1.0);
        time.advance(0.016);
        let expected = 1.0 + (1.0 / 1.3 - 1.0) * 0.2;
        assert!((time.value() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_value_settles_on_pause() {
        let mut time = TimeScale::new();
        while !time.is_paused() {
            time.scroll(1.0);
        }
        for _ in 0..100 {
            time.advance(0.016);
        }
        assert_eq!(time.value(), 0.0);
        assert_eq!(time.advance(0.016), 0.0);
    }

    #[test]
    fn test_step_is_capped() {
        let mut time = TimeScale::new();
        assert!((time.advance(0.01) - 0.01).abs() < 1e-7);
        assert_eq!(time.advance(0.5), MAX_TIME_STEP);
        assert_eq!(time.advance(f32::NAN), 0.0);
    }
}
