//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! Event handlers only mutate flag state here; the frame loop polls one
//! [`InputFrame`] snapshot per tick, so input latency is bounded to one frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use aerocar_engine::input::{ControlScheme, InputState, Intent, KeyCode};
//!
//! let mut input = InputState::new();
//! input.set_key(KeyCode::W, true);
//!
//! let frame = input.poll(ControlScheme::Aircraft);
//! if frame.held.contains(Intent::Throttle) {
//!     // Accelerate
//! }
//! ```

pub mod bindings;
pub mod intent;
pub mod keyboard;
pub mod winit_keys;

use std::collections::HashMap;

pub use bindings::{ControlScheme, KeyBindings, KeyChord};
pub use intent::{Intent, IntentSet};
pub use keyboard::{KeyCode, KeyboardState, ModifierState};

/// One tick's worth of input, taken by [`InputState::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Intents held this tick
    pub held: IntentSet,
    /// Intents that became active since the previous poll
    pub pressed: IntentSet,
    /// Accumulated mouse movement since the previous poll (pixels)
    pub mouse_delta: (f32, f32),
    /// Accumulated wheel movement since the previous poll (lines)
    pub scroll: f32,
}

/// Combined input state for keyboard and mouse.
#[derive(Debug, Clone)]
pub struct InputState {
    pub keyboard: KeyboardState,
    bindings: HashMap<ControlScheme, KeyBindings>,
    previous: IntentSet,
    mouse_delta: (f32, f32),
    scroll: f32,
}

impl Default for InputState {
    fn default() -> Self {
        let bindings = [
            ControlScheme::Aircraft,
            ControlScheme::GroundVehicle,
            ControlScheme::FreeCamera,
        ]
        .into_iter()
        .map(|scheme| (scheme, KeyBindings::for_scheme(scheme)))
        .collect();

        Self {
            keyboard: KeyboardState::new(),
            bindings,
            previous: IntentSet::EMPTY,
            mouse_delta: (0.0, 0.0),
            scroll: 0.0,
        }
    }
}

impl InputState {
    /// Create a new input state with the default binding tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Last writer wins.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.keyboard.handle_key(key, pressed);
    }

    /// Replace the modifier state (from a platform modifiers event).
    pub fn set_modifiers(&mut self, modifiers: ModifierState) {
        self.keyboard.set_modifiers(modifiers);
    }

    /// Accumulate mouse movement. Non-finite deltas are dropped.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
        }
    }

    /// Accumulate wheel movement. Non-finite deltas are dropped.
    pub fn add_scroll(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll += delta;
        }
    }

    /// Binding table for a scheme.
    pub fn bindings(&self, scheme: ControlScheme) -> Option<&KeyBindings> {
        self.bindings.get(&scheme)
    }

    /// Replace the binding table for its scheme.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings.insert(bindings.scheme(), bindings);
    }

    /// Currently held intents under a scheme, without consuming anything.
    pub fn intents(&self, scheme: ControlScheme) -> IntentSet {
        self.bindings
            .get(&scheme)
            .map(|b| b.resolve(&self.keyboard))
            .unwrap_or_default()
    }

    /// Take this tick's snapshot: held intents, press edges, and the mouse
    /// and wheel movement accumulated since the last poll.
    pub fn poll(&mut self, scheme: ControlScheme) -> InputFrame {
        let held = self.intents(scheme);
        let pressed = held.newly_active(self.previous);
        self.previous = held;

        let frame = InputFrame {
            held,
            pressed,
            mouse_delta: self.mouse_delta,
            scroll: self.scroll,
        };
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
        frame
    }

    /// Reset all input state to defaults, keeping the binding tables.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.previous = IntentSet::EMPTY;
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }
}
