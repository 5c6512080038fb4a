//! Keyboard Input Module
//!
//! Tracks which physical keys are held and the modifier state.
//! Decoupled from winit to use generic key codes; see [`super::winit_keys`]
//! for the translation layer.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Control keys
    Space,
    Escape,
    Enter,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Whether this key is itself a modifier key.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::ShiftLeft
                | KeyCode::ShiftRight
                | KeyCode::ControlLeft
                | KeyCode::ControlRight
                | KeyCode::AltLeft
                | KeyCode::AltRight
        )
    }
}

/// State of keyboard modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    /// Create a new empty modifier state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifier state with only Shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Complete keyboard state tracking.
///
/// Last writer wins per key; there is no debouncing. Modifier keys update
/// both the pressed set and [`ModifierState`], so callers that never receive
/// explicit modifier events still see Shift chords.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
    /// Modifier keys (Shift, Ctrl, Alt, etc.)
    pub modifiers: ModifierState,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the key was recorded. `KeyCode::Unknown` is ignored.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }

        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }

        match key {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.modifiers.shift =
                    self.is_pressed(KeyCode::ShiftLeft) || self.is_pressed(KeyCode::ShiftRight);
            }
            KeyCode::ControlLeft | KeyCode::ControlRight => {
                self.modifiers.ctrl = self.is_pressed(KeyCode::ControlLeft)
                    || self.is_pressed(KeyCode::ControlRight);
            }
            KeyCode::AltLeft | KeyCode::AltRight => {
                self.modifiers.alt =
                    self.is_pressed(KeyCode::AltLeft) || self.is_pressed(KeyCode::AltRight);
            }
            _ => {}
        }
        true
    }

    /// Check whether a key is currently held.
    #[inline]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// The set of currently held keys.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Update modifier state.
    pub fn set_modifiers(&mut self, modifiers: ModifierState) {
        self.modifiers = modifiers;
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.modifiers = ModifierState::default();
    }
}
