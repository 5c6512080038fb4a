//! Input Bindings Module
//!
//! Maps physical keys to [`Intent`]s. Each input receiver has its own
//! [`ControlScheme`], because the same key means different things to
//! different receivers (W is throttle in the aircraft, fly-forward for the
//! free camera).

use std::collections::HashMap;

use super::intent::{Intent, IntentSet};
use super::keyboard::{KeyCode, KeyboardState};

/// Which binding table is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlScheme {
    #[default]
    Aircraft,
    GroundVehicle,
    FreeCamera,
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: KeyCode,
    pub shift: bool,
}

impl KeyChord {
    /// A bare key with no modifier requirement.
    pub const fn key(key: KeyCode) -> Self {
        Self { key, shift: false }
    }

    /// Key that only counts while Shift is held.
    pub const fn shift(key: KeyCode) -> Self {
        Self { key, shift: true }
    }

    fn is_held(&self, keyboard: &KeyboardState) -> bool {
        keyboard.is_pressed(self.key) && (!self.shift || keyboard.modifiers.shift)
    }
}

/// Maps physical keys to intents for one control scheme.
///
/// Bindings are one-to-one: rebinding a key or an intent drops the old pair.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    scheme: ControlScheme,
    /// Map from chord to intent
    chord_to_intent: HashMap<KeyChord, Intent>,
    /// Map from intent to chord (for reverse lookup and display)
    intent_to_chord: HashMap<Intent, KeyChord>,
}

impl KeyBindings {
    fn empty(scheme: ControlScheme) -> Self {
        Self {
            scheme,
            chord_to_intent: HashMap::new(),
            intent_to_chord: HashMap::new(),
        }
    }

    /// Default table for a control scheme.
    pub fn for_scheme(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Aircraft => Self::aircraft(),
            ControlScheme::GroundVehicle => Self::ground_vehicle(),
            ControlScheme::FreeCamera => Self::free_camera(),
        }
    }

    /// Aircraft bindings:
    /// - W/S = throttle/brake
    /// - Q/E = pitch up/down
    /// - Z/X = yaw left/right
    /// - C/F = roll left/right
    /// - R = reset, Shift+C = free camera
    pub fn aircraft() -> Self {
        let mut bindings = Self::empty(ControlScheme::Aircraft);
        bindings.bind(KeyChord::key(KeyCode::W), Intent::Throttle);
        bindings.bind(KeyChord::key(KeyCode::S), Intent::Brake);
        bindings.bind(KeyChord::key(KeyCode::Q), Intent::PitchUp);
        bindings.bind(KeyChord::key(KeyCode::E), Intent::PitchDown);
        bindings.bind(KeyChord::key(KeyCode::Z), Intent::YawLeft);
        bindings.bind(KeyChord::key(KeyCode::X), Intent::YawRight);
        bindings.bind(KeyChord::key(KeyCode::C), Intent::RollLeft);
        bindings.bind(KeyChord::key(KeyCode::F), Intent::RollRight);
        bindings.bind(KeyChord::key(KeyCode::R), Intent::Reset);
        bindings.bind(KeyChord::shift(KeyCode::C), Intent::FreeCameraToggle);
        bindings
    }

    /// Ground vehicle bindings:
    /// - P/L = engine forward/reverse
    /// - K/O = steer left/right
    /// - Arrow keys = righting impulses
    /// - R = reset, Shift+C = free camera
    pub fn ground_vehicle() -> Self {
        let mut bindings = Self::empty(ControlScheme::GroundVehicle);
        bindings.bind(KeyChord::key(KeyCode::P), Intent::Throttle);
        bindings.bind(KeyChord::key(KeyCode::L), Intent::Brake);
        bindings.bind(KeyChord::key(KeyCode::K), Intent::SteerLeft);
        bindings.bind(KeyChord::key(KeyCode::O), Intent::SteerRight);
        bindings.bind(KeyChord::key(KeyCode::ArrowUp), Intent::NudgeForward);
        bindings.bind(KeyChord::key(KeyCode::ArrowDown), Intent::NudgeBack);
        bindings.bind(KeyChord::key(KeyCode::ArrowLeft), Intent::NudgeLeft);
        bindings.bind(KeyChord::key(KeyCode::ArrowRight), Intent::NudgeRight);
        bindings.bind(KeyChord::key(KeyCode::R), Intent::Reset);
        bindings.bind(KeyChord::shift(KeyCode::C), Intent::FreeCameraToggle);
        bindings
    }

    /// Free camera bindings:
    /// - WASD = move, E/Q = up/down
    /// - Shift (Left) = fast
    /// - Shift+C = back to the previous receiver
    pub fn free_camera() -> Self {
        let mut bindings = Self::empty(ControlScheme::FreeCamera);
        bindings.bind(KeyChord::key(KeyCode::W), Intent::FlyForward);
        bindings.bind(KeyChord::key(KeyCode::S), Intent::FlyBack);
        bindings.bind(KeyChord::key(KeyCode::A), Intent::FlyLeft);
        bindings.bind(KeyChord::key(KeyCode::D), Intent::FlyRight);
        bindings.bind(KeyChord::key(KeyCode::E), Intent::FlyUp);
        bindings.bind(KeyChord::key(KeyCode::Q), Intent::FlyDown);
        bindings.bind(KeyChord::key(KeyCode::ShiftLeft), Intent::FlyFast);
        bindings.bind(KeyChord::shift(KeyCode::C), Intent::FreeCameraToggle);
        bindings
    }

    /// The scheme this table belongs to.
    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Bind a chord to an intent.
    ///
    /// If the chord was previously bound to another intent, that binding is removed.
    /// If the intent was previously bound to another chord, that binding is also removed.
    pub fn bind(&mut self, chord: KeyChord, intent: Intent) {
        if let Some(old_intent) = self.chord_to_intent.remove(&chord) {
            self.intent_to_chord.remove(&old_intent);
        }
        if let Some(old_chord) = self.intent_to_chord.remove(&intent) {
            self.chord_to_intent.remove(&old_chord);
        }

        self.chord_to_intent.insert(chord, intent);
        self.intent_to_chord.insert(intent, chord);
    }

    /// Remove the binding for a specific intent.
    pub fn unbind_intent(&mut self, intent: Intent) {
        if let Some(chord) = self.intent_to_chord.remove(&intent) {
            self.chord_to_intent.remove(&chord);
        }
    }

    /// Get the intent bound to a chord, if any.
    pub fn get_intent(&self, chord: KeyChord) -> Option<Intent> {
        self.chord_to_intent.get(&chord).copied()
    }

    /// Get the chord bound to an intent, if any.
    pub fn get_chord(&self, intent: Intent) -> Option<KeyChord> {
        self.intent_to_chord.get(&intent).copied()
    }

    /// Derive the active intent set from the keyboard snapshot.
    ///
    /// A bare binding on a key is suppressed while a Shift chord on the
    /// same key is held, so Shift+C does not also roll the aircraft left.
    pub fn resolve(&self, keyboard: &KeyboardState) -> IntentSet {
        let mut intents = IntentSet::new();
        for (chord, &intent) in &self.chord_to_intent {
            if !chord.is_held(keyboard) {
                continue;
            }
            let shadowed = !chord.shift
                && keyboard.modifiers.shift
                && self.chord_to_intent.contains_key(&KeyChord::shift(chord.key));
            if !shadowed {
                intents.insert(intent);
            }
        }
        intents
    }

    /// Get all current bindings as chord-intent pairs.
    pub fn all_bindings(&self) -> impl Iterator<Item = (KeyChord, Intent)> + '_ {
        self.chord_to_intent.iter().map(|(&c, &i)| (c, i))
    }
}
