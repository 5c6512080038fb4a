//! winit translation layer
//!
//! Converts winit's physical key codes and modifier state into the engine's
//! window-system-agnostic types. Keys the engine has no use for become
//! [`KeyCode::Unknown`], which the keyboard state ignores.

use winit::keyboard::{KeyCode as WinitKey, ModifiersState, PhysicalKey};

use super::keyboard::{KeyCode, ModifierState};

impl From<WinitKey> for KeyCode {
    fn from(key: WinitKey) -> Self {
        match key {
            WinitKey::KeyA => KeyCode::A,
            WinitKey::KeyB => KeyCode::B,
            WinitKey::KeyC => KeyCode::C,
            WinitKey::KeyD => KeyCode::D,
            WinitKey::KeyE => KeyCode::E,
            WinitKey::KeyF => KeyCode::F,
            WinitKey::KeyG => KeyCode::G,
            WinitKey::KeyH => KeyCode::H,
            WinitKey::KeyI => KeyCode::I,
            WinitKey::KeyJ => KeyCode::J,
            WinitKey::KeyK => KeyCode::K,
            WinitKey::KeyL => KeyCode::L,
            WinitKey::KeyM => KeyCode::M,
            WinitKey::KeyN => KeyCode::N,
            WinitKey::KeyO => KeyCode::O,
            WinitKey::KeyP => KeyCode::P,
            WinitKey::KeyQ => KeyCode::Q,
            WinitKey::KeyR => KeyCode::R,
            WinitKey::KeyS => KeyCode::S,
            WinitKey::KeyT => KeyCode::T,
            WinitKey::KeyU => KeyCode::U,
            WinitKey::KeyV => KeyCode::V,
            WinitKey::KeyW => KeyCode::W,
            WinitKey::KeyX => KeyCode::X,
            WinitKey::KeyY => KeyCode::Y,
            WinitKey::KeyZ => KeyCode::Z,
            WinitKey::ArrowUp => KeyCode::ArrowUp,
            WinitKey::ArrowDown => KeyCode::ArrowDown,
            WinitKey::ArrowLeft => KeyCode::ArrowLeft,
            WinitKey::ArrowRight => KeyCode::ArrowRight,
            WinitKey::ShiftLeft => KeyCode::ShiftLeft,
            WinitKey::ShiftRight => KeyCode::ShiftRight,
            WinitKey::ControlLeft => KeyCode::ControlLeft,
            WinitKey::ControlRight => KeyCode::ControlRight,
            WinitKey::AltLeft => KeyCode::AltLeft,
            WinitKey::AltRight => KeyCode::AltRight,
            WinitKey::Space => KeyCode::Space,
            WinitKey::Escape => KeyCode::Escape,
            WinitKey::Enter => KeyCode::Enter,
            WinitKey::Tab => KeyCode::Tab,
            _ => KeyCode::Unknown,
        }
    }
}

impl From<PhysicalKey> for KeyCode {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => code.into(),
            PhysicalKey::Unidentified(_) => KeyCode::Unknown,
        }
    }
}

impl From<ModifiersState> for ModifierState {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}
