//! Native → canonical key translation
//!
//! The only place that knows GLFW key identifiers. One physical key may stand
//! for several canonical codes (numpad `0` is both [`KeyCode::Key0Numpad`] and
//! [`KeyCode::Key0`]), so every entry maps to an ordered list of codes and
//! callers fan presses and releases out over all of them.

use std::sync::OnceLock;

use glfw::Key;

use super::KeyCode;

/// Size of the native table, one past `GLFW_KEY_LAST`
const NATIVE_KEY_RANGE: usize = Key::Menu as usize + 1;

static GLOBAL: OnceLock<KeyTranslator> = OnceLock::new();

/// Immutable lookup table from GLFW key identifiers to canonical codes
#[derive(Debug)]
pub struct KeyTranslator {
    entries: Vec<Vec<KeyCode>>,
}

/// Build the process-wide table if it does not exist yet and return it
pub fn init() -> &'static KeyTranslator {
    GLOBAL.get_or_init(|| {
        let translator = KeyTranslator::glfw();
        log::debug!("Key translation table built with {} mapped keys", translator.mapped_count());
        translator
    })
}

/// Translate through the process-wide table
pub fn translate(native: i32) -> Vec<KeyCode> {
    init().translate(native)
}

impl KeyTranslator {
    /// The process-wide table, built on first use
    pub fn global() -> &'static Self {
        init()
    }

    fn empty() -> Self {
        Self {
            entries: vec![Vec::new(); NATIVE_KEY_RANGE],
        }
    }

    fn put(&mut self, native: Key, codes: &[KeyCode]) {
        self.entries[native as usize] = codes.to_vec();
    }

    /// Build the GLFW table
    pub fn glfw() -> Self {
        use KeyCode as K;

        let mut table = Self::empty();

        let digits = [
            (Key::Num0, Key::Kp0, K::Key0Base, K::Key0Numpad, K::Key0),
            (Key::Num1, Key::Kp1, K::Key1Base, K::Key1Numpad, K::Key1),
            (Key::Num2, Key::Kp2, K::Key2Base, K::Key2Numpad, K::Key2),
            (Key::Num3, Key::Kp3, K::Key3Base, K::Key3Numpad, K::Key3),
            (Key::Num4, Key::Kp4, K::Key4Base, K::Key4Numpad, K::Key4),
            (Key::Num5, Key::Kp5, K::Key5Base, K::Key5Numpad, K::Key5),
            (Key::Num6, Key::Kp6, K::Key6Base, K::Key6Numpad, K::Key6),
            (Key::Num7, Key::Kp7, K::Key7Base, K::Key7Numpad, K::Key7),
            (Key::Num8, Key::Kp8, K::Key8Base, K::Key8Numpad, K::Key8),
            (Key::Num9, Key::Kp9, K::Key9Base, K::Key9Numpad, K::Key9),
        ];
        for (row, pad, base, numpad, digit) in digits {
            table.put(row, &[base, digit]);
            table.put(pad, &[numpad, digit]);
        }

        let letters = [
            (Key::A, K::A), (Key::B, K::B), (Key::C, K::C), (Key::D, K::D),
            (Key::E, K::E), (Key::F, K::F), (Key::G, K::G), (Key::H, K::H),
            (Key::I, K::I), (Key::J, K::J), (Key::K, K::K), (Key::L, K::L),
            (Key::M, K::M), (Key::N, K::N), (Key::O, K::O), (Key::P, K::P),
            (Key::Q, K::Q), (Key::R, K::R), (Key::S, K::S), (Key::T, K::T),
            (Key::U, K::U), (Key::V, K::V), (Key::W, K::W), (Key::X, K::X),
            (Key::Y, K::Y), (Key::Z, K::Z),
        ];
        for (native, code) in letters {
            table.put(native, &[code]);
        }

        let function_keys = [
            (Key::F1, K::F1), (Key::F2, K::F2), (Key::F3, K::F3), (Key::F4, K::F4),
            (Key::F5, K::F5), (Key::F6, K::F6), (Key::F7, K::F7), (Key::F8, K::F8),
            (Key::F9, K::F9), (Key::F10, K::F10), (Key::F11, K::F11), (Key::F12, K::F12),
        ];
        for (native, code) in function_keys {
            table.put(native, &[code]);
        }

        table.put(Key::Escape, &[K::Escape]);
        table.put(Key::GraveAccent, &[K::Grave]);
        table.put(Key::CapsLock, &[K::CapsLock]);
        table.put(Key::LeftShift, &[K::Shift]);
        table.put(Key::RightShift, &[K::Shift]);
        table.put(Key::LeftControl, &[K::Control]);
        table.put(Key::RightControl, &[K::Control]);
        table.put(Key::LeftAlt, &[K::Alt]);
        table.put(Key::RightAlt, &[K::Alt]);
        table.put(Key::Menu, &[K::Alt]);
        table.put(Key::Space, &[K::Space]);

        table.put(Key::Pause, &[K::Pause]);
        table.put(Key::Insert, &[K::Insert]);
        table.put(Key::Delete, &[K::Delete]);
        table.put(Key::Minus, &[K::MinusBase]);
        table.put(Key::Equal, &[K::Equals]);
        table.put(Key::KpEqual, &[K::Equals]);
        table.put(Key::Backspace, &[K::Backspace]);
        table.put(Key::NumLock, &[K::NumLock]);

        table.put(Key::KpDivide, &[K::DivideNumpad]);
        table.put(Key::KpMultiply, &[K::MultiplyNumpad]);
        table.put(Key::KpSubtract, &[K::MinusNumpad]);
        table.put(Key::KpAdd, &[K::PlusNumpad]);

        table.put(Key::LeftBracket, &[K::OpenBracket]);
        table.put(Key::RightBracket, &[K::CloseBracket]);
        table.put(Key::Backslash, &[K::Backslash]);
        table.put(Key::Semicolon, &[K::Semicolon]);
        table.put(Key::Apostrophe, &[K::Quote]);
        table.put(Key::Enter, &[K::Enter]);
        table.put(Key::KpEnter, &[K::Enter]);
        table.put(Key::Comma, &[K::Comma]);
        table.put(Key::Period, &[K::Period]);
        table.put(Key::Slash, &[K::Slash]);
        table.put(Key::KpDecimal, &[K::Decimal]);

        table.put(Key::Left, &[K::Left]);
        table.put(Key::Up, &[K::Up]);
        table.put(Key::Right, &[K::Right]);
        table.put(Key::Down, &[K::Down]);

        table.put(Key::Tab, &[K::Tab]);
        table.put(Key::Home, &[K::Home]);
        table.put(Key::End, &[K::End]);
        table.put(Key::PageUp, &[K::PageUp]);
        table.put(Key::PageDown, &[K::PageDown]);

        // Non-US layout keys have no stable meaning
        table.put(Key::World1, &[K::Undefined]);
        table.put(Key::World2, &[K::Undefined]);

        table
    }

    /// Canonical codes for a native key, in mapped order
    ///
    /// Out-of-range, unmapped and undefined keys all yield an empty vector.
    /// The result is a copy; changing it does not affect the table.
    pub fn translate(&self, native: i32) -> Vec<KeyCode> {
        let Ok(index) = usize::try_from(native) else {
            return Vec::new();
        };
        match self.entries.get(index) {
            Some(codes) if codes.first().is_some_and(|code| *code != KeyCode::Undefined) => codes.clone(),
            _ => Vec::new(),
        }
    }

    /// Number of native keys with a usable mapping
    pub fn mapped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|codes| codes.first().is_some_and(|code| *code != KeyCode::Undefined))
            .count()
    }

    /// Exclusive upper bound of accepted native codes
    pub fn native_range(&self) -> usize {
        self.entries.len()
    }
}
