//! Canonical key codes
//!
//! Device-independent key identifiers that every component codes against.
//! Each code has a stable integer value used as a bitset index by
//! [`InputState`](crate::input::InputState). Only the [`translator`] knows
//! platform key identifiers.

pub mod translator;

pub use translator::{KeyTranslator, init, translate};

macro_rules! key_codes {
    ($($(#[$doc:meta])* $name:ident = $value:literal,)*) => {
        /// Canonical, platform-independent key code
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum KeyCode {
            $($(#[$doc])* $name = $value,)*
        }

        impl KeyCode {
            /// Every canonical key code in ascending value order
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$name,)*];

            /// Look up a key code by its stable value
            pub const fn from_value(value: u16) -> Option<Self> {
                match value {
                    $($value => Some(KeyCode::$name),)*
                    _ => None,
                }
            }
        }
    };
}

key_codes! {
    /// Sentinel for a present but meaningless mapping
    Undefined = 0,

    /// Digit 0 from either the top row or the numpad
    Key0 = 1,
    /// Digit 1 from either the top row or the numpad
    Key1 = 2,
    /// Digit 2 from either the top row or the numpad
    Key2 = 3,
    /// Digit 3 from either the top row or the numpad
    Key3 = 4,
    /// Digit 4 from either the top row or the numpad
    Key4 = 5,
    /// Digit 5 from either the top row or the numpad
    Key5 = 6,
    /// Digit 6 from either the top row or the numpad
    Key6 = 7,
    /// Digit 7 from either the top row or the numpad
    Key7 = 8,
    /// Digit 8 from either the top row or the numpad
    Key8 = 9,
    /// Digit 9 from either the top row or the numpad
    Key9 = 10,

    /// Top-row 0
    Key0Base = 11,
    /// Top-row 1
    Key1Base = 12,
    /// Top-row 2
    Key2Base = 13,
    /// Top-row 3
    Key3Base = 14,
    /// Top-row 4
    Key4Base = 15,
    /// Top-row 5
    Key5Base = 16,
    /// Top-row 6
    Key6Base = 17,
    /// Top-row 7
    Key7Base = 18,
    /// Top-row 8
    Key8Base = 19,
    /// Top-row 9
    Key9Base = 20,

    /// Numpad 0
    Key0Numpad = 21,
    /// Numpad 1
    Key1Numpad = 22,
    /// Numpad 2
    Key2Numpad = 23,
    /// Numpad 3
    Key3Numpad = 24,
    /// Numpad 4
    Key4Numpad = 25,
    /// Numpad 5
    Key5Numpad = 26,
    /// Numpad 6
    Key6Numpad = 27,
    /// Numpad 7
    Key7Numpad = 28,
    /// Numpad 8
    Key8Numpad = 29,
    /// Numpad 9
    Key9Numpad = 30,

    /// A key
    A = 31,
    /// B key
    B = 32,
    /// C key
    C = 33,
    /// D key
    D = 34,
    /// E key
    E = 35,
    /// F key
    F = 36,
    /// G key
    G = 37,
    /// H key
    H = 38,
    /// I key
    I = 39,
    /// J key
    J = 40,
    /// K key
    K = 41,
    /// L key
    L = 42,
    /// M key
    M = 43,
    /// N key
    N = 44,
    /// O key
    O = 45,
    /// P key
    P = 46,
    /// Q key
    Q = 47,
    /// R key
    R = 48,
    /// S key
    S = 49,
    /// T key
    T = 50,
    /// U key
    U = 51,
    /// V key
    V = 52,
    /// W key
    W = 53,
    /// X key
    X = 54,
    /// Y key
    Y = 55,
    /// Z key
    Z = 56,

    /// Escape
    Escape = 57,
    /// Grave accent / tilde
    Grave = 58,
    /// Caps Lock
    CapsLock = 59,
    /// Either shift key
    Shift = 60,
    /// Either control key
    Control = 61,
    /// Either alt key or the menu key
    Alt = 62,
    /// Space bar
    Space = 63,

    /// F1
    F1 = 64,
    /// F2
    F2 = 65,
    /// F3
    F3 = 66,
    /// F4
    F4 = 67,
    /// F5
    F5 = 68,
    /// F6
    F6 = 69,
    /// F7
    F7 = 70,
    /// F8
    F8 = 71,
    /// F9
    F9 = 72,
    /// F10
    F10 = 73,
    /// F11
    F11 = 74,
    /// F12
    F12 = 75,

    /// Pause
    Pause = 76,
    /// Insert
    Insert = 77,
    /// Delete
    Delete = 78,
    /// Top-row minus
    MinusBase = 79,
    /// Equals, from the main block or the numpad
    Equals = 80,
    /// Backspace
    Backspace = 81,
    /// Num Lock
    NumLock = 82,

    /// Numpad divide
    DivideNumpad = 83,
    /// Numpad multiply
    MultiplyNumpad = 84,
    /// Numpad minus
    MinusNumpad = 85,
    /// Numpad plus
    PlusNumpad = 86,

    /// `[`
    OpenBracket = 87,
    /// `]`
    CloseBracket = 88,
    /// `\`
    Backslash = 89,
    /// `;`
    Semicolon = 90,
    /// `'`
    Quote = 91,
    /// Enter, from the main block or the numpad
    Enter = 92,
    /// `,`
    Comma = 93,
    /// `.`
    Period = 94,
    /// `/`
    Slash = 95,
    /// Numpad decimal separator
    Decimal = 96,

    /// Left arrow
    Left = 97,
    /// Up arrow
    Up = 98,
    /// Right arrow
    Right = 99,
    /// Down arrow
    Down = 100,

    /// Tab
    Tab = 101,
    /// Home
    Home = 102,
    /// End
    End = 103,
    /// Page up
    PageUp = 104,
    /// Page down
    PageDown = 105,
}

impl KeyCode {
    /// Number of canonical codes, one past the largest value
    pub const COUNT: usize = Self::ALL.len();

    /// Stable integer value of this code
    pub const fn value(self) -> u16 {
        self as u16
    }

    /// Index for bitset and array storage
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_dense_and_stable() {
        assert_eq!(KeyCode::ALL.len(), KeyCode::COUNT);
        for (index, code) in KeyCode::ALL.iter().enumerate() {
            assert_eq!(code.index(), index);
            assert_eq!(KeyCode::from_value(code.value()), Some(*code));
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(KeyCode::Undefined.value(), 0);
        assert_eq!(KeyCode::A.value(), 31);
        assert_eq!(KeyCode::Key0Numpad.value(), 21);
        assert_eq!(KeyCode::from_value(KeyCode::COUNT as u16), None);
    }
}
