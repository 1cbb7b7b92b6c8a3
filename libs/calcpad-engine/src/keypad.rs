//! Keypad keys and keyboard token mapping
//!
//! Front ends translate whatever the user pressed into [`Key`] values and
//! feed them to [`Calculator::press`](crate::Calculator::press).

use std::fmt;

use thiserror::Error;

use crate::state::Operation;

/// A single keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(char),
    Decimal,
    Operator(Operation),
    SquareRoot,
    Equals,
    Clear,
    Backspace,
}

/// Button class, used by front ends for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVariant {
    Number,
    Operation,
    Clear,
}

/// Keypad grid, top row first
pub const KEYPAD_ROWS: [&[Key]; 5] = [
    &[
        Key::Digit('7'),
        Key::Digit('8'),
        Key::Digit('9'),
        Key::Operator(Operation::Divide),
    ],
    &[
        Key::Digit('4'),
        Key::Digit('5'),
        Key::Digit('6'),
        Key::Operator(Operation::Multiply),
    ],
    &[
        Key::Digit('1'),
        Key::Digit('2'),
        Key::Digit('3'),
        Key::Operator(Operation::Subtract),
    ],
    &[
        Key::Digit('0'),
        Key::Decimal,
        Key::Operator(Operation::Add),
        Key::Equals,
    ],
    &[
        Key::Clear,
        Key::Backspace,
        Key::SquareRoot,
        Key::Operator(Operation::Power),
        Key::Operator(Operation::Remainder),
    ],
];

/// Named keys accepted by [`Key::from_token`], for completion and help output
pub const NAMED_KEYS: &[&str] = &[
    "enter",
    "escape",
    "delete",
    "backspace",
    "sqrt",
    "clear",
];

impl Key {
    /// Map a keyboard token to a key
    ///
    /// Accepts single characters (`0`-`9`, `.`, `=`, operator symbols, `√`)
    /// and key names (`Enter`, `Escape`, `Delete`, `Backspace`, `sqrt`, ...),
    /// the latter case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = Self::from_char(c) {
                return Some(key);
            }
        }

        match token.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Equals),
            "escape" | "esc" | "delete" | "del" | "clear" => Some(Self::Clear),
            "backspace" | "bs" => Some(Self::Backspace),
            "sqrt" => Some(Self::SquareRoot),
            _ => None,
        }
    }

    /// Map a single typed character to a key
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            '√' | 'r' => Some(Self::SquareRoot),
            'c' | 'C' => Some(Self::Clear),
            _ => {
                let mut buf = [0u8; 4];
                match c.encode_utf8(&mut buf).parse::<Operation>() {
                    Ok(Operation::SquareRoot) => Some(Self::SquareRoot),
                    Ok(op) => Some(Self::Operator(op)),
                    Err(_) => None,
                }
            },
        }
    }

    /// Text printed on the button
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::SquareRoot => "√".to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    pub fn variant(&self) -> KeyVariant {
        match self {
            Self::Digit(_) | Self::Decimal => KeyVariant::Number,
            Self::Clear | Self::Backspace => KeyVariant::Clear,
            Self::Operator(_) | Self::SquareRoot | Self::Equals => KeyVariant::Operation,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Token that maps to no key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key: {0:?}")]
pub struct UnknownKey(pub String);

/// Parse a line of keyboard input into keys
///
/// Tokens are separated by whitespace. A token that is not a key on its own
/// (`12+3=`) is split into single-character keys.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, UnknownKey> {
    let mut keys = Vec::new();
    for token in input.split_whitespace() {
        if let Some(key) = Key::from_token(token) {
            keys.push(key);
            continue;
        }
        for c in token.chars() {
            let key = Key::from_char(c).ok_or_else(|| UnknownKey(c.to_string()))?;
            keys.push(key);
        }
    }
    Ok(keys)
}
