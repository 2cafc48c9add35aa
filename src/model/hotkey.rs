//! Hotkey chords.

use std::fmt;

use crate::error::HotkeyError;

/// A Windows virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    pub const LBUTTON: Self = Self(0x01);
    pub const RBUTTON: Self = Self(0x02);
    pub const SHIFT: Self = Self(0x10);
    pub const CTRL: Self = Self(0x11);
    /// Alt (`VK_MENU`).
    pub const ALT: Self = Self(0x12);

    /// Letter key for `'A'..='Z'` (case-insensitive).
    pub const fn letter(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u16))
        } else {
            None
        }
    }

    pub const P: Self = Self(0x50);
    pub const N: Self = Self(0x4E);

    /// Raw code as expected by `GetAsyncKeyState`.
    pub fn code(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ALT => f.write_str("Alt"),
            Self::CTRL => f.write_str("Ctrl"),
            Self::SHIFT => f.write_str("Shift"),
            Self::LBUTTON => f.write_str("LeftButton"),
            Self::RBUTTON => f.write_str("RightButton"),
            VirtualKey(code) if (0x41..=0x5A).contains(&code) => {
                write!(f, "{}", code as u8 as char)
            }
            VirtualKey(code) => write!(f, "VK(0x{code:02X})"),
        }
    }
}

/// Anything that can answer "is this key down right now, system-wide".
pub trait KeyStateSource {
    fn is_down(&self, key: VirtualKey) -> bool;
}

/// A set of keys that must all be held at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    keys: Vec<VirtualKey>,
    description: String,
}

impl Hotkey {
    /// Build a chord. Duplicate keys collapse; an empty set is rejected.
    pub fn new(
        keys: impl IntoIterator<Item = VirtualKey>,
        description: impl Into<String>,
    ) -> Result<Self, HotkeyError> {
        let mut keys: Vec<VirtualKey> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        let description = description.into();
        if keys.is_empty() {
            return Err(HotkeyError::EmptyChord(description));
        }
        Ok(Self { keys, description })
    }

    pub fn keys(&self) -> &[VirtualKey] {
        &self.keys
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True iff every member key is currently down.
    pub fn is_pressed<K: KeyStateSource + ?Sized>(&self, source: &K) -> bool {
        self.keys.iter().all(|key| source.is_down(*key))
    }
}

impl Default for Hotkey {
    /// Alt+P+N.
    fn default() -> Self {
        Self {
            keys: vec![VirtualKey::ALT, VirtualKey::N, VirtualKey::P],
            description: super::constants::DEFAULT_HOTKEY_DESCRIPTION.to_string(),
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
