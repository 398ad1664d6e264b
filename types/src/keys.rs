//! Per-keystroke filtering for numeric fields.
//!
//! A fast UX filter that decides whether a key press may insert text at all.
//! [`crate::sanitize`] is still run on the resulting string and has the final
//! say.

use crate::numeric::NumericConfig;

/// A key press, independent of any terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Tab,
    Enter,
    Home,
    End,
    Esc,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: Key,
    /// Ctrl on most platforms.
    pub control: bool,
    /// Cmd / Super.
    pub meta: bool,
}

impl Keystroke {
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            control: false,
            meta: false,
        }
    }

    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            control: true,
            meta: false,
        }
    }

    const fn has_shortcut_modifier(self) -> bool {
        self.control || self.meta
    }
}

impl From<Key> for Keystroke {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVerdict {
    Allow,
    Block,
}

impl KeyVerdict {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `keystroke` may apply its default editing behaviour to a
/// numeric field currently holding `current` with the caret at `caret`
/// (a char offset).
#[must_use]
pub fn filter_keystroke(
    keystroke: &Keystroke,
    current: &str,
    caret: usize,
    config: &NumericConfig,
) -> KeyVerdict {
    let allowed = match keystroke.key {
        Key::Char(c) if c.is_ascii_digit() => true,
        Key::Backspace
        | Key::Delete
        | Key::Left
        | Key::Right
        | Key::Up
        | Key::Down
        | Key::Tab
        | Key::Enter => true,
        Key::Char('.') if config.allow_decimals && !current.contains('.') => true,
        Key::Char('-')
            if config.allow_negative
                && !current.contains('-')
                && (caret == 0 || current.is_empty()) =>
        {
            true
        }
        Key::Char(c) if keystroke.has_shortcut_modifier() => {
            matches!(c.to_ascii_lowercase(), 'a' | 'c' | 'v' | 'x')
        }
        _ => false,
    };

    if allowed {
        KeyVerdict::Allow
    } else {
        KeyVerdict::Block
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyVerdict, Keystroke, filter_keystroke};
    use crate::numeric::NumericConfig;

    fn verdict(
        key: impl Into<Keystroke>,
        current: &str,
        caret: usize,
        config: &NumericConfig,
    ) -> KeyVerdict {
        filter_keystroke(&key.into(), current, caret, config)
    }

    #[test]
    fn digits_and_editing_keys_always_pass() {
        let config = NumericConfig::integer();
        for c in '0'..='9' {
            assert_eq!(verdict(Key::Char(c), "12", 1, &config), KeyVerdict::Allow);
        }
        for key in [
            Key::Backspace,
            Key::Delete,
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Down,
            Key::Tab,
            Key::Enter,
        ] {
            assert_eq!(verdict(key, "12", 1, &config), KeyVerdict::Allow);
        }
    }

    #[test]
    fn letters_and_other_keys_are_blocked() {
        let config = NumericConfig::integer().with_decimals().with_negative();
        assert_eq!(verdict(Key::Char('a'), "", 0, &config), KeyVerdict::Block);
        assert_eq!(verdict(Key::Char(' '), "", 0, &config), KeyVerdict::Block);
        assert_eq!(verdict(Key::Char('+'), "", 0, &config), KeyVerdict::Block);
        assert_eq!(verdict(Key::Home, "", 0, &config), KeyVerdict::Block);
        assert_eq!(verdict(Key::Other, "", 0, &config), KeyVerdict::Block);
    }

    #[test]
    fn decimal_point_needs_config_and_no_existing_point() {
        let integer = NumericConfig::integer();
        let decimal = NumericConfig::integer().with_decimals();
        assert_eq!(verdict(Key::Char('.'), "12", 2, &integer), KeyVerdict::Block);
        assert_eq!(verdict(Key::Char('.'), "12", 2, &decimal), KeyVerdict::Allow);
        assert_eq!(verdict(Key::Char('.'), "1.2", 3, &decimal), KeyVerdict::Block);
    }

    #[test]
    fn minus_only_at_start_and_only_once() {
        let config = NumericConfig::integer().with_negative();
        assert_eq!(verdict(Key::Char('-'), "", 0, &config), KeyVerdict::Allow);
        assert_eq!(verdict(Key::Char('-'), "12", 0, &config), KeyVerdict::Allow);
        assert_eq!(verdict(Key::Char('-'), "12", 1, &config), KeyVerdict::Block);
        assert_eq!(verdict(Key::Char('-'), "-12", 0, &config), KeyVerdict::Block);
        assert_eq!(
            verdict(Key::Char('-'), "", 0, &NumericConfig::integer()),
            KeyVerdict::Block
        );
    }

    #[test]
    fn clipboard_shortcuts_pass_with_modifier() {
        let config = NumericConfig::integer();
        for c in ['a', 'c', 'v', 'x', 'A', 'V'] {
            assert!(filter_keystroke(&Keystroke::ctrl(c), "1", 1, &config).is_allowed());
        }
        let meta_v = Keystroke {
            key: Key::Char('v'),
            control: false,
            meta: true,
        };
        assert!(filter_keystroke(&meta_v, "1", 1, &config).is_allowed());
        assert!(!filter_keystroke(&Keystroke::ctrl('z'), "1", 1, &config).is_allowed());
        let plain_v = Keystroke::plain(Key::Char('v'));
        assert!(!filter_keystroke(&plain_v, "1", 1, &config).is_allowed());
    }
}
