//! Keycode vocabulary. The dispatcher only ever branches on the closed set of
//! keys named in the shortcut table; everything else passes through to the
//! key processor untouched, so `Key` stays a small enum with a catch-all
//! rather than a full keyboard layout — this core never captures raw OS key
//! events itself, so it has no need to name every physical key.

use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Key {
    H,
    B,
    Backspace,
    S,
    M,
    P,
    O,
    Z,
    Down,
    Up,
    Left,
    Right,
    C,
    X,
    V,
    F,
    W,
    G,
    I,
    N,
    R,
    K,
    T,
    /// One of the modifier keys themselves: pressing a configured modifier
    /// key on its own also arms a shortcut.
    LCtrl,
    RCtrl,
    LAlt,
    RAlt,
    LSuper,
    RSuper,
    Shift,
    /// Any key outside the shortcut vocabulary. Carries the host's raw
    /// keycode for the key processor's benefit.
    Other(u32),
}

impl Key {
    /// True for the modifier keys that can arm a shortcut on their own.
    pub fn is_shortcut_mod_key(self) -> bool {
        matches!(
            self,
            Key::LCtrl | Key::RCtrl | Key::LAlt | Key::RAlt | Key::LSuper | Key::RSuper
        )
    }
}
