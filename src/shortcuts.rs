//! Shortcut state machine: modifier-repeat tracking plus the exhaustive
//! shortcut table. `classify` decides whether a keypress is a local
//! shortcut; if it is, the caller must never forward the key to the key
//! processor, even when a guard blocks the concrete action — a matched
//! shortcut always swallows the event.

use crate::event::RemoteKeycode;
use crate::keys::Key;
use crate::modifiers::Mods;

/// Tracks the last `(key, mods)` combination seen on a non-OS-repeating
/// DOWN, and how many times in a row it has repeated. Owned by the
/// `InputManager`.
#[derive(Debug, Default)]
pub struct RepeatState {
    last: Option<(Key, Mods)>,
    pub key_repeat_count: u32,
}

impl RepeatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must only be called for a non-OS-repeating DOWN: `key_repeat_count`
    /// increments only when `(key, mods)` is identical to the previous
    /// non-repeat DOWN. Returns the updated count.
    pub fn note_down(&mut self, key: Key, mods: Mods) -> u32 {
        if self.last == Some((key, mods)) {
            self.key_repeat_count += 1;
        } else {
            self.key_repeat_count = 0;
            self.last = Some((key, mods));
        }
        self.key_repeat_count
    }
}

/// Collaborator-derived gates consulted by the shortcut table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutGuards {
    pub key_proc: bool,
    pub video: bool,
    pub controller: bool,
    pub paused: bool,
    pub hid_keyboard: bool,
}

/// What a fired shortcut asks the `InputManager` to do. `Noop` means the
/// event matched a shortcut-table row and must still be swallowed, but a
/// guard blocked the actual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    InjectKeycode { keycode: RemoteKeycode, down: bool },
    Back { down: bool },
    ScreenPowerOff,
    ScreenPowerNormal,
    PauseToggle { hide: bool },
    Rotate270,
    Rotate90,
    Flip0,
    Flip180,
    Copy,
    Cut,
    PasteViaClipboardSync,
    PasteAsTextEvents,
    ToggleFullscreen,
    ResizeToFit,
    ResizeToPixelPerfect,
    ToggleFpsCounter,
    ExpandNotificationPanel,
    ExpandSettingsPanel,
    CollapsePanels,
    RotateDevice,
    OpenHardKeyboardSettings,
    OpenTouchmapFileDialog,
    TurnOffTouchmap,
    Noop,
}

/// Classifies a key event against the shortcut table.
///
/// `repeat_count` is the value `RepeatState::note_down` returned for this
/// combination (0 on the first press of a burst); pass the last known value
/// unchanged for KeyUp events and for OS-repeating KeyDown events, since
/// those never update the counter.
///
/// Note: a bare modifier keypress never matches a table row below, so it
/// always returns `None` and is forwarded like any other key; arming via
/// "the pressed key is itself a configured modifier key" only matters for
/// *other* keys pressed while a modifier from `shortcut_mods` is held, which
/// `mods.intersects_mask` already covers.
pub fn classify(
    key: Key,
    mods: Mods,
    down: bool,
    os_repeat: bool,
    repeat_count: u32,
    shortcut_mods_mask: u16,
    guards: ShortcutGuards,
) -> Option<ShortcutAction> {
    let armed = mods.intersects_mask(shortcut_mods_mask) || key.is_shortcut_mod_key();
    if !armed {
        return None;
    }
    let shift = mods.shift();
    let not_repeat = !os_repeat;

    let guarded = |ok: bool, action: ShortcutAction| -> Option<ShortcutAction> {
        Some(if ok { action } else { ShortcutAction::Noop })
    };

    match key {
        Key::H => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::InjectKeycode { keycode: RemoteKeycode::Home, down },
        ),
        Key::B | Key::Backspace => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::Back { down },
        ),
        Key::S => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::InjectKeycode { keycode: RemoteKeycode::AppSwitch, down },
        ),
        Key::M => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::InjectKeycode { keycode: RemoteKeycode::Menu, down },
        ),
        Key::P => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::InjectKeycode { keycode: RemoteKeycode::Power, down },
        ),
        Key::O if down => guarded(
            guards.controller && not_repeat && !guards.paused,
            if shift {
                ShortcutAction::ScreenPowerNormal
            } else {
                ShortcutAction::ScreenPowerOff
            },
        ),
        Key::O => Some(ShortcutAction::Noop),
        Key::Z if down => guarded(
            guards.video && not_repeat,
            ShortcutAction::PauseToggle { hide: !shift },
        ),
        Key::Z => Some(ShortcutAction::Noop),
        Key::Down => guarded(
            guards.key_proc || guards.video,
            if shift {
                ShortcutAction::Flip180
            } else {
                ShortcutAction::InjectKeycode { keycode: RemoteKeycode::VolumeDown, down }
            },
        ),
        Key::Up => guarded(
            guards.key_proc || guards.video,
            if shift {
                ShortcutAction::Flip180
            } else {
                ShortcutAction::InjectKeycode { keycode: RemoteKeycode::VolumeUp, down }
            },
        ),
        Key::Left if down => guarded(
            guards.video && not_repeat,
            if shift { ShortcutAction::Flip0 } else { ShortcutAction::Rotate270 },
        ),
        Key::Left => Some(ShortcutAction::Noop),
        Key::Right if down => guarded(
            guards.video && not_repeat,
            if shift { ShortcutAction::Flip0 } else { ShortcutAction::Rotate90 },
        ),
        Key::Right => Some(ShortcutAction::Noop),
        Key::C if down => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::Copy,
        ),
        Key::C => Some(ShortcutAction::Noop),
        Key::X if down => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            ShortcutAction::Cut,
        ),
        Key::X => Some(ShortcutAction::Noop),
        Key::V if down => guarded(
            guards.key_proc && not_repeat && !guards.paused,
            if shift {
                ShortcutAction::PasteAsTextEvents
            } else {
                ShortcutAction::PasteViaClipboardSync
            },
        ),
        Key::V => Some(ShortcutAction::Noop),
        Key::F if down => guarded(guards.video && not_repeat, ShortcutAction::ToggleFullscreen),
        Key::F => Some(ShortcutAction::Noop),
        Key::W if down => guarded(guards.video && not_repeat, ShortcutAction::ResizeToFit),
        Key::W => Some(ShortcutAction::Noop),
        Key::G if down => guarded(guards.video && not_repeat, ShortcutAction::ResizeToPixelPerfect),
        Key::G => Some(ShortcutAction::Noop),
        Key::I if down => guarded(guards.video && not_repeat, ShortcutAction::ToggleFpsCounter),
        Key::I => Some(ShortcutAction::Noop),
        Key::N if down => guarded(
            guards.controller && not_repeat && !guards.paused,
            if shift {
                ShortcutAction::CollapsePanels
            } else if repeat_count == 0 {
                ShortcutAction::ExpandNotificationPanel
            } else {
                ShortcutAction::ExpandSettingsPanel
            },
        ),
        Key::N => Some(ShortcutAction::Noop),
        Key::R if down => guarded(
            guards.controller && not_repeat && !guards.paused,
            ShortcutAction::RotateDevice,
        ),
        Key::R => Some(ShortcutAction::Noop),
        Key::K if down => guarded(
            guards.controller && guards.hid_keyboard && not_repeat && !guards.paused,
            ShortcutAction::OpenHardKeyboardSettings,
        ),
        Key::K => Some(ShortcutAction::Noop),
        Key::T if down => guarded(
            guards.controller && !guards.paused && guards.key_proc,
            if shift {
                ShortcutAction::TurnOffTouchmap
            } else {
                ShortcutAction::OpenTouchmapFileDialog
            },
        ),
        Key::T => Some(ShortcutAction::Noop),
        _ => None,
    }
}
