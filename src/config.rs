//! Init-time configuration.

use crate::modifiers::{ModBit, mask_of};
use enum_map::Enum;

pub const BASE_FINGER_ID: u64 = 100;
pub const WALK_CONTROL_DEADZONE: i32 = 25;
pub const MAX_GAME_CONTROLLERS: usize = 4;
pub const SEQUENCE_INVALID: u64 = 0;
pub const SINT16_MAX: i32 = i16::MAX as i32;

/// Virtual-pointer IDs, disjoint from every touchmap finger ID and from each
/// other.
pub const VIRTUAL_FINGER: u64 = 1;
pub const VIRTUAL_MOUSE: u64 = 2;

/// A secondary mouse button's behavior. Left is always `Click` and is not
/// representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseBinding {
    Disabled,
    Click,
    Back,
    Home,
    AppSwitch,
    ExpandNotificationPanel,
}

/// The four bindable secondary mouse buttons, used as the key of
/// `mouse_bindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum BindableButton {
    Right,
    Middle,
    X1,
    X2,
}

#[derive(Debug, Clone)]
pub struct InputManagerConfig {
    pub mouse_bindings: enum_map::EnumMap<BindableButton, MouseBinding>,
    /// Bitmask over `{LCTRL, RCTRL, LALT, RALT, LSUPER, RSUPER}`; at least
    /// one must be held to arm a shortcut.
    pub shortcut_mods: u16,
    /// When true, every mouse button (not just left) is forwarded raw to
    /// the mouse processor and `mouse_bindings` is never consulted.
    pub forward_all_clicks: bool,
    pub forward_game_controllers: bool,
    pub legacy_paste: bool,
    pub clipboard_autosync: bool,
    pub touchmap_file: Option<std::path::PathBuf>,
}

impl InputManagerConfig {
    /// True iff any non-left binding is `Click`, which decides whether the
    /// virtual-finger engine uses `VIRTUAL_MOUSE` or `VIRTUAL_FINGER` as its
    /// pointer ID.
    pub fn has_secondary_click(&self) -> bool {
        self.mouse_bindings.values().any(|b| *b == MouseBinding::Click)
    }
}

impl Default for InputManagerConfig {
    fn default() -> Self {
        Self {
            mouse_bindings: enum_map::enum_map! {
                BindableButton::Right => MouseBinding::Back,
                BindableButton::Middle => MouseBinding::Home,
                BindableButton::X1 => MouseBinding::AppSwitch,
                BindableButton::X2 => MouseBinding::ExpandNotificationPanel,
            },
            shortcut_mods: mask_of(&[ModBit::LCtrl, ModBit::RCtrl]),
            forward_all_clicks: false,
            forward_game_controllers: false,
            legacy_paste: false,
            clipboard_autosync: true,
            touchmap_file: None,
        }
    }
}
