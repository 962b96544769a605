//! The inbound/outbound tagged unions at the core's boundary. The payload
//! here is already-decoded host input, not wire bytes — decoding host
//! events and encoding outbound messages both happen outside this crate.

use crate::geometry::{Point, Size};
use crate::keys::Key;
use crate::modifiers::Mods;
use std::path::PathBuf;

/// A host-side mouse button identity (left is always `Click`, the rest are
/// remapped through `mouse_bindings`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// Bitmask of currently-pressed mouse buttons, carried on motion events so
/// drag gestures can be reconstructed by the mouse processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtonState(pub u8);

impl MouseButtonState {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const MIDDLE: u8 = 1 << 2;
    pub const X1: u8 = 1 << 3;
    pub const X2: u8 = 1 << 4;

    pub fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }
}

/// Phase of a touch-finger event, as delivered by the host event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancelled,
}

/// Gamepad analog axis identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// Whether a controller was plugged in or unplugged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerDeviceChange {
    Added,
    Removed,
}

/// Inbound host event. `InputManager::handle_event` is total over this
/// enum.
#[derive(Debug, Clone)]
pub enum InputEvent {
    TextInput {
        text: String,
    },
    KeyDown {
        key: Key,
        keycode: u32,
        scancode: u32,
        mods: Mods,
        repeat: bool,
    },
    KeyUp {
        key: Key,
        keycode: u32,
        scancode: u32,
        mods: Mods,
    },
    MouseMotion {
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
        state: MouseButtonState,
        which: u32,
    },
    MouseButton {
        x: i32,
        y: i32,
        button: MouseButton,
        clicks: u8,
        pressed: bool,
        which: u32,
    },
    MouseWheel {
        precise_x: f32,
        precise_y: f32,
    },
    TouchFinger {
        finger_id: u64,
        /// Normalized to [0, 1] over the drawable surface.
        x: f32,
        y: f32,
        pressure: f32,
        phase: TouchPhase,
    },
    DropFile {
        path: PathBuf,
    },
    ControllerAxis {
        which: u32,
        axis: GamepadAxis,
        value: i16,
    },
    ControllerButton {
        which: u32,
        button: u8,
        pressed: bool,
    },
    ControllerDevice {
        which: u32,
        change: ControllerDeviceChange,
    },
}

/// A host mouse event is "synthetic" (produced by the OS touch-to-mouse
/// translation layer) when it carries this identifier. These are ignored —
/// the core has its own touch handling.
pub const TOUCH_MOUSEID: u32 = u32::MAX;

/// Which remote key to inject via `ControlMessage::InjectKeycode`. Distinct
/// from `Key` (the host keyboard vocabulary): this is the remote device's
/// own keycode space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKeycode {
    Home,
    Menu,
    Power,
    AppSwitch,
    VolumeDown,
    VolumeUp,
}

/// `SET_SCREEN_POWER_MODE` payload, set by the "o" shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPowerMode {
    Off,
    Normal,
}

/// `INJECT_TOUCH_EVENT` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// Which physical action triggered a touch message, used for
/// `action_button` when a touch is driven by a mouse click rather than a
/// real finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionButtons(pub u8);

/// Outbound control message. Pushed to the `Controller` collaborator's
/// bounded queue; never blocks.
#[derive(Debug, Clone)]
pub enum ControlMessage {
    InjectKeycode {
        keycode: RemoteKeycode,
        down: bool,
    },
    BackOrScreenOn {
        down: bool,
    },
    ExpandNotificationPanel,
    ExpandSettingsPanel,
    CollapsePanels,
    GetClipboard {
        copy_key: bool,
    },
    SetClipboard {
        sequence: u64,
        text: String,
        paste: bool,
    },
    SetScreenPowerMode {
        mode: ScreenPowerMode,
    },
    InjectText {
        text: String,
    },
    InjectTouchEvent {
        action: TouchAction,
        screen_size: Size,
        point: Point,
        pointer_id: u64,
        pressure: f32,
        action_button: ActionButtons,
        buttons: ActionButtons,
    },
    RotateDevice,
    OpenHardKeyboardSettings,
    InjectGameControllerAxis {
        which: u32,
        axis: GamepadAxis,
        value: i16,
    },
    InjectGameControllerButton {
        which: u32,
        button: u8,
        pressed: bool,
    },
    InjectGameControllerDevice {
        which: u32,
        change: ControllerDeviceChange,
    },
}
