//! Thin contracts to this crate's collaborators: the outbound transport, the
//! screen/window service, the optional key/mouse processors, the file
//! pusher and the clipboard. None of these are implemented here — this
//! module only pins down the shape the core depends on.
//!
//! `KeyProcessor`/`MouseProcessor` use a capability-struct shape rather than
//! an "ops table" trait: every callback is optional, and the dispatcher
//! checks presence before delegating (`is_some()`).

use crate::event::{ControlMessage, MouseButtonState, TouchPhase};
use crate::geometry::{Orientation, Point, Size};
use crate::keys::Key;
use crate::modifiers::Mods;
use std::path::Path;

/// The outbound control-message transport: a non-blocking bounded queue.
/// `push` mirrors `crossbeam_channel::Sender::try_send` semantics —
/// `false`/an error means backpressure, and the caller (this crate) logs
/// and drops rather than blocking.
pub trait Controller {
    fn push(&self, msg: ControlMessage) -> bool;
}

impl Controller for crossbeam_channel::Sender<ControlMessage> {
    fn push(&self, msg: ControlMessage) -> bool {
        self.try_send(msg).is_ok()
    }
}

/// The screen/window service: frame/orientation state, pause and
/// fullscreen toggles, the FPS counter, and window<->frame coordinate
/// conversion.
pub trait ScreenService {
    fn frame_size(&self) -> Size;
    fn orientation(&self) -> Orientation;
    fn set_orientation(&mut self, orientation: Orientation);
    fn rotate_device(&mut self);

    /// True while the screen is actively displaying video; several
    /// shortcuts are only meaningful once a frame is on screen.
    fn has_video(&self) -> bool;

    fn is_paused(&self) -> bool;
    /// `hide`: whether pausing should also hide the rendered frame.
    fn set_paused(&mut self, paused: bool, hide: bool);

    fn is_fullscreen(&self) -> bool;
    fn toggle_fullscreen(&mut self);

    fn resize_to_fit(&mut self);
    fn resize_to_pixel_perfect(&mut self);

    /// The rendered frame's rect within the window, for the double-click
    /// resize-to-fit check.
    fn window_frame_rect(&self) -> (Point, Size);

    fn is_fps_counter_active(&self) -> bool;
    fn toggle_fps_counter(&mut self);

    /// Whether a hardware keyboard (HID) is attached to the remote device.
    fn has_hid_keyboard(&self) -> bool;
}

/// Optional key-input processor. Absence of a capability silently disables
/// the corresponding path.
#[derive(Default)]
pub struct KeyProcessor {
    pub process_key: Option<Box<dyn FnMut(Key, u32, u32, Mods, bool, bool) + Send>>,
    pub process_text: Option<Box<dyn FnMut(&str) + Send>>,
    /// Whether this processor can suspend a pending Ctrl+V injection until
    /// the device ACKs a clipboard sequence.
    pub async_paste: bool,
    pub suspend_paste_until_ack: Option<Box<dyn FnMut(u64) + Send>>,
}

impl KeyProcessor {
    pub fn has_process_key(&self) -> bool {
        self.process_key.is_some()
    }

    pub fn has_process_text(&self) -> bool {
        self.process_text.is_some()
    }
}

/// Optional mouse/touch-input processor.
#[derive(Default)]
pub struct MouseProcessor {
    pub process_mouse_motion:
        Option<Box<dyn FnMut(i32, i32, i32, i32, MouseButtonState, u32) + Send>>,
    pub process_mouse_click:
        Option<Box<dyn FnMut(i32, i32, crate::event::MouseButton, bool, u8, u32) + Send>>,
    pub process_mouse_scroll: Option<Box<dyn FnMut(f32, f32) + Send>>,
    pub process_touch: Option<Box<dyn FnMut(u64, f32, f32, f32, TouchPhase) + Send>>,
    /// Only deltas are meaningful while true; the virtual-finger engine is
    /// disabled entirely in this mode.
    pub relative_mode: bool,
}

impl MouseProcessor {
    pub fn has_motion(&self) -> bool {
        self.process_mouse_motion.is_some()
    }

    pub fn has_click(&self) -> bool {
        self.process_mouse_click.is_some()
    }

    pub fn has_scroll(&self) -> bool {
        self.process_mouse_scroll.is_some()
    }

    pub fn has_touch(&self) -> bool {
        self.process_touch.is_some()
    }
}

/// Drag-and-drop file push; only invoked while a controller is attached.
pub trait FilePusher {
    fn push_file(&self, path: &Path) -> bool;
}

/// Host clipboard access, used by the Ctrl+V autosync path.
pub trait ClipboardService {
    fn read_host_clipboard(&self) -> Option<String>;
}

/// The file-open dialog the "t" shortcut invokes to pick a touchmap file.
/// Blocks the event thread while open, which is acceptable since it is
/// user-initiated.
pub trait FileDialog {
    fn pick_touchmap_file(&self) -> Option<std::path::PathBuf>;
}
