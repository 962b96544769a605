//! The input dispatcher: `InputManager` owns every piece of process-lived
//! input state and is the crate's single entry point, `handle_event`.

use crate::collaborators::{ClipboardService, Controller, FileDialog, KeyProcessor, MouseProcessor};
use crate::config::{InputManagerConfig, MouseBinding, VIRTUAL_FINGER, VIRTUAL_MOUSE};
use crate::event::{
    ControlMessage, ControllerDeviceChange, InputEvent, MouseButton as EvMouseButton,
    RemoteKeycode, ScreenPowerMode, TOUCH_MOUSEID,
};
use crate::geometry::{Point, Size};
use crate::keys::Key;
use crate::modifiers::Mods;
use crate::shortcuts::{self, RepeatState, ShortcutAction, ShortcutGuards};
use crate::touchmap::gamepad::{self, ControllerSlots};
use crate::touchmap::{Touchmap, loader};
use crate::collaborators::ScreenService;

/// Maximum payload length for a single `INJECT_TEXT` message.
pub const MAX_INJECT_TEXT_LENGTH: usize = 300;

/// Process-lived input-manager state.
pub struct InputManager {
    pub config: InputManagerConfig,
    controller: Option<Box<dyn Controller>>,
    key_proc: Option<KeyProcessor>,
    mouse_proc: Option<MouseProcessor>,
    screen: Box<dyn ScreenService>,
    file_pusher: Option<Box<dyn crate::collaborators::FilePusher>>,
    clipboard: Option<Box<dyn ClipboardService>>,
    file_dialog: Option<Box<dyn FileDialog>>,

    current_mods: Mods,
    repeat: RepeatState,
    next_sequence: u64,

    vfinger: crate::vfinger::VirtualFinger,

    game_controllers: ControllerSlots,
    game_touchmap: Option<Touchmap>,
}

impl InputManager {
    pub fn new(config: InputManagerConfig, screen: Box<dyn ScreenService>) -> Self {
        let mut manager = Self {
            config,
            controller: None,
            key_proc: None,
            mouse_proc: None,
            screen,
            file_pusher: None,
            clipboard: None,
            file_dialog: None,
            current_mods: Mods::EMPTY,
            repeat: RepeatState::new(),
            // 0 is reserved as SEQUENCE_INVALID; the first real sequence
            // number is 1.
            next_sequence: 1,
            vfinger: crate::vfinger::VirtualFinger::default(),
            game_controllers: ControllerSlots::new(),
            game_touchmap: None,
        };
        if let Some(path) = manager.config.touchmap_file.clone() {
            manager.load_touchmap(&path);
        }
        manager
    }

    pub fn set_controller(&mut self, controller: Box<dyn Controller>) {
        self.controller = Some(controller);
    }

    pub fn set_key_processor(&mut self, key_proc: KeyProcessor) {
        self.key_proc = Some(key_proc);
    }

    pub fn set_mouse_processor(&mut self, mouse_proc: MouseProcessor) {
        self.mouse_proc = Some(mouse_proc);
    }

    pub fn set_file_pusher(&mut self, file_pusher: Box<dyn crate::collaborators::FilePusher>) {
        self.file_pusher = Some(file_pusher);
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardService>) {
        self.clipboard = Some(clipboard);
    }

    pub fn set_file_dialog(&mut self, file_dialog: Box<dyn FileDialog>) {
        self.file_dialog = Some(file_dialog);
    }

    pub fn game_touchmap(&self) -> Option<&Touchmap> {
        self.game_touchmap.as_ref()
    }

    fn controller_ref(&self) -> Option<&dyn Controller> {
        self.controller.as_deref()
    }

    fn push(&self, msg: ControlMessage) -> bool {
        match &self.controller {
            Some(c) => {
                let ok = c.push(msg);
                if !ok {
                    tracing::warn!("outbound queue full, dropping control message");
                }
                ok
            }
            None => false,
        }
    }

    fn pointer_id(&self) -> u64 {
        if self.config.has_secondary_click() {
            VIRTUAL_MOUSE
        } else {
            VIRTUAL_FINGER
        }
    }

    /// Total over the inbound event taxonomy. Never blocks beyond O(1)
    /// work, except the file dialog the "t" shortcut may explicitly invoke.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::TextInput { text } => self.handle_text_input(&text),
            InputEvent::KeyDown { key, keycode, scancode, mods, repeat } => {
                self.handle_key_down(key, keycode, scancode, mods, repeat)
            }
            InputEvent::KeyUp { key, keycode, scancode, mods } => {
                self.handle_key_up(key, keycode, scancode, mods)
            }
            InputEvent::MouseMotion { x, y, xrel, yrel, state, which } => {
                self.handle_mouse_motion(x, y, xrel, yrel, state, which)
            }
            InputEvent::MouseButton { x, y, button, clicks, pressed, which } => {
                self.handle_mouse_button(x, y, button, clicks, pressed, which)
            }
            InputEvent::MouseWheel { precise_x, precise_y } => {
                self.handle_mouse_wheel(precise_x, precise_y)
            }
            InputEvent::TouchFinger { finger_id, x, y, pressure, phase } => {
                self.handle_touch_finger(finger_id, x, y, pressure, phase)
            }
            InputEvent::DropFile { path } => self.handle_drop_file(path),
            InputEvent::ControllerAxis { which, axis, value } => {
                self.handle_controller_axis(which, axis, value)
            }
            InputEvent::ControllerButton { which, button, pressed } => {
                self.handle_controller_button(which, button, pressed)
            }
            InputEvent::ControllerDevice { which, change } => {
                self.handle_controller_device(which, change)
            }
        }
    }

    fn handle_text_input(&mut self, text: &str) {
        if self.key_proc.is_none() || self.screen.is_paused() {
            return;
        }
        if self.current_mods.intersects_mask(self.config.shortcut_mods) {
            return;
        }
        if let Some(kp) = &mut self.key_proc {
            if let Some(cb) = &mut kp.process_text {
                cb(text);
            }
        }
    }

    fn handle_key_down(&mut self, key: Key, keycode: u32, scancode: u32, mods: Mods, repeat: bool) {
        self.current_mods = mods;

        let repeat_count = if repeat {
            self.repeat.key_repeat_count
        } else {
            self.repeat.note_down(key, mods)
        };

        let guards = ShortcutGuards {
            key_proc: self.key_proc.is_some(),
            video: self.screen.has_video(),
            controller: self.controller.is_some(),
            paused: self.screen.is_paused(),
            hid_keyboard: self.screen.has_hid_keyboard(),
        };

        match shortcuts::classify(
            key,
            mods,
            true,
            repeat,
            repeat_count,
            self.config.shortcut_mods,
            guards,
        ) {
            Some(action) => self.execute_shortcut(action),
            None => {
                if !self.try_clipboard_autosync_paste(key, mods, repeat) {
                    if let Some(kp) = &mut self.key_proc {
                        if let Some(cb) = &mut kp.process_key {
                            cb(key, keycode, scancode, mods, true, repeat);
                        }
                    }
                }
            }
        }
    }

    fn handle_key_up(&mut self, key: Key, keycode: u32, scancode: u32, mods: Mods) {
        self.current_mods = mods;
        let repeat_count = self.repeat.key_repeat_count;

        let guards = ShortcutGuards {
            key_proc: self.key_proc.is_some(),
            video: self.screen.has_video(),
            controller: self.controller.is_some(),
            paused: self.screen.is_paused(),
            hid_keyboard: self.screen.has_hid_keyboard(),
        };

        match shortcuts::classify(
            key,
            mods,
            false,
            false,
            repeat_count,
            self.config.shortcut_mods,
            guards,
        ) {
            Some(action) => self.execute_shortcut(action),
            None => {
                if let Some(kp) = &mut self.key_proc {
                    if let Some(cb) = &mut kp.process_key {
                        cb(key, keycode, scancode, mods, false, false);
                    }
                }
            }
        }
    }

    /// Clipboard autosync path for Ctrl+V: runs only when the shortcut
    /// table itself didn't already classify the keypress, i.e.
    /// `shortcut_mods` wasn't armed by the held modifiers. Returns whether
    /// it handled (swallowed) the event.
    fn try_clipboard_autosync_paste(&mut self, key: Key, mods: Mods, repeat: bool) -> bool {
        if !(self.config.clipboard_autosync
            && mods.ctrl()
            && !mods.shift()
            && key == Key::V
            && !repeat)
        {
            return false;
        }
        if self.config.legacy_paste {
            self.paste_as_text_events();
        } else {
            self.paste_via_clipboard_sync();
        }
        true
    }

    fn execute_shortcut(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::InjectKeycode { keycode, down } => {
                self.push(ControlMessage::InjectKeycode { keycode, down });
            }
            ShortcutAction::Back { down } => {
                self.push(ControlMessage::BackOrScreenOn { down });
            }
            ShortcutAction::ScreenPowerOff => {
                self.push(ControlMessage::SetScreenPowerMode { mode: ScreenPowerMode::Off });
            }
            ShortcutAction::ScreenPowerNormal => {
                self.push(ControlMessage::SetScreenPowerMode { mode: ScreenPowerMode::Normal });
            }
            ShortcutAction::PauseToggle { hide } => {
                let paused = !self.screen.is_paused();
                self.screen.set_paused(paused, hide);
            }
            ShortcutAction::Rotate270 => self.screen.set_orientation(crate::geometry::Orientation::Rot270),
            ShortcutAction::Rotate90 => self.screen.set_orientation(crate::geometry::Orientation::Rot90),
            ShortcutAction::Flip0 => self.screen.set_orientation(crate::geometry::Orientation::Flip0),
            ShortcutAction::Flip180 => self.screen.set_orientation(crate::geometry::Orientation::Flip180),
            ShortcutAction::Copy => {
                self.push(ControlMessage::GetClipboard { copy_key: true });
            }
            ShortcutAction::Cut => {
                self.push(ControlMessage::GetClipboard { copy_key: false });
            }
            ShortcutAction::PasteViaClipboardSync => self.paste_via_clipboard_sync(),
            ShortcutAction::PasteAsTextEvents => self.paste_as_text_events(),
            ShortcutAction::ToggleFullscreen => self.screen.toggle_fullscreen(),
            ShortcutAction::ResizeToFit => self.screen.resize_to_fit(),
            ShortcutAction::ResizeToPixelPerfect => self.screen.resize_to_pixel_perfect(),
            ShortcutAction::ToggleFpsCounter => self.screen.toggle_fps_counter(),
            ShortcutAction::ExpandNotificationPanel => {
                self.push(ControlMessage::ExpandNotificationPanel);
            }
            ShortcutAction::ExpandSettingsPanel => {
                self.push(ControlMessage::ExpandSettingsPanel);
            }
            ShortcutAction::CollapsePanels => {
                self.push(ControlMessage::CollapsePanels);
            }
            ShortcutAction::RotateDevice => {
                self.screen.rotate_device();
                self.push(ControlMessage::RotateDevice);
            }
            ShortcutAction::OpenHardKeyboardSettings => {
                self.push(ControlMessage::OpenHardKeyboardSettings);
            }
            ShortcutAction::OpenTouchmapFileDialog => {
                if let Some(dialog) = &self.file_dialog {
                    if let Some(path) = dialog.pick_touchmap_file() {
                        self.load_touchmap(&path);
                    }
                }
            }
            ShortcutAction::TurnOffTouchmap => {
                self.game_touchmap = None;
            }
            ShortcutAction::Noop => {}
        }
    }

    fn paste_via_clipboard_sync(&mut self) {
        let Some(clipboard) = &self.clipboard else { return };
        let Some(text) = clipboard.read_host_clipboard() else {
            tracing::warn!("clipboard read failed, aborting paste");
            return;
        };
        let sequence = self.next_sequence;
        let pushed = self.push(ControlMessage::SetClipboard { sequence, text, paste: false });
        if !pushed {
            return;
        }
        self.next_sequence += 1;
        if let Some(kp) = &mut self.key_proc {
            if kp.async_paste {
                if let Some(cb) = &mut kp.suspend_paste_until_ack {
                    cb(sequence);
                }
            }
        }
    }

    fn paste_as_text_events(&mut self) {
        let Some(clipboard) = &self.clipboard else { return };
        let Some(text) = clipboard.read_host_clipboard() else {
            tracing::warn!("clipboard read failed, aborting paste");
            return;
        };
        for chunk in chunk_text(&text, MAX_INJECT_TEXT_LENGTH) {
            self.push(ControlMessage::InjectText { text: chunk });
        }
    }

    fn resolve_binding(&self, button: EvMouseButton) -> MouseBinding {
        use crate::config::BindableButton;
        let bindable = match button {
            EvMouseButton::Right => BindableButton::Right,
            EvMouseButton::Middle => BindableButton::Middle,
            EvMouseButton::X1 => BindableButton::X1,
            EvMouseButton::X2 => BindableButton::X2,
            EvMouseButton::Left => return MouseBinding::Click,
        };
        self.config.mouse_bindings[bindable]
    }

    fn push_binding_message(&mut self, binding: MouseBinding) {
        match binding {
            MouseBinding::Back => {
                self.push(ControlMessage::BackOrScreenOn { down: true });
            }
            MouseBinding::Home => {
                self.push(ControlMessage::InjectKeycode { keycode: RemoteKeycode::Home, down: true });
            }
            MouseBinding::AppSwitch => {
                self.push(ControlMessage::InjectKeycode {
                    keycode: RemoteKeycode::AppSwitch,
                    down: true,
                });
            }
            MouseBinding::ExpandNotificationPanel => {
                self.push(ControlMessage::ExpandNotificationPanel);
            }
            MouseBinding::Disabled | MouseBinding::Click => {}
        }
    }

    fn handle_mouse_motion(
        &mut self,
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
        state: crate::event::MouseButtonState,
        which: u32,
    ) {
        if self.mouse_proc.is_none() || self.screen.is_paused() {
            return;
        }
        let relative = self.mouse_proc.as_ref().is_some_and(|m| m.relative_mode);
        if let Some(mp) = &mut self.mouse_proc {
            if let Some(cb) = &mut mp.process_mouse_motion {
                cb(x, y, xrel, yrel, state, which);
            }
        }
        if !relative && self.vfinger.down {
            let pointer_id = self.pointer_id();
            let screen_size = self.screen.frame_size();
            if let Some(controller) = self.controller_ref() {
                self.vfinger.on_motion(pointer_id, screen_size, x, y, controller);
            }
        }
    }

    fn handle_mouse_wheel(&mut self, precise_x: f32, precise_y: f32) {
        if self.mouse_proc.is_none() || self.screen.is_paused() {
            return;
        }
        if let Some(mp) = &mut self.mouse_proc {
            if let Some(cb) = &mut mp.process_mouse_scroll {
                cb(precise_x, precise_y);
            }
        }
    }

    /// Mouse button dispatch, in priority order.
    fn handle_mouse_button(
        &mut self,
        x: i32,
        y: i32,
        button: EvMouseButton,
        clicks: u8,
        pressed: bool,
        which: u32,
    ) {
        if which == TOUCH_MOUSEID {
            return;
        }

        let paused = self.screen.is_paused();
        let has_controller = self.controller.is_some();

        if has_controller && !paused && !self.config.forward_all_clicks && button != EvMouseButton::Left {
            let binding = self.resolve_binding(button);
            match binding {
                MouseBinding::Disabled => return,
                MouseBinding::Click => {}
                special => {
                    if pressed {
                        self.push_binding_message(special);
                    }
                    return;
                }
            }
        }

        let relative = self.mouse_proc.as_ref().is_some_and(|m| m.relative_mode);
        if button == EvMouseButton::Left
            && self.screen.has_video()
            && !relative
            && clicks == 2
            && pressed
        {
            let (win_pos, win_size) = self.screen.window_frame_rect();
            if point_outside_rect(x, y, win_pos, win_size) {
                self.screen.resize_to_fit();
                return;
            }
        }

        if !paused {
            if let Some(mp) = &mut self.mouse_proc {
                if let Some(cb) = &mut mp.process_mouse_click {
                    cb(x, y, button, pressed, clicks, which);
                }
            }
        }

        if button == EvMouseButton::Left {
            let pointer_id = self.pointer_id();
            let screen_size = self.screen.frame_size();
            let mods = self.current_mods;
            if pressed {
                if let Some(controller) = self.controller.as_deref() {
                    self.vfinger.on_left_down(
                        mods, relative, pointer_id, screen_size, x, y, controller,
                    );
                }
            } else if let Some(controller) = self.controller.as_deref() {
                self.vfinger.on_left_up(pointer_id, screen_size, x, y, controller);
            }
        }
    }

    fn handle_touch_finger(
        &mut self,
        finger_id: u64,
        x: f32,
        y: f32,
        pressure: f32,
        phase: crate::event::TouchPhase,
    ) {
        if self.mouse_proc.is_none() || self.screen.is_paused() {
            return;
        }
        if let Some(mp) = &mut self.mouse_proc {
            if let Some(cb) = &mut mp.process_touch {
                cb(finger_id, x, y, pressure, phase);
            }
        }
    }

    fn handle_drop_file(&mut self, path: std::path::PathBuf) {
        if self.controller.is_none() {
            return;
        }
        if let Some(fp) = &self.file_pusher {
            if !fp.push_file(&path) {
                tracing::warn!(?path, "file push failed");
            }
        }
    }

    fn handle_controller_axis(&mut self, which: u32, axis: crate::event::GamepadAxis, value: i16) {
        if self.controller.is_none() {
            return;
        }
        if self.config.forward_game_controllers {
            self.push(ControlMessage::InjectGameControllerAxis { which, axis, value });
            return;
        }
        let Some(map) = &mut self.game_touchmap else { return };
        let screen_size = self.screen.frame_size();
        let Some(controller) = self.controller.as_deref() else { return };
        use crate::event::GamepadAxis::*;
        match axis {
            LeftX | LeftY => gamepad::handle_walk_axis(map, controller, screen_size, axis, value),
            RightX | RightY => {
                gamepad::handle_skill_aim_axis(map, controller, screen_size, axis, value)
            }
            TriggerLeft | TriggerRight => {
                gamepad::handle_trigger_axis(map, controller, screen_size, axis, value)
            }
        }
    }

    fn handle_controller_button(&mut self, which: u32, button: u8, pressed: bool) {
        if self.controller.is_none() {
            return;
        }
        if self.config.forward_game_controllers {
            self.push(ControlMessage::InjectGameControllerButton { which, button, pressed });
            return;
        }
        let Some(map) = &mut self.game_touchmap else { return };
        let screen_size = self.screen.frame_size();
        let Some(controller) = self.controller.as_deref() else { return };
        gamepad::dispatch_button(map, controller, screen_size, button, pressed);
    }

    fn handle_controller_device(&mut self, which: u32, change: ControllerDeviceChange) {
        if self.controller.is_none() {
            return;
        }
        let accepted = match change {
            ControllerDeviceChange::Added => self.game_controllers.add(which),
            ControllerDeviceChange::Removed => self.game_controllers.remove(which),
        };
        if !accepted {
            tracing::warn!(which, ?change, "controller slot overflow or unknown instance, dropping");
            return;
        }
        self.push(gamepad::device_message(which, change));
    }

    /// Parses and validates the file first, replacing the current touchmap
    /// only on success (parse-then-replace, not free-then-parse).
    pub fn load_touchmap(&mut self, path: &std::path::Path) {
        match loader::load_file(path) {
            Ok(map) => {
                tracing::debug!(?path, "loaded touchmap");
                self.game_touchmap = Some(map);
            }
            Err(err) => {
                tracing::error!(?path, %err, "failed to load touchmap, keeping previous one");
            }
        }
    }
}

fn point_outside_rect(x: i32, y: i32, pos: Point, size: Size) -> bool {
    x < pos.x || y < pos.y || x >= pos.x + size.w || y >= pos.y + size.h
}

fn chunk_text(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if current.len() + ch.len_utf8() > max_bytes && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
