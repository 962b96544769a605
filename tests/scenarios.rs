//! End-to-end scenarios driving `InputManager::handle_event` directly,
//! against fake collaborators recording what they were told to do.

use parking_lot::Mutex;
use sc_input_core::collaborators::{
    ClipboardService, Controller, FileDialog, KeyProcessor, MouseProcessor, ScreenService,
};
use sc_input_core::config::InputManagerConfig;
use sc_input_core::event::{ControlMessage, InputEvent, MouseButton, MouseButtonState};
use sc_input_core::geometry::{Orientation, Point, Size};
use sc_input_core::keys::Key;
use sc_input_core::manager::InputManager;
use sc_input_core::modifiers::{ModBit, Mods};
use std::sync::Arc;

#[derive(Default)]
struct RecordingController {
    sent: Mutex<Vec<ControlMessage>>,
}

impl Controller for RecordingController {
    fn push(&self, msg: ControlMessage) -> bool {
        self.sent.lock().push(msg);
        true
    }
}

struct FakeScreen {
    paused: bool,
    video: bool,
    orientation: Orientation,
}

impl Default for FakeScreen {
    fn default() -> Self {
        Self { paused: false, video: true, orientation: Orientation::Rot0 }
    }
}

impl ScreenService for FakeScreen {
    fn frame_size(&self) -> Size {
        Size::new(1080, 1920)
    }
    fn orientation(&self) -> Orientation {
        self.orientation
    }
    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
    fn rotate_device(&mut self) {}
    fn has_video(&self) -> bool {
        self.video
    }
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn set_paused(&mut self, paused: bool, _hide: bool) {
        self.paused = paused;
    }
    fn is_fullscreen(&self) -> bool {
        false
    }
    fn toggle_fullscreen(&mut self) {}
    fn resize_to_fit(&mut self) {}
    fn resize_to_pixel_perfect(&mut self) {}
    fn window_frame_rect(&self) -> (Point, Size) {
        (Point::new(0, 0), Size::new(1080, 1920))
    }
    fn is_fps_counter_active(&self) -> bool {
        false
    }
    fn toggle_fps_counter(&mut self) {}
    fn has_hid_keyboard(&self) -> bool {
        true
    }
}

struct FakeClipboard {
    text: String,
}

impl ClipboardService for FakeClipboard {
    fn read_host_clipboard(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

struct FakeDialog {
    path: std::path::PathBuf,
}

impl FileDialog for FakeDialog {
    fn pick_touchmap_file(&self) -> Option<std::path::PathBuf> {
        Some(self.path.clone())
    }
}

fn manager_with_controller() -> (InputManager, Arc<RecordingController>) {
    let controller = Arc::new(RecordingController::default());
    let screen = Box::new(FakeScreen::default());
    let mut manager = InputManager::new(InputManagerConfig::default(), screen);
    manager.set_controller(Box::new(controller.clone()));
    manager.set_key_processor(KeyProcessor::default());
    manager.set_mouse_processor(MouseProcessor::default());
    (manager, controller)
}

impl Controller for Arc<RecordingController> {
    fn push(&self, msg: ControlMessage) -> bool {
        self.as_ref().push(msg)
    }
}

#[test]
fn home_shortcut_injects_paired_down_and_up() {
    let (mut manager, controller) = manager_with_controller();
    let mods = Mods::EMPTY.with(ModBit::LCtrl);

    manager.handle_event(InputEvent::KeyDown {
        key: Key::H,
        keycode: 0,
        scancode: 0,
        mods,
        repeat: false,
    });
    manager.handle_event(InputEvent::KeyUp { key: Key::H, keycode: 0, scancode: 0, mods });

    let sent = controller.sent.lock();
    assert_eq!(sent.len(), 2);
    assert!(matches!(
        sent[0],
        ControlMessage::InjectKeycode { down: true, .. }
    ));
    assert!(matches!(
        sent[1],
        ControlMessage::InjectKeycode { down: false, .. }
    ));
}

#[test]
fn non_shortcut_key_is_forwarded_to_key_processor_not_the_controller() {
    let controller = Arc::new(RecordingController::default());
    let screen = Box::new(FakeScreen::default());
    let mut manager = InputManager::new(InputManagerConfig::default(), screen);
    manager.set_controller(Box::new(controller.clone()));

    let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_cb = seen.clone();
    manager.set_key_processor(KeyProcessor {
        process_key: Some(Box::new(move |_key, keycode, _scancode, _mods, _down, _repeat| {
            seen_cb.lock().push(keycode);
        })),
        ..Default::default()
    });

    manager.handle_event(InputEvent::KeyDown {
        key: Key::Other(65),
        keycode: 65,
        scancode: 65,
        mods: Mods::EMPTY,
        repeat: false,
    });

    assert_eq!(*seen.lock(), vec![65]);
    assert!(controller.sent.lock().is_empty());
}

#[test]
fn paused_screen_swallows_mouse_clicks() {
    let controller = Arc::new(RecordingController::default());
    let mut screen = FakeScreen::default();
    screen.paused = true;
    let mut manager = InputManager::new(InputManagerConfig::default(), Box::new(screen));
    manager.set_controller(Box::new(controller.clone()));

    let clicked: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
    let clicked_cb = clicked.clone();
    manager.set_mouse_processor(MouseProcessor {
        process_mouse_click: Some(Box::new(move |_x, _y, _button, _down, _clicks, _which| {
            *clicked_cb.lock() += 1;
        })),
        ..Default::default()
    });

    manager.handle_event(InputEvent::MouseButton {
        x: 10,
        y: 10,
        button: MouseButton::Left,
        clicks: 1,
        pressed: true,
        which: 0,
    });

    assert_eq!(*clicked.lock(), 0);
}

#[test]
fn ctrl_pinch_gesture_emits_reflected_virtual_finger_touch() {
    let (mut manager, controller) = manager_with_controller();
    let mods = Mods::EMPTY.with(ModBit::LCtrl);

    manager.handle_event(InputEvent::MouseButton {
        x: 200,
        y: 300,
        button: MouseButton::Left,
        clicks: 1,
        pressed: true,
        which: 0,
    });
    // current_mods is only updated by key events; drive the same mods via a
    // key event first so the virtual-finger down check sees Ctrl held.
    manager.handle_event(InputEvent::KeyDown {
        key: Key::LCtrl,
        keycode: 0,
        scancode: 0,
        mods,
        repeat: false,
    });
    manager.handle_event(InputEvent::MouseButton {
        x: 200,
        y: 300,
        button: MouseButton::Left,
        clicks: 1,
        pressed: true,
        which: 0,
    });
    manager.handle_event(InputEvent::MouseMotion {
        x: 250,
        y: 300,
        xrel: 50,
        yrel: 0,
        state: MouseButtonState(MouseButtonState::LEFT),
        which: 0,
    });
    manager.handle_event(InputEvent::MouseButton {
        x: 250,
        y: 300,
        button: MouseButton::Left,
        clicks: 1,
        pressed: false,
        which: 0,
    });

    let sent = controller.sent.lock();
    let touches: Vec<_> = sent
        .iter()
        .filter(|m| matches!(m, ControlMessage::InjectTouchEvent { .. }))
        .collect();
    // First left-down (no modifier held yet) is a no-op; the second
    // left-down (with Ctrl held) starts the virtual finger and produces a
    // down/move/up triple.
    assert_eq!(touches.len(), 3);
}

#[test]
fn notification_panel_cycles_then_collapses() {
    let (mut manager, controller) = manager_with_controller();
    let mods = Mods::EMPTY.with(ModBit::LCtrl);

    manager.handle_event(InputEvent::KeyDown {
        key: Key::N,
        keycode: 0,
        scancode: 0,
        mods,
        repeat: false,
    });
    manager.handle_event(InputEvent::KeyUp { key: Key::N, keycode: 0, scancode: 0, mods });
    manager.handle_event(InputEvent::KeyDown {
        key: Key::N,
        keycode: 0,
        scancode: 0,
        mods,
        repeat: false,
    });
    manager.handle_event(InputEvent::KeyUp { key: Key::N, keycode: 0, scancode: 0, mods });

    let shift_mods = mods.with(ModBit::Shift);
    manager.handle_event(InputEvent::KeyDown {
        key: Key::N,
        keycode: 0,
        scancode: 0,
        mods: shift_mods,
        repeat: false,
    });

    let sent = controller.sent.lock();
    assert!(matches!(sent[0], ControlMessage::ExpandNotificationPanel));
    assert!(matches!(sent[1], ControlMessage::ExpandSettingsPanel));
    assert!(matches!(sent[2], ControlMessage::CollapsePanels));
}

#[test]
fn clipboard_autosync_paste_reads_host_clipboard_and_sets_remote_clipboard() {
    let (mut manager, controller) = manager_with_controller();
    manager.set_clipboard(Box::new(FakeClipboard { text: "hello".to_string() }));

    manager.handle_event(InputEvent::KeyDown {
        key: Key::V,
        keycode: 0,
        scancode: 0,
        mods: Mods::EMPTY.with(ModBit::LCtrl),
        repeat: false,
    });

    let sent = controller.sent.lock();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        ControlMessage::SetClipboard { text, paste, .. } => {
            assert_eq!(text, "hello");
            assert!(!paste);
        }
        other => panic!("expected SetClipboard, got {other:?}"),
    }
}

#[test]
fn touchmap_file_dialog_loads_and_can_be_turned_off() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("sc-input-core-test-touchmap-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"mappings": {"walk_control": {"center": {"x": 100, "y": 200}, "radius": 50}}}"#,
    )
    .unwrap();

    let (mut manager, _controller) = manager_with_controller();
    manager.set_file_dialog(Box::new(FakeDialog { path: path.clone() }));

    manager.handle_event(InputEvent::KeyDown {
        key: Key::T,
        keycode: 0,
        scancode: 0,
        mods: Mods::EMPTY.with(ModBit::LCtrl),
        repeat: false,
    });
    assert!(manager.game_touchmap().is_some());

    manager.handle_event(InputEvent::KeyDown {
        key: Key::T,
        keycode: 0,
        scancode: 0,
        mods: Mods::EMPTY.with(ModBit::LCtrl).with(ModBit::Shift),
        repeat: false,
    });
    assert!(manager.game_touchmap().is_none());

    let _ = std::fs::remove_file(&path);
}
