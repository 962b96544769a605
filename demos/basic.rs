//! Minimal wiring demo: feeds a handful of synthetic input events through
//! `InputManager` against stub collaborators and prints the resulting
//! control messages, the way `examples/listen.rs` prints raw key events.

use sc_input_core::collaborators::{KeyProcessor, MouseProcessor, ScreenService};
use sc_input_core::config::InputManagerConfig;
use sc_input_core::event::InputEvent;
use sc_input_core::geometry::{Orientation, Point, Size};
use sc_input_core::keys::Key;
use sc_input_core::manager::InputManager;
use sc_input_core::modifiers::{ModBit, Mods};

struct StubScreen {
    paused: bool,
    orientation: Orientation,
    fullscreen: bool,
    fps_counter: bool,
}

impl ScreenService for StubScreen {
    fn frame_size(&self) -> Size {
        Size::new(1080, 1920)
    }
    fn orientation(&self) -> Orientation {
        self.orientation
    }
    fn set_orientation(&mut self, orientation: Orientation) {
        println!("orientation -> {orientation:?}");
        self.orientation = orientation;
    }
    fn rotate_device(&mut self) {
        println!("rotate device");
    }
    fn has_video(&self) -> bool {
        true
    }
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn set_paused(&mut self, paused: bool, hide: bool) {
        println!("paused -> {paused} (hide={hide})");
        self.paused = paused;
    }
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        println!("fullscreen -> {}", self.fullscreen);
    }
    fn resize_to_fit(&mut self) {
        println!("resize to fit");
    }
    fn resize_to_pixel_perfect(&mut self) {
        println!("resize to pixel-perfect");
    }
    fn window_frame_rect(&self) -> (Point, Size) {
        (Point::new(0, 0), Size::new(1080, 1920))
    }
    fn is_fps_counter_active(&self) -> bool {
        self.fps_counter
    }
    fn toggle_fps_counter(&mut self) {
        self.fps_counter = !self.fps_counter;
        println!("fps counter -> {}", self.fps_counter);
    }
    fn has_hid_keyboard(&self) -> bool {
        false
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let (tx, rx) = crossbeam_channel::bounded(64);

    let screen = Box::new(StubScreen {
        paused: false,
        orientation: Orientation::Rot0,
        fullscreen: false,
        fps_counter: false,
    });
    let mut manager = InputManager::new(InputManagerConfig::default(), screen);
    manager.set_controller(Box::new(tx));
    manager.set_key_processor(KeyProcessor {
        process_key: Some(Box::new(|key, keycode, _scancode, _mods, down, _repeat| {
            println!("key {key:?} ({keycode}) down={down}");
        })),
        ..Default::default()
    });
    manager.set_mouse_processor(MouseProcessor {
        process_mouse_click: Some(Box::new(|x, y, button, down, clicks, _which| {
            println!("click {button:?} at ({x},{y}) down={down} clicks={clicks}");
        })),
        ..Default::default()
    });

    manager.handle_event(InputEvent::KeyDown {
        key: Key::H,
        keycode: 0,
        scancode: 0,
        mods: Mods::EMPTY.with(ModBit::LCtrl),
        repeat: false,
    });
    manager.handle_event(InputEvent::KeyUp {
        key: Key::H,
        keycode: 0,
        scancode: 0,
        mods: Mods::EMPTY.with(ModBit::LCtrl),
    });
    manager.handle_event(InputEvent::KeyDown {
        key: Key::Other(42),
        keycode: 42,
        scancode: 42,
        mods: Mods::EMPTY,
        repeat: false,
    });

    drop(manager);
    while let Ok(msg) = rx.try_recv() {
        println!("-> {msg:?}");
    }
}
