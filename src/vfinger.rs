//! Virtual-finger engine: synthesizes a second touch pointer from a single
//! mouse + modifier combination, so a two-finger gesture (pinch, rotate,
//! tilt) can be driven from a one-button mouse.

use crate::collaborators::Controller;
use crate::event::{ActionButtons, ControlMessage, TouchAction};
use crate::geometry::{Size, point_reflect};
use crate::modifiers::Mods;

/// State owned by the `InputManager`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualFinger {
    pub down: bool,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl VirtualFinger {
    /// Called on `LEFT_DOWN`. Activates only while exactly one of Ctrl or
    /// Shift is held, not already down, and the mouse processor isn't in
    /// relative mode.
    pub fn on_left_down(
        &mut self,
        mods: Mods,
        relative_mode: bool,
        pointer_id: u64,
        screen: Size,
        x: i32,
        y: i32,
        controller: &dyn Controller,
    ) -> bool {
        if relative_mode || self.down {
            return false;
        }
        let ctrl = mods.ctrl();
        let shift = mods.shift();
        if ctrl == shift {
            // Neither or both held: exactly one is required.
            return false;
        }

        self.invert_x = ctrl || shift;
        self.invert_y = ctrl;
        self.down = true;

        let reflected = point_reflect(
            crate::geometry::Point::new(x, y),
            screen.w,
            screen.h,
            self.invert_x,
            self.invert_y,
        );
        push_touch(controller, screen, TouchAction::Down, reflected, pointer_id);
        true
    }

    /// Called on mouse motion while the virtual finger is down.
    pub fn on_motion(
        &self,
        pointer_id: u64,
        screen: Size,
        x: i32,
        y: i32,
        controller: &dyn Controller,
    ) {
        if !self.down {
            return;
        }
        let reflected = point_reflect(
            crate::geometry::Point::new(x, y),
            screen.w,
            screen.h,
            self.invert_x,
            self.invert_y,
        );
        push_touch(controller, screen, TouchAction::Move, reflected, pointer_id);
    }

    /// Called on `LEFT_UP`. Releases regardless of the modifier state at
    /// release time.
    pub fn on_left_up(
        &mut self,
        pointer_id: u64,
        screen: Size,
        x: i32,
        y: i32,
        controller: &dyn Controller,
    ) {
        if !self.down {
            return;
        }
        self.down = false;
        let reflected = point_reflect(
            crate::geometry::Point::new(x, y),
            screen.w,
            screen.h,
            self.invert_x,
            self.invert_y,
        );
        push_touch(controller, screen, TouchAction::Up, reflected, pointer_id);
    }
}

fn push_touch(
    controller: &dyn Controller,
    screen: Size,
    action: TouchAction,
    point: crate::geometry::Point,
    pointer_id: u64,
) {
    let ok = controller.push(ControlMessage::InjectTouchEvent {
        action,
        screen_size: screen,
        point,
        pointer_id,
        pressure: if matches!(action, TouchAction::Up) { 0.0 } else { 1.0 },
        action_button: ActionButtons::default(),
        buttons: ActionButtons::default(),
    });
    if !ok {
        tracing::warn!(pointer_id, "outbound queue full, dropping virtual-finger event");
    }
}
