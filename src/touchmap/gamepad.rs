//! Gamepad touchmap engine: axis/button dispatch that drives virtual touch
//! pointers reproducing the intended gesture. A small state struct per
//! logical touch point, updated from translated input and flushed as
//! discrete down/move/up events.

use crate::collaborators::Controller;
use crate::config::{MAX_GAME_CONTROLLERS, SINT16_MAX, WALK_CONTROL_DEADZONE};
use crate::event::{
    ActionButtons, ControlMessage, ControllerDeviceChange, GamepadAxis, TouchAction,
};
use crate::geometry::{Point, Size};
use crate::touchmap::Touchmap;
use crate::touchmap::loader::MAX_BUTTON;

fn dist_sq(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

fn emit_touch(
    controller: &dyn Controller,
    screen_size: Size,
    action: TouchAction,
    point: Point,
    pointer_id: u64,
) {
    let ok = controller.push(ControlMessage::InjectTouchEvent {
        action,
        screen_size,
        point,
        pointer_id,
        pressure: if matches!(action, TouchAction::Up) {
            0.0
        } else {
            1.0
        },
        action_button: ActionButtons::default(),
        buttons: ActionButtons::default(),
    });
    if !ok {
        tracing::warn!(pointer_id, "outbound queue full, dropping touch event");
    }
}

/// Updates the walk control's `X` or `Y` component from a `LEFTX`/`LEFTY`
/// axis event and emits the resulting down/move/up messages.
pub fn handle_walk_axis(
    touchmap: &mut Touchmap,
    controller: &dyn Controller,
    screen_size: Size,
    axis: GamepadAxis,
    value: i16,
) {
    let walk = &mut touchmap.walk;
    let delta = value as i64 * walk.radius as i64 / SINT16_MAX as i64;
    match axis {
        GamepadAxis::LeftX => walk.current_pos.x = walk.center.x + delta as i32,
        GamepadAxis::LeftY => walk.current_pos.y = walk.center.y + delta as i32,
        _ => {
            tracing::warn!(?axis, "handle_walk_axis called with a non-walk axis");
            return;
        }
    }

    let d2 = dist_sq(walk.current_pos, walk.center);
    if d2 < WALK_CONTROL_DEADZONE as i64 {
        if walk.touch_down {
            walk.touch_down = false;
            let finger_id = walk.finger_id;
            let center = walk.center;
            emit_touch(controller, screen_size, TouchAction::Up, center, finger_id);
        }
    } else {
        if !walk.touch_down {
            walk.touch_down = true;
            let finger_id = walk.finger_id;
            let center = walk.center;
            emit_touch(controller, screen_size, TouchAction::Down, center, finger_id);
        }
        let finger_id = walk.finger_id;
        let pos = walk.current_pos;
        emit_touch(controller, screen_size, TouchAction::Move, pos, finger_id);
    }
}

/// Updates the aim position of every currently-held skill button from a
/// `RIGHTX`/`RIGHTY` axis event: hold to aim, release to fire at the
/// current aimed direction.
pub fn handle_skill_aim_axis(
    touchmap: &mut Touchmap,
    controller: &dyn Controller,
    screen_size: Size,
    axis: GamepadAxis,
    value: i16,
) {
    for button in touchmap.buttons.iter_mut().filter(|b| b.is_skill && b.touch_down) {
        let delta = value as i64 * button.radius as i64 / SINT16_MAX as i64;
        match axis {
            GamepadAxis::RightX => button.current_pos.x = button.center.x + delta as i32,
            GamepadAxis::RightY => button.current_pos.y = button.center.y + delta as i32,
            _ => {
                tracing::warn!(?axis, "handle_skill_aim_axis called with a non-aim axis");
                return;
            }
        }
        emit_touch(
            controller,
            screen_size,
            TouchAction::Move,
            button.current_pos,
            button.finger_id,
        );
    }
}

/// Synthesizes a button event from an analog trigger axis:
/// `state = clamp(value * 5 / MAX_SINT16)`, i.e. nonzero once the trigger is
/// pressed at least ~20%.
pub fn handle_trigger_axis(
    touchmap: &mut Touchmap,
    controller: &dyn Controller,
    screen_size: Size,
    axis: GamepadAxis,
    value: i16,
) {
    let axis_index: u8 = match axis {
        GamepadAxis::TriggerLeft => 0,
        GamepadAxis::TriggerRight => 1,
        _ => {
            tracing::warn!(?axis, "handle_trigger_axis called with a non-trigger axis");
            return;
        }
    };
    let state = (value as i64 * 5 / SINT16_MAX as i64).clamp(0, 5);
    let pressed = state > 0;
    dispatch_button(touchmap, controller, screen_size, MAX_BUTTON + axis_index, pressed);
}

/// Binary-searches the sorted button array and transitions `touch_down` on
/// an edge (press while up, release while down).
pub fn dispatch_button(
    touchmap: &mut Touchmap,
    controller: &dyn Controller,
    screen_size: Size,
    button: u8,
    pressed: bool,
) {
    let Some(b) = touchmap.button_mut(button) else {
        return;
    };
    if pressed && !b.touch_down {
        b.touch_down = true;
        let finger_id = b.finger_id;
        let center = b.center;
        emit_touch(controller, screen_size, TouchAction::Down, center, finger_id);
    } else if !pressed && b.touch_down {
        b.touch_down = false;
        let finger_id = b.finger_id;
        let center = b.center;
        emit_touch(controller, screen_size, TouchAction::Up, center, finger_id);
    }
}

/// Fixed-size slot array tracking which controller instance IDs are
/// currently assigned.
#[derive(Debug, Default)]
pub struct ControllerSlots {
    instance_ids: [Option<u32>; MAX_GAME_CONTROLLERS],
}

impl ControllerSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a free slot and assigns it. Returns `false` (logged by the
    /// caller) if every slot is occupied.
    pub fn add(&mut self, instance_id: u32) -> bool {
        if let Some(slot) = self.instance_ids.iter_mut().find(|s| s.is_none()) {
            *slot = Some(instance_id);
            true
        } else {
            false
        }
    }

    /// Frees the slot holding `instance_id`, if any.
    pub fn remove(&mut self, instance_id: u32) -> bool {
        if let Some(slot) = self
            .instance_ids
            .iter_mut()
            .find(|s| **s == Some(instance_id))
        {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn is_assigned(&self, instance_id: u32) -> bool {
        self.instance_ids.contains(&Some(instance_id))
    }
}

/// Builds the device add/remove control message, used by the manager once
/// the slot bookkeeping above has decided whether to accept the change.
pub fn device_message(which: u32, change: ControllerDeviceChange) -> ControlMessage {
    ControlMessage::InjectGameControllerDevice { which, change }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touchmap::{TouchButton, WalkControl};
    use std::cell::RefCell;

    struct FakeController {
        sent: RefCell<Vec<ControlMessage>>,
    }

    impl FakeController {
        fn new() -> Self {
            Self { sent: RefCell::new(Vec::new()) }
        }
    }

    impl Controller for FakeController {
        fn push(&self, msg: ControlMessage) -> bool {
            self.sent.borrow_mut().push(msg);
            true
        }
    }

    fn touch_points(sent: &[ControlMessage]) -> Vec<(TouchAction, Point, u64)> {
        sent.iter()
            .filter_map(|m| match m {
                ControlMessage::InjectTouchEvent { action, point, pointer_id, .. } => {
                    Some((*action, *point, *pointer_id))
                }
                _ => None,
            })
            .collect()
    }

    fn sample_touchmap() -> Touchmap {
        Touchmap {
            walk: WalkControl {
                center: Point::new(100, 200),
                radius: 50,
                current_pos: Point::new(100, 200),
                touch_down: false,
                finger_id: 100,
            },
            buttons: vec![TouchButton {
                center: Point::new(50, 50),
                radius: 0,
                current_pos: Point::new(50, 50),
                touch_down: false,
                finger_id: 101,
                button: 0,
                is_skill: false,
            }],
        }
    }

    #[test]
    fn walk_axis_emits_down_then_move() {
        let mut map = sample_touchmap();
        let controller = FakeController::new();
        let screen = Size::new(1080, 1920);

        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftX, 20000);
        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftY, 0);

        let events = touch_points(&controller.sent.borrow());
        assert_eq!(events[0], (TouchAction::Down, Point::new(100, 200), 100));
        assert!(events.iter().any(|e| *e == (TouchAction::Move, Point::new(130, 200), 100)));
    }

    #[test]
    fn walk_axis_tiny_value_triggers_deadzone_up() {
        let mut map = sample_touchmap();
        let controller = FakeController::new();
        let screen = Size::new(1080, 1920);

        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftX, 20000);
        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftY, 0);
        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftX, 3);
        handle_walk_axis(&mut map, &controller, screen, GamepadAxis::LeftY, 2);

        let events = touch_points(&controller.sent.borrow());
        assert_eq!(events.last().unwrap(), &(TouchAction::Up, Point::new(100, 200), 100));
        assert!(!map.walk.touch_down);
    }

    #[test]
    fn button_dispatch_ignores_repeat_press() {
        let mut map = sample_touchmap();
        let controller = FakeController::new();
        let screen = Size::new(1080, 1920);

        dispatch_button(&mut map, &controller, screen, 0, true);
        dispatch_button(&mut map, &controller, screen, 0, true); // repeat press, no-op
        dispatch_button(&mut map, &controller, screen, 0, false);

        let events = touch_points(&controller.sent.borrow());
        assert_eq!(
            events,
            vec![
                (TouchAction::Down, Point::new(50, 50), 101),
                (TouchAction::Up, Point::new(50, 50), 101),
            ]
        );
    }

    #[test]
    fn sorted_invariant_holds_after_binary_search_dispatch() {
        let mut map = sample_touchmap();
        map.buttons.push(TouchButton {
            center: Point::new(10, 10),
            radius: 0,
            current_pos: Point::new(10, 10),
            touch_down: false,
            finger_id: 102,
            button: 5,
            is_skill: false,
        });
        map.buttons.sort_by_key(|b| b.button);
        assert!(map.is_sorted());
        let controller = FakeController::new();
        dispatch_button(&mut map, &controller, Size::new(1, 1), 5, true);
        assert!(map.is_sorted());
    }

    #[test]
    fn controller_slots_overflow_is_rejected() {
        let mut slots = ControllerSlots::new();
        for i in 0..MAX_GAME_CONTROLLERS as u32 {
            assert!(slots.add(i));
        }
        assert!(!slots.add(999));
        assert!(slots.remove(0));
        assert!(slots.add(999));
    }
}
