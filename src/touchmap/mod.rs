//! Declarative gamepad-to-touch mapping. Owned exclusively by the
//! `InputManager`; replaced whole, never mutated piecewise except for each
//! control's own `touch_down`/`current_pos`.

pub mod gamepad;
pub mod loader;

use crate::geometry::Point;

/// The simulated analog joystick drawn as a circle on the touchscreen.
#[derive(Debug, Clone)]
pub struct WalkControl {
    pub center: Point,
    pub radius: i32,
    pub current_pos: Point,
    pub touch_down: bool,
    pub finger_id: u64,
}

/// A tap target or skill-casting button driven by a gamepad button/axis.
#[derive(Debug, Clone)]
pub struct TouchButton {
    pub center: Point,
    pub radius: i32,
    pub current_pos: Point,
    pub touch_down: bool,
    pub finger_id: u64,
    /// Gamepad button code. Triggers are encoded as `MAX_BUTTON + axis_index`.
    pub button: u8,
    pub is_skill: bool,
}

/// A fully loaded, immediately usable touchmap. `buttons` is kept sorted
/// ascending by `TouchButton::button` to permit binary search on event
/// delivery.
#[derive(Debug, Clone)]
pub struct Touchmap {
    pub walk: WalkControl,
    pub buttons: Vec<TouchButton>,
}

impl Touchmap {
    /// Binary-search lookup used by the gamepad button dispatch path.
    pub fn button_mut(&mut self, button: u8) -> Option<&mut TouchButton> {
        let idx = self
            .buttons
            .binary_search_by_key(&button, |b| b.button)
            .ok()?;
        self.buttons.get_mut(idx)
    }

    #[cfg(test)]
    pub fn is_sorted(&self) -> bool {
        self.buttons.windows(2).all(|w| w[0].button <= w[1].button)
    }
}
