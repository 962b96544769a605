//! Touchmap JSON schema and construction.
//!
//! Button names are drawn from a closed vocabulary and parsed with
//! `strum`'s `EnumString` rather than hand-written match arms.

use crate::config::BASE_FINGER_ID;
use crate::error::TouchmapError;
use crate::geometry::Point;
use crate::touchmap::{Touchmap, TouchButton, WalkControl};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use strum_macros::EnumString;

/// One past the last named digital button (matches `SDL_CONTROLLER_BUTTON_
/// MAX`'s 21 digital buttons, indices 0..20). Triggers are encoded as
/// `MAX_BUTTON + axis_index`.
pub const MAX_BUTTON: u8 = 21;

/// Unknown button names still parse, so a typo'd name never matches a real
/// event.
pub const INVALID_BUTTON: u8 = 255;

/// The closed button-name vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ButtonName {
    A,
    B,
    X,
    Y,
    #[strum(serialize = "BACK", serialize = "SELECT")]
    Back,
    #[strum(serialize = "GUIDE", serialize = "HOME")]
    Guide,
    Start,
    #[strum(serialize = "LTHUMB", serialize = "L3")]
    LThumb,
    #[strum(serialize = "RTHUMB", serialize = "R3")]
    RThumb,
    #[strum(serialize = "LB", serialize = "L1")]
    Lb,
    #[strum(serialize = "RB", serialize = "R1")]
    Rb,
    Up,
    Down,
    Left,
    Right,
    Misc,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,
    #[strum(serialize = "LT", serialize = "L2")]
    Lt,
    #[strum(serialize = "RT", serialize = "R2")]
    Rt,
}

impl ButtonName {
    /// Numeric button code. `Lt`/`Rt` use the trigger-as-button encoding;
    /// every other name is its own ordinal. `Rt` maps to `MAX_BUTTON + 1`
    /// (`TRIGGERRIGHT`'s axis index), distinct from `Lt`'s `MAX_BUTTON` —
    /// the two must never collide.
    pub fn code(self) -> u8 {
        match self {
            ButtonName::A => 0,
            ButtonName::B => 1,
            ButtonName::X => 2,
            ButtonName::Y => 3,
            ButtonName::Back => 4,
            ButtonName::Guide => 5,
            ButtonName::Start => 6,
            ButtonName::LThumb => 7,
            ButtonName::RThumb => 8,
            ButtonName::Lb => 9,
            ButtonName::Rb => 10,
            ButtonName::Up => 11,
            ButtonName::Down => 12,
            ButtonName::Left => 13,
            ButtonName::Right => 14,
            ButtonName::Misc => 15,
            ButtonName::Paddle1 => 16,
            ButtonName::Paddle2 => 17,
            ButtonName::Paddle3 => 18,
            ButtonName::Paddle4 => 19,
            ButtonName::Touchpad => 20,
            ButtonName::Lt => MAX_BUTTON, // TRIGGERLEFT, axis index 0
            ButtonName::Rt => MAX_BUTTON + 1, // TRIGGERRIGHT, axis index 1
        }
    }
}

/// Maps a `NAME` string to its numeric button code. Unknown names map to
/// `INVALID_BUTTON` rather than failing the whole load.
pub fn button_name_to_value(name: &str) -> u8 {
    ButtonName::from_str(name)
        .map(ButtonName::code)
        .unwrap_or(INVALID_BUTTON)
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: i32,
    y: i32,
}

impl From<RawPoint> for Point {
    fn from(p: RawPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

#[derive(Debug, Deserialize)]
struct RawWalkControl {
    center: RawPoint,
    radius: i32,
}

#[derive(Debug, Deserialize)]
struct RawButtonMapping {
    touch: RawPoint,
    button: String,
}

#[derive(Debug, Deserialize)]
struct RawSkillCasting {
    center: RawPoint,
    radius: i32,
    button: String,
}

#[derive(Debug, Deserialize)]
struct RawMappings {
    walk_control: RawWalkControl,
    #[serde(default)]
    button_mappings: Vec<RawButtonMapping>,
    #[serde(default)]
    skill_casting: Vec<RawSkillCasting>,
}

#[derive(Debug, Deserialize)]
struct RawTouchmap {
    mappings: RawMappings,
}

/// Parses a touchmap JSON document (already read into memory) into a
/// `Touchmap`. Kept separate from `load` so it can be unit-tested without
/// touching the filesystem.
pub fn parse(json: &str) -> Result<Touchmap, TouchmapError> {
    let raw: RawTouchmap = serde_json::from_str(json)?;
    Ok(build(raw))
}

/// Reads and parses the touchmap file at `path`. The caller is responsible
/// for logging and, on failure, leaving the existing touchmap unchanged
/// (parse-then-replace, never free-then-parse).
pub fn load_file(path: &Path) -> Result<Touchmap, TouchmapError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn build(raw: RawTouchmap) -> Touchmap {
    let mut next_finger_id = BASE_FINGER_ID;

    let walk_id = next_finger_id;
    next_finger_id += 1;
    let walk = WalkControl {
        center: raw.mappings.walk_control.center.into(),
        radius: raw.mappings.walk_control.radius,
        current_pos: raw.mappings.walk_control.center.into(),
        touch_down: false,
        finger_id: walk_id,
    };

    let mut buttons = Vec::with_capacity(
        raw.mappings.button_mappings.len() + raw.mappings.skill_casting.len(),
    );

    for b in raw.mappings.button_mappings {
        let finger_id = next_finger_id;
        next_finger_id += 1;
        let center: Point = b.touch.into();
        buttons.push(TouchButton {
            center,
            radius: 0,
            current_pos: center,
            touch_down: false,
            finger_id,
            button: button_name_to_value(&b.button),
            is_skill: false,
        });
    }

    for s in raw.mappings.skill_casting {
        let finger_id = next_finger_id;
        next_finger_id += 1;
        let center: Point = s.center.into();
        buttons.push(TouchButton {
            center,
            radius: s.radius,
            current_pos: center,
            touch_down: false,
            finger_id,
            button: button_name_to_value(&s.button),
            is_skill: true,
        });
    }

    buttons.sort_by_key(|b| b.button);

    Touchmap { walk, buttons }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_button_name_is_invalid_not_an_error() {
        assert_eq!(button_name_to_value("NOT_A_REAL_BUTTON"), INVALID_BUTTON);
    }

    #[test]
    fn rt_maps_to_trigger_right_not_l2_duplicate() {
        assert_eq!(button_name_to_value("RT"), MAX_BUTTON + 1);
        assert_eq!(button_name_to_value("R2"), MAX_BUTTON + 1);
        assert_eq!(button_name_to_value("LT"), MAX_BUTTON);
        assert_eq!(button_name_to_value("L2"), MAX_BUTTON);
    }

    #[test]
    fn parses_minimal_touchmap_and_sorts_buttons() {
        let json = r#"{
            "mappings": {
                "walk_control": { "center": {"x": 100, "y": 200}, "radius": 50 },
                "button_mappings": [
                    { "touch": {"x": 50, "y": 50}, "button": "B" },
                    { "touch": {"x": 60, "y": 60}, "button": "A" }
                ],
                "skill_casting": [
                    { "center": {"x": 700, "y": 400}, "radius": 80, "button": "X" }
                ]
            }
        }"#;
        let map = parse(json).expect("valid touchmap");
        assert_eq!(map.walk.finger_id, BASE_FINGER_ID);
        assert_eq!(map.walk.center, Point::new(100, 200));
        assert!(map.is_sorted());
        assert_eq!(map.buttons.len(), 3);
        // A(0) < B(1) < X(2)
        assert_eq!(map.buttons[0].button, 0);
        assert_eq!(map.buttons[1].button, 1);
        assert_eq!(map.buttons[2].button, 2);
        assert!(map.buttons[2].is_skill);
        assert_eq!(map.buttons[2].radius, 80);
        let ids: std::collections::HashSet<u64> =
            std::iter::once(map.walk.finger_id)
                .chain(map.buttons.iter().map(|b| b.finger_id))
                .collect();
        assert_eq!(ids.len(), 4, "all finger ids must be disjoint");
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let json = r#"{ "mappings": { "button_mappings": [] } }"#;
        assert!(parse(json).is_err());
    }
}
