//! Browser key names to game input

use crate::sim::{Control, InputEvent};

/// Key that toggles demo mode
pub const DEMO_TOGGLE_KEY: &str = "i";

/// Map a `KeyboardEvent.key` value to a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" => Some(Control::Left),
        "ArrowRight" => Some(Control::Right),
        " " => Some(Control::Fire),
        "r" | "R" => Some(Control::Restart),
        _ => None,
    }
}

/// Translate a key edge into an input event
pub fn key_event(key: &str, pressed: bool) -> Option<InputEvent> {
    let control = control_for_key(key)?;
    Some(if pressed {
        InputEvent::Press(control)
    } else {
        InputEvent::Release(control)
    })
}

pub fn is_demo_toggle(key: &str) -> bool {
    key.eq_ignore_ascii_case(DEMO_TOGGLE_KEY)
}
