/// Gamepad input tracker using gilrs.
///
/// Confirm/cancel button mapping is loaded from config.toml via
/// `load_button_config()`. D-pad and left stick move the menu focus.
/// Default mapping:
///   D-pad / Left Stick    →  Focus up / down
///   A / Start             →  Confirm
///   B / Select            →  Cancel / Back

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    Start,
    Select,
}

const BTN_COUNT: usize = 6;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel: vec![Btn::B, Btn::Select],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Edge-triggered button presses this frame (indexed by Btn).
    pressed: [bool; BTN_COUNT],

    up_edge: bool,
    down_edge: bool,

    /// Last stick zone on the Y axis: -1 down, 0 center, 1 up.
    /// Focus moves only when the stick crosses the deadzone.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_zone: i8,

    action_map: ActionMap,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs = Gilrs::new().ok();

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs,
            pressed: [false; BTN_COUNT],
            up_edge: false,
            down_edge: false,
            stick_zone: 0,
            action_map: ActionMap::default(),
        }
    }

    /// Load button mapping from config.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() {
            self.action_map.confirm = cf;
        }
        let ca = parse_list(&cfg.cancel);
        if !ca.is_empty() {
            self.action_map.cancel = ca;
        }
    }

    /// Poll gilrs events. Call once per frame.
    pub fn update(&mut self) {
        self.clear_edges();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(Button::DPadUp, _) => self.up_edge = true,
                EventType::ButtonPressed(Button::DPadDown, _) => self.down_edge = true,
                EventType::ButtonPressed(btn, _) => {
                    if let Some(b) = Btn::from_gilrs(btn) {
                        self.pressed[btn_index(b)] = true;
                    }
                }
                EventType::AxisChanged(Axis::LeftStickY, value, _) => {
                    // gilrs reports stick up as positive Y
                    let zone = if value > STICK_DEADZONE {
                        1
                    } else if value < -STICK_DEADZONE {
                        -1
                    } else {
                        0
                    };
                    if zone != self.stick_zone {
                        match zone {
                            1 => self.up_edge = true,
                            -1 => self.down_edge = true,
                            _ => {}
                        }
                        self.stick_zone = zone;
                    }
                }
                _ => {}
            }
        }
    }

    // ── Action queries ──

    pub fn up_pressed(&self) -> bool {
        self.up_edge
    }

    pub fn down_pressed(&self) -> bool {
        self.down_edge
    }

    pub fn confirm_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.confirm)
    }

    pub fn cancel_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.cancel)
    }

    // ── Internal ──

    fn any_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.pressed[btn_index(b)])
    }

    fn clear_edges(&mut self) {
        self.pressed = [false; BTN_COUNT];
        self.up_edge = false;
        self.down_edge = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_names_parse_with_aliases() {
        assert_eq!(Btn::from_name("a"), Some(Btn::A));
        assert_eq!(Btn::from_name("SOUTH"), Some(Btn::A));
        assert_eq!(Btn::from_name("back"), Some(Btn::Select));
        assert_eq!(Btn::from_name("turbo"), None);
    }

    #[test]
    fn unknown_names_keep_default_mapping() {
        let mut pad = GamepadState::new();
        pad.load_button_config(&GamepadConfig {
            confirm: vec!["turbo".into()],
            cancel: vec!["Y".into()],
        });
        assert_eq!(pad.action_map.confirm, vec![Btn::A, Btn::Start]);
        assert_eq!(pad.action_map.cancel, vec![Btn::Y]);
    }
}
