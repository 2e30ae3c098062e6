/// Input state tracker for the screen front-end.
///
/// Drains all pending terminal events once per frame and exposes:
///   - Edge-triggered key presses (every menu action is one-shot)
///   - The last known pointer position
///   - Whether the left button was released this frame
///
/// The pointer is tracked in terminal coordinates; the loop maps it onto
/// the canvas before hit-testing.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    poll,
};

pub struct InputState {
    /// Keys pressed during the most recent drain_events() call.
    fresh_presses: Vec<KeyCode>,

    /// Last reported pointer position (terminal columns/rows).
    pointer: Option<(u16, u16)>,

    /// Left button released during the most recent drain.
    click_released: bool,

    ctrl_c: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            fresh_presses: Vec::with_capacity(8),
            pointer: None,
            click_released: false,
            ctrl_c: false,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before the navigator update.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.click_released = false;
        self.ctrl_c = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                    {
                        self.ctrl_c = true;
                    }
                    self.fresh_presses.push(key.code);
                }
                Ok(Event::Mouse(MouseEvent { kind, column, row, .. })) => {
                    match kind {
                        MouseEventKind::Up(MouseButton::Left) => {
                            self.pointer = Some((column, row));
                            self.click_released = true;
                        }
                        MouseEventKind::Moved
                        | MouseEventKind::Drag(_)
                        | MouseEventKind::Down(_) => {
                            self.pointer = Some((column, row));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    /// Was this key pressed this frame? (edge trigger)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    /// Convenience: was any of these keys pressed?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.ctrl_c
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    pub fn click_released(&self) -> bool {
        self.click_released
    }
}
