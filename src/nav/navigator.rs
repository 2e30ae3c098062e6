/// The screen navigator: the current screen plus the fixed region lists.
///
/// Owns a small immutable set of selectable regions, created once at
/// startup. `handle_selection` is the single transition operation; the
/// pointer, keyboard, gamepad, and console paths all funnel into it.

use crate::nav::event::NavEvent;
use crate::nav::region::{self, Region};
use crate::nav::screen::Screen;

pub struct Navigator {
    current: Screen,
    focus: usize,
    menu: [Region; 3],
    back: [Region; 1],
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            current: Screen::Menu,
            focus: 0,
            menu: region::menu_regions(),
            back: [region::back_region()],
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Selectable regions of the current screen. Empty once Exit is reached.
    pub fn regions(&self) -> &[Region] {
        match self.current {
            Screen::Menu => &self.menu,
            Screen::Gameplay | Screen::Settings => &self.back,
            Screen::Exit => &[],
        }
    }

    /// Map a region index to its target screen.
    /// An index with no region leaves the state untouched.
    pub fn handle_selection(&mut self, index: usize) -> NavEvent {
        let target = match self.regions().get(index) {
            Some(region) => region.target,
            None => return NavEvent::Rejected,
        };
        self.current = target;
        self.focus = 0;
        NavEvent::Entered(target)
    }

    /// Hit-test a pointer release. A miss does nothing.
    pub fn handle_click(&mut self, x: u16, y: u16) -> Option<NavEvent> {
        let index = self.hovered(x, y)?;
        Some(self.handle_selection(index))
    }

    /// Which region contains the pointer, if any.
    pub fn hovered(&self, x: u16, y: u16) -> Option<usize> {
        self.regions().iter().position(|r| r.rect.contains(x, y))
    }

    pub fn focus_next(&mut self) -> Option<NavEvent> {
        self.shift_focus(1)
    }

    pub fn focus_prev(&mut self) -> Option<NavEvent> {
        self.shift_focus(-1)
    }

    fn shift_focus(&mut self, delta: isize) -> Option<NavEvent> {
        let len = self.regions().len();
        if len < 2 {
            return None;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(len as isize) as usize;
        Some(NavEvent::FocusMoved)
    }

    /// Activate the focused region (keyboard/gamepad confirm).
    pub fn activate_focus(&mut self) -> NavEvent {
        self.handle_selection(self.focus)
    }

    /// Select the Back region if the current screen has one.
    pub fn back(&mut self) -> Option<NavEvent> {
        match self.current {
            Screen::Gameplay | Screen::Settings => Some(self.handle_selection(0)),
            Screen::Menu | Screen::Exit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_targets() {
        for (index, target) in [
            (0, Screen::Gameplay),
            (1, Screen::Settings),
            (2, Screen::Exit),
        ] {
            let mut nav = Navigator::new();
            assert_eq!(nav.handle_selection(index), NavEvent::Entered(target));
            assert_eq!(nav.current(), target);
        }
    }

    #[test]
    fn back_returns_to_menu() {
        let mut nav = Navigator::new();
        nav.handle_selection(0); // Menu → Gameplay
        assert_eq!(nav.handle_selection(0), NavEvent::Entered(Screen::Menu));

        nav.handle_selection(1); // Menu → Settings
        assert_eq!(nav.handle_selection(0), NavEvent::Entered(Screen::Menu));
        assert_eq!(nav.current(), Screen::Menu);
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut nav = Navigator::new();
        assert_eq!(nav.handle_selection(9), NavEvent::Rejected);
        assert_eq!(nav.current(), Screen::Menu);

        nav.handle_selection(0); // Gameplay has only the Back region
        assert_eq!(nav.handle_selection(1), NavEvent::Rejected);
        assert_eq!(nav.current(), Screen::Gameplay);
    }

    #[test]
    fn exit_is_absorbing() {
        let mut nav = Navigator::new();
        nav.handle_selection(2);
        assert_eq!(nav.current(), Screen::Exit);
        assert!(nav.regions().is_empty());

        for index in 0..4 {
            assert_eq!(nav.handle_selection(index), NavEvent::Rejected);
        }
        assert_eq!(nav.handle_click(40, 12), None);
        assert_eq!(nav.current(), Screen::Exit);
    }

    #[test]
    fn click_hits_and_misses() {
        let mut nav = Navigator::new();
        let play = nav.regions()[0].rect;

        // A release in a corner of the canvas hits nothing.
        assert_eq!(nav.handle_click(0, 0), None);
        assert_eq!(nav.current(), Screen::Menu);

        // A release inside the Play button selects it.
        assert_eq!(
            nav.handle_click(play.x + 1, play.y + 1),
            Some(NavEvent::Entered(Screen::Gameplay))
        );
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut nav = Navigator::new();
        assert_eq!(nav.focus_prev(), Some(NavEvent::FocusMoved));
        assert_eq!(nav.focus(), 2); // wrapped to Quit

        assert_eq!(nav.focus_next(), Some(NavEvent::FocusMoved));
        assert_eq!(nav.focus(), 0); // wrapped back to Play
    }

    #[test]
    fn focus_resets_on_transition() {
        let mut nav = Navigator::new();
        nav.focus_next();
        nav.focus_next();
        assert_eq!(nav.activate_focus(), NavEvent::Entered(Screen::Exit));
        assert_eq!(nav.focus(), 0);
    }

    #[test]
    fn focus_is_inert_with_a_single_region() {
        let mut nav = Navigator::new();
        nav.handle_selection(0); // Gameplay: only Back
        assert_eq!(nav.focus_next(), None);
        assert_eq!(nav.focus(), 0);
        assert_eq!(nav.activate_focus(), NavEvent::Entered(Screen::Menu));
    }

    #[test]
    fn back_only_from_sub_screens() {
        let mut nav = Navigator::new();
        assert_eq!(nav.back(), None); // Menu has no Back

        nav.handle_selection(1);
        assert_eq!(nav.back(), Some(NavEvent::Entered(Screen::Menu)));
    }
}
