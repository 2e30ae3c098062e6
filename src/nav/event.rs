/// Events emitted by navigator operations.
/// The front-ends consume these for messages and sound.

use crate::nav::screen::Screen;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavEvent {
    /// The focus cursor moved to another region.
    FocusMoved,
    /// A selection transitioned to this screen.
    Entered(Screen),
    /// The selection mapped to no target; state unchanged.
    Rejected,
}
