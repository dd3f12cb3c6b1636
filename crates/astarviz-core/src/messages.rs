//! Input events delivered to a [`Model`](crate::Model).

use std::time::Instant;

use crate::geom::Point;

/// Keys the visualizer reacts to. Other keys are never reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,
    /// Any other printable character.
    Char(char),
}

/// Modifier keys held during an input event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Whether no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

/// What the mouse did. A drag repeats the held button at every new cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Left button.
    Main,
    /// Middle button.
    Auxiliary,
    /// Right button.
    Secondary,
    Release,
    /// Motion with no button held.
    Move,
}

/// An input message delivered to the application.
#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        time: Instant,
    },
    Mouse {
        action: MouseAction,
        /// Screen cell, not grid cell.
        pos: Point,
        modifiers: Modifiers,
        time: Instant,
    },
    /// The terminal was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Animation clock.
    Tick,
    /// First message of every run.
    Init,
    Quit,
}

impl Msg {
    /// A bare key press.
    pub fn key(key: Key) -> Self {
        Self::key_with(key, Modifiers::default())
    }

    pub fn key_with(key: Key, modifiers: Modifiers) -> Self {
        Self::KeyDown {
            key,
            modifiers,
            time: Instant::now(),
        }
    }

    /// A mouse event without modifiers.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: Modifiers::default(),
            time: Instant::now(),
        }
    }
}
