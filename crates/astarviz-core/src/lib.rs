//! **astarviz-core**: the grid UI framework the visualizer runs on.
//!
//! Geometry primitives, styled glyphs, a diffed screen buffer, input
//! messages, and the Elm-architecture application loop. Back-ends implement
//! [`Driver`]; applications implement [`Model`].

pub mod app;
pub mod canvas;
pub mod geom;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use canvas::{Canvas, Frame, FrameGlyph, Glyph, compute_frame};
pub use geom::{Point, Range};
pub use messages::{Key, Modifiers, MouseAction, Msg};
pub use style::{Color, Style};
