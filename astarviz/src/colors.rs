//! Cell palette.
//!
//! Search states map to colours only here; the search crate knows nothing
//! about rendering.

use astarviz_core::Color;

/// Plain walkable cell.
pub const EMPTY: Color = Color::Rgb(255, 255, 255);
pub const BARRIER: Color = Color::Rgb(0, 0, 0);
pub const START: Color = Color::Rgb(255, 165, 0);
pub const END: Color = Color::Rgb(64, 224, 208);
/// Discovered, waiting in the frontier.
pub const OPEN: Color = Color::Rgb(0, 255, 0);
/// Expanded.
pub const CLOSED: Color = Color::Rgb(255, 0, 0);
pub const PATH: Color = Color::Rgb(128, 0, 128);
/// Dot marking cell corners on empty cells, in place of grid lines.
pub const GRID_DOT: Color = Color::Rgb(128, 128, 128);
