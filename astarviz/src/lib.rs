//! astarviz: an interactive A* pathfinding visualizer for the terminal.

pub mod args;
pub mod colors;
pub mod maze;
pub mod model;

pub use args::Args;
pub use model::{AppSettings, CELL_WIDTH, Phase, Visualizer};
