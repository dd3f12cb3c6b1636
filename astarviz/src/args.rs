use std::path::PathBuf;

use clap::Parser;

use crate::model::AppSettings;

/// Largest grid side. Keeps the screen within terminal coordinates.
pub const MAX_SIZE: i64 = 1000;

/// Interactive A* pathfinding visualizer for the terminal
///
/// Left click places the start cell, then the end cell, then barriers;
/// right click erases. Space runs the search, Backspace draws a random maze,
/// r resets the search, c clears the board, Enter skips the animation and
/// q quits.
#[derive(Parser, Debug)]
#[command(version, about, name = "astarviz")]
pub struct Args {
    /// Number of rows and columns of the grid
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i32).range(2..=MAX_SIZE))]
    pub size: i32,

    /// Probability that a cell becomes a barrier in a random maze
    #[arg(long, default_value_t = 0.5, value_parser = parse_probability)]
    pub density: f64,

    /// Seed for random mazes; a fresh one is drawn when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search steps animated per frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub steps_per_tick: u32,

    /// Milliseconds between animation frames
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Abandon a search after this many expansions
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_expansions: Option<u64>,

    /// Write logs to this file (RUST_LOG selects the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start with a random maze
    #[arg(long)]
    pub maze: bool,
}

impl Args {
    /// Model settings, with the RNG seed resolved.
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            size: self.size,
            density: self.density,
            seed: self.seed.unwrap_or_else(crate::maze::fresh_seed),
            steps_per_tick: self.steps_per_tick as usize,
            max_expansions: self.max_expansions.map(|n| n as usize),
            maze: self.maze,
        }
    }
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not within 0..=1"))
    }
}
