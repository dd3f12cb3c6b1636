//! Random barrier placement.

use astarviz_search::{Board, Pos};
use rand::{Rng, RngExt};

/// A seed for when none was given on the command line.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}

/// Make each cell of `board` a barrier with probability `density`.
/// Returns how many barriers were placed.
///
/// Start and end designations are left alone, so callers clear them first
/// when a blank slate is wanted.
pub fn scatter_barriers(board: &mut Board, density: f64, rng: &mut impl Rng) -> usize {
    let density = density.clamp(0.0, 1.0);
    let cells: Vec<Pos> = board.positions().collect();
    let mut placed = 0;
    for pos in cells {
        if rng.random_bool(density) && matches!(board.set_barrier(pos), Ok(true)) {
            placed += 1;
        }
    }
    log::debug!("scattered {placed} barriers (density {density})");
    placed
}
