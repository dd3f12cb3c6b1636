//! A* search over a square grid with 8-directional movement.
//!
//! This crate is the algorithmic core of *astarviz*:
//!
//! - a [`Board`] of cells with barrier flags, start/end designations and
//!   cached adjacency,
//! - the octile [`estimate`] with a small tie-breaking inflation,
//! - a [`Frontier`] ordered by `(priority, insertion order)`,
//! - the search loop ([`run_search`]) reporting each [`Step`] to a
//!   synchronous observer, and
//! - path reconstruction over predecessor links ([`PathWalk`], [`Route`]).
//!
//! Straight moves cost [`STRAIGHT_COST`], diagonal moves [`DIAGONAL_COST`].
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use astarviz_search::{Board, Pos, SearchOutcome, run_search};
//!
//! let mut board = Board::new(5);
//! board.set_start(Pos::new(0, 0)).unwrap();
//! board.set_end(Pos::new(4, 4)).unwrap();
//! board.compute_neighbors();
//!
//! let outcome = run_search(&mut board, |_| ControlFlow::Continue(())).unwrap();
//! let SearchOutcome::Found(route) = outcome else { panic!("no path") };
//! assert_eq!(route.cells.len(), 5);
//! ```

mod board;
mod engine;
mod error;
mod frontier;
mod heuristic;
mod path;
mod pos;
mod session;

pub use board::{Board, CellView, Role, SearchState};
pub use engine::{SearchOutcome, Step, run_search};
pub use error::SearchError;
pub use frontier::Frontier;
pub use heuristic::{DIAGONAL_COST, STRAIGHT_COST, TIE_BREAK, estimate, move_cost, octile};
pub use path::{PathWalk, Route};
pub use pos::Pos;
pub use session::SearchSession;

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn outcome_round_trip() {
        let mut board = Board::new(4);
        board.set_start(Pos::new(0, 0)).unwrap();
        board.set_end(Pos::new(3, 1)).unwrap();
        board.compute_neighbors();
        let outcome = run_search(&mut board, |_| ControlFlow::Continue(())).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        let (Some(a), Some(b)) = (outcome.route(), back.route()) else {
            panic!("route lost in round trip");
        };
        assert_eq!(a.cells, b.cells);
        assert!((a.cost - b.cost).abs() < 1e-9);
    }

    #[test]
    fn cell_view_round_trip() {
        let mut board = Board::new(2);
        board.set_barrier(Pos::new(1, 0)).unwrap();
        let view = board.cell(Pos::new(1, 0)).unwrap();
        let json = serde_json::to_string(&view).unwrap();
        let back: CellView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
