use crate::board::Board;
use crate::heuristic::move_cost;
use crate::pos::Pos;

/// Lazy walk over predecessor links, from the goal back toward the start.
///
/// Yields every cell that has a recorded predecessor, beginning with the
/// goal itself, and stops at the first cell without one. The start cell is
/// therefore never yielded, and a goal equal to the start yields nothing.
pub struct PathWalk<'a> {
    board: &'a Board,
    current: Option<Pos>,
    // Bounds the walk in case predecessor links ever form a cycle.
    remaining: usize,
}

impl<'a> PathWalk<'a> {
    pub(crate) fn new(board: &'a Board, goal: Pos) -> Self {
        let cells = (board.size().max(0) as usize).pow(2);
        Self {
            board,
            current: Some(goal),
            remaining: cells,
        }
    }
}

impl Iterator for PathWalk<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let cur = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        let prev = self.board.predecessor(cur);
        self.current = prev;
        self.remaining -= 1;
        prev.map(|_| cur)
    }
}

impl Board {
    /// Walk predecessor links back from `goal`. See [`PathWalk`].
    pub fn path_walk(&self, goal: Pos) -> PathWalk<'_> {
        PathWalk::new(self, goal)
    }
}

/// A path found by the search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// The cell the search was looking for.
    pub goal: Pos,
    /// Every cell from start to goal, both included.
    pub cells: Vec<Pos>,
    /// Sum of the move costs along `cells`.
    pub cost: f64,
}

impl Route {
    /// Build a route from the predecessor links leading to `goal`.
    pub fn from_board(board: &Board, goal: Pos) -> Self {
        let mut cells: Vec<Pos> = board.path_walk(goal).collect();
        let origin = cells
            .last()
            .and_then(|&p| board.predecessor(p))
            .unwrap_or(goal);
        cells.push(origin);
        cells.reverse();
        let cost: f64 = cells.windows(2).map(|w| move_cost(w[0], w[1])).sum();
        Self { goal, cells, cost }
    }

    /// Number of moves along the route.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}
