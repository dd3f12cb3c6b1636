//! The square [`Board`] a search runs on: barrier flags, start/end
//! designations, per-cell search bookkeeping and cached adjacency.

use crate::error::SearchError;
use crate::pos::Pos;

/// Search progress of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Not discovered yet.
    #[default]
    Unseen,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded; its neighbors have been relaxed.
    Closed,
}

/// Designation of a cell, independent of its search state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Plain,
    Start,
    End,
}

/// Read-only snapshot of a cell, for renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub pos: Pos,
    pub barrier: bool,
    pub role: Role,
    pub state: SearchState,
    pub path: bool,
}

// ---------------------------------------------------------------------------
// Internal per-cell record
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<Pos>,
    pub(crate) state: SearchState,
    pub(crate) path: bool,
    pub(crate) barrier: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            state: SearchState::Unseen,
            path: false,
            barrier: false,
        }
    }
}

impl Node {
    fn reset_search(&mut self) {
        let barrier = self.barrier;
        *self = Self {
            barrier,
            ..Self::default()
        };
    }
}

/// Row-major offsets visited by [`Board::neighbors_of`]: down, up, right,
/// left, down-right, down-left, up-right, up-left.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An `N × N` grid of cells.
///
/// The dimension is fixed at construction. Barrier edits invalidate the
/// adjacency cache; [`compute_neighbors`](Board::compute_neighbors) must be
/// called again before the next search.
#[derive(Clone, Debug)]
pub struct Board {
    size: i32,
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Pos>>,
    adjacency_fresh: bool,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Board {
    /// Create an empty `size × size` board: no barriers, no designations,
    /// every cost infinite.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        let len = (size as usize) * (size as usize);
        Self {
            size,
            nodes: vec![Node::default(); len],
            adjacency: vec![Vec::new(); len],
            adjacency_fresh: false,
            start: None,
            end: None,
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether `pos` lies on the board.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.size && pos.col < self.size
    }

    /// Row-major iterator over every position on the board.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Pos::new(row, col)))
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.size as usize + pos.col as usize)
    }

    fn checked_idx(&self, pos: Pos) -> Result<usize, SearchError> {
        self.idx(pos).ok_or(SearchError::OutOfBounds(pos))
    }

    #[inline]
    pub(crate) fn node(&self, pos: Pos) -> Option<&Node> {
        self.idx(pos).map(|i| &self.nodes[i])
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, pos: Pos) -> Option<&mut Node> {
        self.idx(pos).map(move |i| &mut self.nodes[i])
    }

    // -----------------------------------------------------------------------
    // Barriers
    // -----------------------------------------------------------------------

    /// Mark `pos` as a barrier.
    ///
    /// Returns `Ok(false)` without changing anything when `pos` is the start
    /// or end cell, or is already a barrier.
    pub fn set_barrier(&mut self, pos: Pos) -> Result<bool, SearchError> {
        let i = self.checked_idx(pos)?;
        if self.start == Some(pos) || self.end == Some(pos) || self.nodes[i].barrier {
            return Ok(false);
        }
        self.nodes[i].barrier = true;
        self.adjacency_fresh = false;
        Ok(true)
    }

    /// Remove the barrier at `pos`. Returns whether one was there.
    pub fn clear_barrier(&mut self, pos: Pos) -> Result<bool, SearchError> {
        let i = self.checked_idx(pos)?;
        if !self.nodes[i].barrier {
            return Ok(false);
        }
        self.nodes[i].barrier = false;
        self.adjacency_fresh = false;
        Ok(true)
    }

    /// Whether `pos` is a barrier. Off-board positions are not.
    #[inline]
    pub fn is_barrier(&self, pos: Pos) -> bool {
        self.node(pos).is_some_and(|n| n.barrier)
    }

    /// Number of barrier cells.
    pub fn barrier_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.barrier).count()
    }

    // -----------------------------------------------------------------------
    // Start / end designations
    // -----------------------------------------------------------------------

    /// Designate `pos` as the start cell, replacing any previous start.
    /// A barrier at `pos` is removed.
    ///
    /// Start and end may name the same cell; such a search succeeds
    /// immediately with an empty path.
    pub fn set_start(&mut self, pos: Pos) -> Result<(), SearchError> {
        self.clear_barrier(pos)?;
        self.start = Some(pos);
        Ok(())
    }

    /// Designate `pos` as the end cell, replacing any previous end.
    /// A barrier at `pos` is removed.
    pub fn set_end(&mut self, pos: Pos) -> Result<(), SearchError> {
        self.clear_barrier(pos)?;
        self.end = Some(pos);
        Ok(())
    }

    /// Remove the start designation.
    pub fn clear_start(&mut self) {
        self.start = None;
    }

    /// Remove the end designation.
    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// The start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Non-barrier, in-bounds cells adjacent to `pos`, in the fixed order
    /// down, up, right, left, down-right, down-left, up-right, up-left.
    pub fn neighbors_of(&self, pos: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(8);
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let n = pos.shift(dr, dc);
            if self.contains(n) && !self.is_barrier(n) {
                out.push(n);
            }
        }
        out
    }

    /// Recompute the cached neighbor list of every cell from the current
    /// barrier layout.
    pub fn compute_neighbors(&mut self) {
        let lists: Vec<Vec<Pos>> = self.positions().map(|p| self.neighbors_of(p)).collect();
        self.adjacency = lists;
        self.adjacency_fresh = true;
        log::trace!("adjacency recomputed for {0}x{0} board", self.size);
    }

    /// Whether the adjacency cache reflects the current barriers.
    #[inline]
    pub fn adjacency_is_fresh(&self) -> bool {
        self.adjacency_fresh
    }

    /// Cached neighbors of `pos` as of the last
    /// [`compute_neighbors`](Board::compute_neighbors).
    pub fn neighbors(&self, pos: Pos) -> &[Pos] {
        match self.idx(pos) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    // -----------------------------------------------------------------------
    // Search bookkeeping
    // -----------------------------------------------------------------------

    /// Clear costs, predecessors, search states and path marks. Barriers and
    /// designations are kept.
    pub fn reset_search(&mut self) {
        for n in &mut self.nodes {
            n.reset_search();
        }
    }

    /// Reset the board to its freshly-constructed state.
    pub fn clear(&mut self) {
        for n in &mut self.nodes {
            *n = Node::default();
        }
        self.start = None;
        self.end = None;
        self.adjacency_fresh = false;
    }

    /// Search state of `pos`. Off-board positions are `Unseen`.
    pub fn state(&self, pos: Pos) -> SearchState {
        self.node(pos).map_or(SearchState::Unseen, |n| n.state)
    }

    /// Whether `pos` was marked as part of the reconstructed path.
    pub fn is_path(&self, pos: Pos) -> bool {
        self.node(pos).is_some_and(|n| n.path)
    }

    /// Best known cost from the start (the g-score).
    pub fn cost_from_start(&self, pos: Pos) -> f64 {
        self.node(pos).map_or(f64::INFINITY, |n| n.g)
    }

    /// Cost from start plus estimate to the end (the f-score).
    pub fn estimated_total_cost(&self, pos: Pos) -> f64 {
        self.node(pos).map_or(f64::INFINITY, |n| n.f)
    }

    /// Cell `pos` was reached from, if any.
    pub fn predecessor(&self, pos: Pos) -> Option<Pos> {
        self.node(pos).and_then(|n| n.parent)
    }

    /// Whether `pos` is the start cell.
    #[inline]
    pub fn is_start(&self, pos: Pos) -> bool {
        self.start == Some(pos)
    }

    /// Whether `pos` is the end cell.
    #[inline]
    pub fn is_end(&self, pos: Pos) -> bool {
        self.end == Some(pos)
    }

    /// Snapshot of everything a renderer needs about `pos`.
    pub fn cell(&self, pos: Pos) -> Option<CellView> {
        let n = self.node(pos)?;
        let role = if self.is_start(pos) {
            Role::Start
        } else if self.is_end(pos) {
            Role::End
        } else {
            Role::Plain
        };
        Some(CellView {
            pos,
            barrier: n.barrier,
            role,
            state: n.state,
            path: n.path,
        })
    }
}
