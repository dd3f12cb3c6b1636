use std::ops::ControlFlow;

use crate::board::Board;
use crate::engine::{SearchOutcome, Step, run_search};
use crate::error::SearchError;

/// Owns a [`Board`] and the result of the one search allowed on it until the
/// next [`reset`](SearchSession::reset).
#[derive(Debug)]
pub struct SearchSession {
    board: Board,
    outcome: Option<SearchOutcome>,
    expansions: usize,
}

impl SearchSession {
    /// Wrap an existing board.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            outcome: None,
            expansions: 0,
        }
    }

    /// Start from a blank `size × size` board.
    pub fn with_size(size: i32) -> Self {
        Self::new(Board::new(size))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for barrier and designation edits between searches.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Whether a search has already run since the last reset.
    #[inline]
    pub fn has_run(&self) -> bool {
        self.outcome.is_some()
    }

    /// Result of the last search, if any.
    #[inline]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Number of cells expanded by the last search.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Recompute adjacency and run the search, forwarding every step to
    /// `observer`.
    ///
    /// A session runs at most once; a second call fails with
    /// [`SearchError::AlreadyRan`] until [`reset`](Self::reset).
    pub fn run<F>(&mut self, mut observer: F) -> Result<&SearchOutcome, SearchError>
    where
        F: FnMut(Step<'_>) -> ControlFlow<()>,
    {
        if self.outcome.is_some() {
            return Err(SearchError::AlreadyRan);
        }
        if self.board.start().is_none() || self.board.end().is_none() {
            return Err(SearchError::MissingEndpoints);
        }
        self.board.compute_neighbors();

        let mut expansions = 0;
        let outcome = run_search(&mut self.board, |step| {
            if matches!(step, Step::Expanded { .. }) {
                expansions += 1;
            }
            observer(step)
        })?;
        self.expansions = expansions;
        let outcome: &SearchOutcome = self.outcome.insert(outcome);
        Ok(outcome)
    }

    /// Forget the last outcome and clear all search marks, keeping barriers
    /// and designations.
    pub fn reset(&mut self) {
        self.board.reset_search();
        self.outcome = None;
        self.expansions = 0;
    }

    /// Give the board back.
    pub fn into_board(self) -> Board {
        self.board
    }
}
