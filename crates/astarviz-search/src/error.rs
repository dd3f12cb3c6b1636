//! Error types for board edits and search runs.

use thiserror::Error;

use crate::pos::Pos;

/// Reasons a search refuses to start, or a board edit is rejected.
///
/// Exhausting the frontier or being cancelled are not errors; see
/// [`SearchOutcome`](crate::SearchOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The board has no start cell, no end cell, or neither.
    #[error("search needs both a start and an end cell")]
    MissingEndpoints,
    /// A position outside the board was used.
    #[error("cell {0} is outside the board")]
    OutOfBounds(Pos),
    /// Barriers changed since adjacency was last computed.
    #[error("adjacency is stale; call compute_neighbors after editing barriers")]
    StaleAdjacency,
    /// The session already ran a search and must be reset first.
    #[error("a search already ran on this session; reset it first")]
    AlreadyRan,
}
