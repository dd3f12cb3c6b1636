use crate::pos::Pos;

/// Cost of an orthogonal step.
pub const STRAIGHT_COST: f64 = 1.0;

/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = 1.414;

/// Multiplicative inflation applied to [`estimate`] to break ties between
/// equal-cost paths.
pub const TIE_BREAK: f64 = 1.0 / 1000.0;

/// Octile distance between two cells, without tie-breaking.
#[inline]
pub fn octile(a: Pos, b: Pos) -> f64 {
    let dx = f64::from((a.row - b.row).abs());
    let dy = f64::from((a.col - b.col).abs());
    STRAIGHT_COST * (dx + dy) + (DIAGONAL_COST - 2.0 * STRAIGHT_COST) * dx.min(dy)
}

/// Estimated remaining cost from `a` to `b`: the octile distance inflated by
/// `1 + TIE_BREAK`.
///
/// Admissible up to the inflation factor, so a search using it may return a
/// path at most `TIE_BREAK * true_cost` longer than optimal.
#[inline]
pub fn estimate(a: Pos, b: Pos) -> f64 {
    octile(a, b) * (1.0 + TIE_BREAK)
}

/// Cost of moving between two adjacent cells.
#[inline]
pub fn move_cost(from: Pos, to: Pos) -> f64 {
    if from.is_diagonal_to(to) {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}
