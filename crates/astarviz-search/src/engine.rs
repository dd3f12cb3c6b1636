use std::ops::ControlFlow;

use crate::board::{Board, SearchState};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::{estimate, move_cost};
use crate::path::Route;
use crate::pos::Pos;

/// A visible change reported to the observer of a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step<'a> {
    /// `cell` was popped and its neighbors relaxed. `opened` lists the
    /// neighbors that entered the frontier during this expansion.
    Expanded { cell: Pos, opened: &'a [Pos] },
    /// `cell` was marked as part of the reconstructed path.
    Path(Pos),
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The end cell was reached.
    Found(Route),
    /// The frontier ran dry; no path exists with the current barriers.
    NotFound,
    /// The observer asked to stop.
    Cancelled,
}

impl SearchOutcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(r) => Some(r),
            _ => None,
        }
    }
}

/// Run A* from the board's start cell to its end cell.
///
/// The board must have both endpoints designated and fresh adjacency
/// (see [`Board::compute_neighbors`]); otherwise an error is returned before
/// anything is touched. Costs, predecessors and search states are reset at
/// the beginning of the run and left in place afterwards, so a failed search
/// can still be inspected.
///
/// `observer` is called once after every expansion and once per cell marked
/// on the path. Returning [`ControlFlow::Break`] after an expansion ends the
/// search with [`SearchOutcome::Cancelled`]; the signal is ignored while the
/// path is being marked.
///
/// A cell is never queued twice. When a cheaper route to a cell that is
/// already open turns up, its cost, estimate and predecessor are updated but
/// its frontier entry keeps the priority it was queued with, so it may be
/// popped later than a decrease-key queue would pop it. On some layouts the
/// returned route can therefore cost slightly more than the optimum.
pub fn run_search<F>(board: &mut Board, mut observer: F) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    let (Some(start), Some(end)) = (board.start(), board.end()) else {
        return Err(SearchError::MissingEndpoints);
    };
    if !board.adjacency_is_fresh() {
        return Err(SearchError::StaleAdjacency);
    }

    log::debug!("search {start} -> {end} on {0}x{0} board", board.size());
    board.reset_search();

    let mut frontier = Frontier::new();
    let start_f = estimate(start, end);
    if let Some(n) = board.node_mut(start) {
        n.g = 0.0;
        n.f = start_f;
        n.state = SearchState::Open;
    }
    frontier.insert(start, start_f);

    let mut opened: Vec<Pos> = Vec::with_capacity(8);
    let mut expansions = 0usize;

    while let Some(current) = frontier.pop_min() {
        expansions += 1;

        if current == end {
            let route = reconstruct(board, end, &mut observer);
            log::debug!(
                "path found: {} steps, cost {:.3}, {expansions} expansions, {} insertions",
                route.steps(),
                route.cost,
                frontier.insertions()
            );
            return Ok(SearchOutcome::Found(route));
        }

        let current_g = board.cost_from_start(current);
        opened.clear();

        let degree = board.neighbors(current).len();
        for k in 0..degree {
            let nbr = board.neighbors(current)[k];
            let tentative = current_g + move_cost(current, nbr);
            let Some(n) = board.node_mut(nbr) else {
                continue;
            };
            if tentative >= n.g {
                continue;
            }
            n.parent = Some(current);
            n.g = tentative;
            n.f = tentative + estimate(nbr, end);
            // A live entry keeps its old priority; only the node's costs move.
            if !frontier.contains(nbr) {
                frontier.insert(nbr, n.f);
                n.state = SearchState::Open;
                opened.push(nbr);
            }
        }

        log::trace!("expanded {current}, opened {}", opened.len());
        let flow = observer(Step::Expanded {
            cell: current,
            opened: &opened,
        });

        if current != start {
            if let Some(n) = board.node_mut(current) {
                n.state = SearchState::Closed;
            }
        }

        if flow.is_break() {
            log::debug!("search cancelled after {expansions} expansions");
            return Ok(SearchOutcome::Cancelled);
        }
    }

    log::debug!("no path after {expansions} expansions");
    Ok(SearchOutcome::NotFound)
}

/// Mark the cells leading back from `goal` as path cells, reporting each one.
fn reconstruct<F>(board: &mut Board, goal: Pos, observer: &mut F) -> Route
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    let walked: Vec<Pos> = board.path_walk(goal).collect();
    for p in walked {
        if let Some(n) = board.node_mut(p) {
            n.path = true;
        }
        let _ = observer(Step::Path(p));
    }
    Route::from_board(board, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{DIAGONAL_COST, TIE_BREAK};

    fn go(_: Step<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn board(size: i32, start: Pos, end: Pos, walls: &[Pos]) -> Board {
        let mut b = Board::new(size);
        b.set_start(start).unwrap();
        b.set_end(end).unwrap();
        for &w in walls {
            b.set_barrier(w).unwrap();
        }
        b.compute_neighbors();
        b
    }

    /// Exhaustive reference: plain Dijkstra over the same moves, by repeated
    /// relaxation until nothing changes.
    fn true_costs(b: &Board, from: Pos) -> Vec<Vec<f64>> {
        let n = b.size() as usize;
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        dist[from.row as usize][from.col as usize] = 0.0;
        loop {
            let mut changed = false;
            for p in b.positions() {
                let d = dist[p.row as usize][p.col as usize];
                if d.is_infinite() || b.is_barrier(p) {
                    continue;
                }
                for q in b.neighbors_of(p) {
                    let nd = d + move_cost(p, q);
                    let slot = &mut dist[q.row as usize][q.col as usize];
                    if nd < *slot - 1e-12 {
                        *slot = nd;
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    #[test]
    fn scenario_open_diagonal() {
        let mut b = board(5, Pos::new(0, 0), Pos::new(4, 4), &[]);
        let outcome = run_search(&mut b, go).unwrap();
        let route = outcome.route().expect("path");
        assert_eq!(route.cells.len(), 5);
        assert!((route.cost - 4.0 * DIAGONAL_COST).abs() < 1e-9);
        for w in route.cells.windows(2) {
            assert!(w[0].is_diagonal_to(w[1]));
        }
    }

    #[test]
    fn scenario_single_gap() {
        let walls: Vec<Pos> = (0..5).filter(|&c| c != 2).map(|c| Pos::new(2, c)).collect();
        let mut b = board(5, Pos::new(0, 0), Pos::new(4, 4), &walls);
        let outcome = run_search(&mut b, go).unwrap();
        let route = outcome.route().expect("path");
        assert!(route.cells.contains(&Pos::new(2, 2)));
        assert!(route.cells.iter().all(|p| !b.is_barrier(*p)));
    }

    #[test]
    fn scenario_start_is_end() {
        let mut b = board(3, Pos::new(0, 0), Pos::new(0, 0), &[]);
        let mut steps = 0;
        let outcome = run_search(&mut b, |_| {
            steps += 1;
            ControlFlow::Continue(())
        })
        .unwrap();
        let route = outcome.route().expect("path");
        assert_eq!(route.cells, vec![Pos::new(0, 0)]);
        assert_eq!(route.cost, 0.0);
        assert_eq!(steps, 0);
        assert!(b.positions().all(|p| !b.is_path(p)));
    }

    #[test]
    fn scenario_walled_in_start() {
        let start = Pos::new(2, 2);
        let walls: Vec<Pos> = Board::new(5).neighbors_of(start);
        let mut b = board(5, start, Pos::new(4, 0), &walls);
        assert_eq!(run_search(&mut b, go).unwrap(), SearchOutcome::NotFound);
        assert_eq!(b.state(Pos::new(0, 0)), SearchState::Unseen);
        assert_eq!(b.state(Pos::new(4, 0)), SearchState::Unseen);
    }

    #[test]
    fn enclosed_end_leaves_unreachable_cells_unseen() {
        // End at (6,6) boxed in by a ring of walls around it.
        let end = Pos::new(6, 6);
        let ring: Vec<Pos> = Board::new(8).neighbors_of(end);
        let mut b = board(8, Pos::new(0, 0), end, &ring);
        assert_eq!(run_search(&mut b, go).unwrap(), SearchOutcome::NotFound);

        for p in b.positions() {
            if b.is_barrier(p) {
                continue;
            }
            if p == end {
                assert_eq!(b.state(p), SearchState::Unseen);
            } else if p == b.start().unwrap() {
                assert!(b.cost_from_start(p) == 0.0);
            } else {
                // Everything outside the ring is reachable and gets expanded.
                assert_eq!(b.state(p), SearchState::Closed, "{p}");
            }
        }
    }

    #[test]
    fn start_never_becomes_closed() {
        let mut b = board(4, Pos::new(1, 1), Pos::new(3, 3), &[]);
        run_search(&mut b, go).unwrap();
        assert_ne!(b.state(Pos::new(1, 1)), SearchState::Closed);
    }

    #[test]
    fn optimal_within_tie_break_on_open_boards() {
        let size = 9;
        let pairs = [
            (Pos::new(0, 0), Pos::new(8, 8)),
            (Pos::new(0, 3), Pos::new(7, 1)),
            (Pos::new(4, 4), Pos::new(0, 8)),
            (Pos::new(8, 0), Pos::new(2, 5)),
            (Pos::new(5, 0), Pos::new(5, 8)),
        ];
        for (s, e) in pairs {
            let mut b = board(size, s, e, &[]);
            let truth = true_costs(&b, s)[e.row as usize][e.col as usize];
            let outcome = run_search(&mut b, go).unwrap();
            let route = outcome.route().expect("path");
            assert!(
                route.cost <= truth * (1.0 + TIE_BREAK) + 1e-9,
                "{s}->{e}: {} vs {truth}",
                route.cost
            );
            assert!(route.cost >= truth - 1e-9);
        }
    }

    #[test]
    fn optimal_around_obstacles() {
        // A wall with openings at both ends.
        let walls: Vec<Pos> = (1..9).map(|r| Pos::new(r, 5)).collect();
        let (s, e) = (Pos::new(5, 1), Pos::new(5, 8));
        let mut b = board(10, s, e, &walls);
        let truth = true_costs(&b, s)[e.row as usize][e.col as usize];
        let outcome = run_search(&mut b, go).unwrap();
        let route = outcome.route().expect("path");
        assert!(route.cost <= truth * (1.0 + TIE_BREAK) + 1e-9);
        assert!(route.cells.iter().all(|p| !b.is_barrier(*p)));
    }

    #[test]
    fn heuristic_never_overestimates_beyond_inflation() {
        let b = Board::new(7);
        for a in b.positions() {
            let dist = true_costs(&b, a);
            for c in b.positions() {
                let truth = dist[c.row as usize][c.col as usize];
                assert!(estimate(a, c) <= truth * (1.0 + TIE_BREAK) + 1e-9);
            }
        }
    }

    #[test]
    fn predecessor_walk_matches_route_length() {
        let walls = [Pos::new(1, 1), Pos::new(2, 2), Pos::new(3, 1), Pos::new(1, 3)];
        let (s, e) = (Pos::new(0, 0), Pos::new(5, 4));
        let mut b = board(6, s, e, &walls);
        let mut marked = Vec::new();
        let outcome = run_search(&mut b, |step| {
            if let Step::Path(p) = step {
                marked.push(p);
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        let route = outcome.route().expect("path");
        assert_eq!(marked.len(), route.steps());
        assert_eq!(marked.first(), Some(&e));

        let mut cur = e;
        let mut hops = 0;
        while let Some(prev) = b.predecessor(cur) {
            cur = prev;
            hops += 1;
        }
        assert_eq!(cur, s);
        assert_eq!(hops, route.steps());
        for p in &marked {
            assert!(b.is_path(*p));
        }
        assert!(!b.is_path(s));
    }

    #[test]
    fn observer_sees_every_expansion_in_order() {
        let mut b = board(5, Pos::new(0, 0), Pos::new(0, 4), &[]);
        let mut expanded = Vec::new();
        let mut opened_total = 0;
        run_search(&mut b, |step| {
            if let Step::Expanded { cell, opened } = step {
                expanded.push(cell);
                opened_total += opened.len();
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(expanded.first(), Some(&Pos::new(0, 0)));
        // The goal is popped but not expanded.
        assert!(!expanded.contains(&Pos::new(0, 4)));
        // Every opened cell is still waiting in the frontier or was expanded
        // later; the start was expanded without being opened.
        let (start, end) = (Pos::new(0, 0), Pos::new(0, 4));
        let waiting = b
            .positions()
            .filter(|&p| b.state(p) == SearchState::Open && p != start && p != end)
            .count();
        assert_eq!(opened_total, waiting + expanded.len());
    }

    #[test]
    fn expansion_lists_neighbors_opened_in_fixed_order() {
        let mut b = board(3, Pos::new(1, 1), Pos::new(0, 0), &[]);
        let mut seen: Vec<(Pos, Vec<Pos>)> = Vec::new();
        let mut path = Vec::new();
        run_search(&mut b, |step| {
            match step {
                Step::Expanded { cell, opened } => seen.push((cell, opened.to_vec())),
                Step::Path(p) => path.push(p),
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        let around: Vec<Pos> = [(2, 1), (0, 1), (1, 2), (1, 0), (2, 2), (2, 0), (0, 2), (0, 0)]
            .into_iter()
            .map(|(r, c)| Pos::new(r, c))
            .collect();
        assert_eq!(seen, vec![(Pos::new(1, 1), around)]);
        assert_eq!(path, vec![Pos::new(0, 0)]);
    }

    #[test]
    fn open_cells_are_never_queued_twice() {
        let walls: Vec<Pos> = (1..7).map(|r| Pos::new(r, 4)).chain([Pos::new(5, 2)]).collect();
        let start = Pos::new(6, 0);
        let mut b = board(8, start, Pos::new(1, 7), &walls);
        let mut live = std::collections::HashSet::from([start]);
        run_search(&mut b, |step| {
            if let Step::Expanded { cell, opened } = step {
                assert!(live.remove(&cell), "{cell} expanded without a live entry");
                for &p in opened {
                    assert!(live.insert(p), "{p} queued while already open");
                }
            }
            ControlFlow::Continue(())
        })
        .unwrap();
    }

    #[test]
    fn straight_line_uses_straight_moves() {
        let mut b = board(5, Pos::new(2, 0), Pos::new(2, 4), &[]);
        let outcome = run_search(&mut b, go).unwrap();
        let route = outcome.route().expect("path");
        assert_eq!(route.steps(), 4);
        assert!((route.cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn cancel_stops_after_first_expansion() {
        let mut b = board(10, Pos::new(0, 0), Pos::new(9, 9), &[]);
        let mut calls = 0;
        let outcome = run_search(&mut b, |_| {
            calls += 1;
            ControlFlow::Break(())
        })
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(calls, 1);
        assert!(b.positions().all(|p| !b.is_path(p)));
    }

    #[test]
    fn refuses_without_endpoints() {
        let mut b = Board::new(4);
        b.set_start(Pos::new(0, 0)).unwrap();
        b.compute_neighbors();
        b.node_mut(Pos::new(1, 1)).unwrap().g = 7.0;
        assert_eq!(run_search(&mut b, go), Err(SearchError::MissingEndpoints));
        // Nothing was reset.
        assert_eq!(b.cost_from_start(Pos::new(1, 1)), 7.0);
    }

    #[test]
    fn refuses_stale_adjacency() {
        let mut b = board(4, Pos::new(0, 0), Pos::new(3, 3), &[]);
        b.set_barrier(Pos::new(1, 1)).unwrap();
        assert_eq!(run_search(&mut b, go), Err(SearchError::StaleAdjacency));
        b.compute_neighbors();
        let outcome = run_search(&mut b, go).unwrap();
        assert!(!outcome.route().unwrap().cells.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn rerun_resets_previous_marks() {
        let mut b = board(5, Pos::new(0, 0), Pos::new(4, 4), &[]);
        run_search(&mut b, go).unwrap();
        assert!(b.is_path(Pos::new(2, 2)));
        b.set_end(Pos::new(0, 4)).unwrap();
        run_search(&mut b, go).unwrap();
        assert!(!b.is_path(Pos::new(2, 2)));
        assert!(b.is_path(Pos::new(0, 4)));
    }

    #[test]
    fn terminates_on_larger_maze_like_board() {
        // Comb of walls with alternating gaps.
        let mut walls = Vec::new();
        for c in (2..20).step_by(3) {
            for r in 0..20 {
                let gap = if (c / 3) % 2 == 0 { 19 } else { 0 };
                if r != gap {
                    walls.push(Pos::new(r, c));
                }
            }
        }
        let (s, e) = (Pos::new(0, 0), Pos::new(19, 19));
        let mut b = board(20, s, e, &walls);
        let truth = true_costs(&b, s)[e.row as usize][e.col as usize];
        let mut expansions = 0;
        let outcome = run_search(&mut b, |step| {
            if matches!(step, Step::Expanded { .. }) {
                expansions += 1;
            }
            ControlFlow::Continue(())
        })
        .unwrap();
        assert!(expansions <= 400);
        let route = outcome.route().expect("path");
        assert!(route.cost <= truth * (1.0 + TIE_BREAK) + 1e-9);
    }
}
