//! Elm-architecture Model: board editing, search playback and drawing.

use std::ops::ControlFlow;

use astarviz_core::{
    Canvas, Color, Effect, Glyph, Key, Model, Modifiers, MouseAction, Msg, Point, Style,
};
use astarviz_search::{Board, Pos, Role, SearchOutcome, SearchSession, SearchState, Step};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::colors;
use crate::maze::scatter_barriers;

/// Screen columns per grid cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

/// Settings for a [`Visualizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    /// Rows and columns of the grid.
    pub size: i32,
    /// Barrier probability for random mazes.
    pub density: f64,
    pub seed: u64,
    /// Recorded steps played back per tick.
    pub steps_per_tick: usize,
    /// Expansion budget after which a search is abandoned.
    pub max_expansions: Option<usize>,
    /// Start with a random maze.
    pub maze: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            size: 50,
            density: 0.5,
            seed: 0,
            steps_per_tick: 1,
            max_expansions: None,
            maze: false,
        }
    }
}

impl AppSettings {
    /// Screen size needed: the grid plus one status line.
    pub fn screen_size(&self) -> (i32, i32) {
        (self.size * CELL_WIDTH, self.size + 1)
    }
}

/// What the visualizer is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Placing endpoints and barriers; no search has run.
    Editing,
    /// Playing back a search that already ran.
    Animating,
    /// Playback done. Edits are allowed, a new search needs a reset.
    Finished,
}

/// An owned copy of a search [`Step`], kept for playback.
#[derive(Clone, Debug, PartialEq)]
enum Replay {
    Expanded { cell: Pos, opened: Vec<Pos> },
    Path(Pos),
}

impl From<Step<'_>> for Replay {
    fn from(step: Step<'_>) -> Self {
        match step {
            Step::Expanded { cell, opened } => Self::Expanded {
                cell,
                opened: opened.to_vec(),
            },
            Step::Path(p) => Self::Path(p),
        }
    }
}

/// Displayed search marks of one cell. Trails the board while animating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Shade {
    state: SearchState,
    path: bool,
}

fn shade_index(size: i32, p: Pos) -> usize {
    p.row as usize * size as usize + p.col as usize
}

/// The visualizer model.
pub struct Visualizer {
    settings: AppSettings,
    session: SearchSession,
    rng: StdRng,
    phase: Phase,
    shades: Vec<Shade>,
    replay: Vec<Replay>,
    cursor: usize,
}

impl Visualizer {
    pub fn new(settings: AppSettings) -> Self {
        let size = settings.size.max(0);
        let mut v = Self {
            session: SearchSession::with_size(size),
            rng: StdRng::seed_from_u64(settings.seed),
            phase: Phase::Editing,
            shades: vec![Shade::default(); (size as usize) * (size as usize)],
            replay: Vec::new(),
            cursor: 0,
            settings,
        };
        if v.settings.maze {
            v.new_maze();
        }
        v
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        self.session.board()
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.session.outcome()
    }

    /// Grid cell under a screen position, if any.
    fn cell_at(&self, p: Point) -> Option<Pos> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let pos = Pos::new(p.y, p.x / CELL_WIDTH);
        self.board().contains(pos).then_some(pos)
    }

    fn shade(&self, p: Pos) -> Shade {
        self.shades[shade_index(self.board().size(), p)]
    }

    fn clear_shades(&mut self) {
        self.shades.fill(Shade::default());
        self.replay.clear();
        self.cursor = 0;
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Left click: the start first, then the end, then barriers.
    fn place(&mut self, pos: Pos) {
        let board = self.session.board_mut();
        let (start, end) = (board.start(), board.end());
        let res = if start.is_none() && end != Some(pos) {
            board.set_start(pos)
        } else if end.is_none() && start != Some(pos) {
            board.set_end(pos)
        } else if start != Some(pos) && end != Some(pos) {
            board.set_barrier(pos).map(|_| ())
        } else {
            Ok(())
        };
        if let Err(e) = res {
            log::warn!("cannot edit {pos}: {e}");
        }
    }

    /// Right click: back to a plain empty cell.
    fn erase(&mut self, pos: Pos) {
        let board = self.session.board_mut();
        if let Err(e) = board.clear_barrier(pos) {
            log::warn!("cannot erase {pos}: {e}");
            return;
        }
        if board.start() == Some(pos) {
            board.clear_start();
        }
        if board.end() == Some(pos) {
            board.clear_end();
        }
        let size = board.size();
        self.shades[shade_index(size, pos)] = Shade::default();
    }

    /// Drop start, end and all search marks; keep barriers.
    fn reset(&mut self) {
        self.session.reset();
        let board = self.session.board_mut();
        board.clear_start();
        board.clear_end();
        self.clear_shades();
        self.phase = Phase::Editing;
    }

    /// Back to an empty board.
    fn clear_all(&mut self) {
        self.session.board_mut().clear();
        self.session.reset();
        self.clear_shades();
        self.phase = Phase::Editing;
    }

    fn new_maze(&mut self) {
        self.clear_all();
        let density = self.settings.density;
        scatter_barriers(self.session.board_mut(), density, &mut self.rng);
    }

    // -----------------------------------------------------------------------
    // Search and playback
    // -----------------------------------------------------------------------

    /// Run the search to completion, recording every step for playback.
    fn start_search(&mut self) {
        if self.session.has_run() {
            return;
        }
        let budget = self.settings.max_expansions;
        let mut replay = Vec::new();
        let mut expanded = 0usize;
        let res = self.session.run(|step| {
            if let Step::Expanded { .. } = step {
                expanded += 1;
            }
            replay.push(Replay::from(step));
            match budget {
                Some(max) if expanded >= max => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        });
        match res {
            Ok(outcome) => log::info!("search done after {expanded} expansions: {outcome:?}"),
            Err(e) => {
                log::debug!("search not started: {e}");
                return;
            }
        }

        self.clear_shades();
        if let Some(start) = self.board().start() {
            let i = shade_index(self.board().size(), start);
            self.shades[i].state = SearchState::Open;
        }
        self.replay = replay;
        self.phase = Phase::Animating;
        self.advance(0);
    }

    /// Play back up to `steps` recorded steps.
    fn advance(&mut self, steps: usize) {
        let size = self.board().size();
        let start = self.board().start();
        let stop = self.cursor.saturating_add(steps).min(self.replay.len());
        for step in &self.replay[self.cursor..stop] {
            match step {
                Replay::Expanded { cell, opened } => {
                    for &p in opened {
                        self.shades[shade_index(size, p)].state = SearchState::Open;
                    }
                    if Some(*cell) != start {
                        self.shades[shade_index(size, *cell)].state = SearchState::Closed;
                    }
                }
                Replay::Path(p) => self.shades[shade_index(size, *p)].path = true,
            }
        }
        self.cursor = stop;
        if self.cursor == self.replay.len() {
            self.phase = Phase::Finished;
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Option<Effect> {
        match key {
            Key::Char('c') if modifiers.ctrl => return Some(Effect::End),
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            _ => {}
        }
        if self.phase == Phase::Animating {
            if key == Key::Enter {
                self.advance(usize::MAX);
            }
            return None;
        }
        match key {
            Key::Space => self.start_search(),
            Key::Backspace => self.new_maze(),
            Key::Char('r') => self.reset(),
            Key::Char('c') => self.clear_all(),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        if self.phase == Phase::Animating {
            return;
        }
        let Some(cell) = self.cell_at(pos) else {
            return;
        };
        match action {
            MouseAction::Main => self.place(cell),
            MouseAction::Secondary => self.erase(cell),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn cell_color(&self, pos: Pos) -> Color {
        let Some(view) = self.board().cell(pos) else {
            return Color::Default;
        };
        if view.barrier {
            return colors::BARRIER;
        }
        match view.role {
            Role::Start => colors::START,
            Role::End => colors::END,
            Role::Plain => {
                let shade = self.shade(pos);
                if shade.path {
                    colors::PATH
                } else {
                    match shade.state {
                        SearchState::Unseen => colors::EMPTY,
                        SearchState::Open => colors::OPEN,
                        SearchState::Closed => colors::CLOSED,
                    }
                }
            }
        }
    }

    fn status_line(&self) -> String {
        let board = self.board();
        match self.phase {
            Phase::Editing => match (board.start(), board.end()) {
                (None, _) => "left click: place start".to_string(),
                (Some(_), None) => "left click: place end".to_string(),
                _ => "space: search  bksp: maze  r: reset  c: clear  q: quit".to_string(),
            },
            Phase::Animating => format!(
                "searching... {}/{}  enter: skip",
                self.cursor,
                self.replay.len()
            ),
            Phase::Finished => {
                let n = self.session.expansions();
                match self.session.outcome() {
                    Some(SearchOutcome::Found(route)) => format!(
                        "found: cost {:.3}, {} moves, {n} expanded  r: reset",
                        route.cost,
                        route.steps()
                    ),
                    Some(SearchOutcome::NotFound) => format!("no path, {n} expanded  r: reset"),
                    Some(SearchOutcome::Cancelled) => {
                        format!("cancelled after {n} expansions  r: reset")
                    }
                    None => String::new(),
                }
            }
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, modifiers, .. } => self.handle_key(key, modifiers),
            Msg::Mouse { action, pos, .. } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Tick => {
                if self.phase == Phase::Animating {
                    self.advance(self.settings.steps_per_tick);
                }
                None
            }
            _ => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(Glyph::default());
        let board = self.board();
        for pos in board.positions() {
            let bg = self.cell_color(pos);
            let p = Point::new(pos.col * CELL_WIDTH, pos.row);
            let style = Style::on(bg);
            let blank = Glyph::new(' ', style);
            if bg == colors::EMPTY {
                let dot = Style {
                    fg: colors::GRID_DOT,
                    dim: true,
                    ..style
                };
                canvas.set(p, Glyph::new('·', dot));
            } else {
                canvas.set(p, blank);
            }
            for dx in 1..CELL_WIDTH {
                canvas.set(p.shift(dx, 0), blank);
            }
        }
        let bold = Style {
            bold: true,
            ..Style::default()
        };
        canvas.print(Point::new(0, board.size()), &self.status_line(), bold);
    }
}
