//! The Elm-architecture application loop: [`Model`], [`Driver`], [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::canvas::{Canvas, Frame, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Forward pending input to `tx`. Should return promptly (after a short
    /// poll timeout at most) and stop early once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// Interval between [`Msg::Tick`] messages; `None` disables ticking.
    pub tick: Option<Duration>,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    tick: Option<Duration>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            tick: config.tick,
        }
    }

    /// The model, e.g. for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    ///
    /// Each iteration polls the driver, emits a tick when one is due, then
    /// feeds every queued message to the model and flushes the diff of the
    /// redrawn canvas.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);
        let mut last_tick = Instant::now();

        log::debug!("app loop starting ({}x{})", self.width, self.height);
        let result = loop {
            if let Err(e) = self.process_pending(&rx, &ctx, &mut prev, &mut curr) {
                break Err(e);
            }
            if ctx.is_done() {
                break Ok(());
            }
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                ctx.cancel();
                break Err(e);
            }
            if let Some(every) = self.tick {
                if last_tick.elapsed() >= every {
                    last_tick = Instant::now();
                    tx.send(Msg::Tick).ok();
                }
            }
        };

        self.driver.close();
        log::debug!("app loop stopped");
        result
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            let quit = matches!(msg, Msg::Quit);
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            if quit {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.glyphs.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.clone_from(curr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::messages::Key;
    use std::collections::VecDeque;

    /// Counts key presses and ticks; ends on `q`.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        ticks: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown {
                    key: Key::Char('q'),
                    ..
                } => Some(Effect::End),
                Msg::KeyDown { .. } => {
                    self.keys += 1;
                    None
                }
                Msg::Tick => {
                    self.ticks += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, canvas: &mut Canvas) {
            canvas.print(Point::ZERO, &self.keys.to_string(), Default::default());
        }
    }

    /// Replays one batch of messages per poll and records flushed frames.
    #[derive(Default)]
    struct Scripted {
        script: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            match self.script.pop_front() {
                Some(batch) => {
                    for m in batch {
                        tx.send(m).ok();
                    }
                    Ok(())
                }
                None => Err("script exhausted".into()),
            }
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn app(script: Vec<Vec<Msg>>, tick: Option<Duration>) -> App<Counter, Scripted> {
        App::new(AppConfig {
            model: Counter::default(),
            driver: Scripted {
                script: script.into(),
                ..Default::default()
            },
            width: 4,
            height: 1,
            tick,
        })
    }

    #[test]
    fn runs_until_model_ends() {
        let mut a = app(
            vec![
                vec![Msg::key(Key::Space), Msg::key(Key::Enter)],
                vec![Msg::key(Key::Char('q'))],
            ],
            None,
        );
        a.run().unwrap();
        assert_eq!(a.model().keys, 2);
        assert!(a.driver.closed);
        // Init draws "0", then the batch redraws "2".
        assert_eq!(a.driver.frames.len(), 2);
        assert_eq!(a.driver.frames[1].glyphs[0].glyph.ch, '2');
    }

    #[test]
    fn quit_message_stops_the_loop() {
        let mut a = app(vec![vec![Msg::Quit], vec![Msg::key(Key::Space)]], None);
        a.run().unwrap();
        assert_eq!(a.model().keys, 0);
    }

    #[test]
    fn driver_errors_propagate_and_close() {
        let mut a = app(vec![vec![Msg::key(Key::Space)]], None);
        assert!(a.run().is_err());
        assert!(a.driver.closed);
    }

    #[test]
    fn zero_interval_ticks_every_iteration() {
        let mut a = app(
            vec![vec![], vec![], vec![Msg::key(Key::Char('q'))]],
            Some(Duration::ZERO),
        );
        a.run().unwrap();
        assert!(a.model().ticks >= 2);
    }
}
