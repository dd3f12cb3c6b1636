//! Crossterm terminal driver for astarviz.
//!
//! [`CrosstermDriver`] implements [`astarviz_core::Driver`]: it switches the
//! terminal to raw mode on an alternate screen, turns crossterm events into
//! [`Msg`]s and paints frame diffs.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use astarviz_core::{Color, Context, Driver, Frame, Key, Modifiers, MouseAction, Msg, Point};

fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn to_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

fn to_mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    let button = |b: MouseButton| match b {
        MouseButton::Left => MouseAction::Main,
        MouseButton::Right => MouseAction::Secondary,
        MouseButton::Middle => MouseAction::Auxiliary,
    };
    match kind {
        MouseEventKind::Down(b) | MouseEventKind::Drag(b) => Some(button(b)),
        MouseEventKind::Up(_) => Some(MouseAction::Release),
        MouseEventKind::Moved => Some(MouseAction::Move),
        _ => None,
    }
}

/// Translate a crossterm event into a message, if it maps to one.
fn to_msg(ev: Event) -> Option<Msg> {
    let time = Instant::now();
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => Some(Msg::KeyDown {
            key: to_key(code)?,
            modifiers: to_modifiers(modifiers),
            time,
        }),
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers,
        }) => Some(Msg::Mouse {
            action: to_mouse_action(kind)?,
            pos: Point::new(i32::from(column), i32::from(row)),
            modifiers: to_modifiers(modifiers),
            time,
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: i32::from(w),
            height: i32::from(h),
            time,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    poll_timeout: Duration,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            poll_timeout: Duration::from_millis(16),
        }
    }

    /// How long a poll waits for the first event. Bounds the tick
    /// resolution of the app loop.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised, poll timeout {:?}", self.poll_timeout);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();
        for fg in &frame.glyphs {
            let (p, g) = (fg.pos, fg.glyph);
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(g.style.fg)),
                SetBackgroundColor(to_ct_color(g.style.bg))
            )?;
            if g.style.bold {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            if g.style.dim {
                queue!(stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(stdout, Print(g.ch))?;
            if g.style.bold || g.style.dim {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
