//! The [`Canvas`] screen buffer of [`Glyph`]s, and frame diffing.

use crate::geom::{Point, Range};
use crate::style::Style;

/// A styled character on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A fixed-size screen buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Create a canvas filled with blank glyphs.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); (w as usize) * (h as usize)],
            width: w,
            height: h,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The full canvas area.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds().contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Glyph at `p`, or a blank glyph outside the canvas.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the canvas.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every position with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` starting at `p`, clipped to the canvas. Returns the
    /// number of glyphs written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.bounds().contains(q) {
                break;
            }
            self.set(q, Glyph::new(ch, style));
            written += 1;
        }
        written
    }

    /// Row-major text of line `y`, ignoring styles.
    pub fn line_text(&self, y: i32) -> String {
        self.bounds().line(y).iter().map(|p| self.at(p).ch).collect()
    }
}

/// A glyph that changed between two frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameGlyph {
    pub glyph: Glyph,
    pub pos: Point,
}

/// The set of glyph changes to flush to a driver.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
    pub width: i32,
    pub height: i32,
}

/// Diff two same-sized canvases, keeping only positions that differ.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let glyphs = curr
        .bounds()
        .iter()
        .filter_map(|p| {
            let g = curr.at(p);
            (prev.at(p) != g).then_some(FrameGlyph { glyph: g, pos: p })
        })
        .collect();
    Frame {
        glyphs,
        width: curr.width(),
        height: curr.height(),
    }
}
