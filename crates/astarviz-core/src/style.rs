//! How glyphs are painted: [`Color`] and [`Style`].

/// A glyph colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Whatever the terminal uses.
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

/// Colours and emphasis of one glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    /// Faint foreground.
    pub dim: bool,
}

impl Style {
    /// Plain text on a `bg` background.
    #[inline]
    pub const fn on(bg: Color) -> Self {
        Self {
            fg: Color::Default,
            bg,
            bold: false,
            dim: false,
        }
    }
}
