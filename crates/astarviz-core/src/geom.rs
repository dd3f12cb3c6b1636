//! Screen geometry: [`Point`] and [`Range`].

/// A screen position. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A half-open rectangle \[min, max) of screen positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Range spanning two corners, in either order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Whether the range has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row `y` of the range, counted from `min.y`. Empty when out of bounds.
    pub fn line(self, y: i32) -> Self {
        let row = self.min.y + y;
        if y < 0 || row >= self.max.y {
            return Self::default();
        }
        Self {
            min: Point::new(self.min.x, row),
            max: Point::new(self.max.x, row + 1),
        }
    }

    /// Row-major iterator over every point in the range.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        let Range { min, max } = self;
        let cols = if self.is_empty() { min.x..min.x } else { min.x..max.x };
        (min.y..max.y).flat_map(move |y| cols.clone().map(move |x| Point::new(x, y)))
    }
}
