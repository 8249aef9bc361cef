use core::ops::{Add, Sub};

/// Integer pixel coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds real coordinates half-to-even onto the pixel grid.
    pub fn round_from(x: f64, y: f64) -> Self {
        Self {
            x: x.round_ties_even() as i32,
            y: y.round_ties_even() as i32,
        }
    }

    /// Largest absolute per-axis difference to `other`.
    pub fn chebyshev(self, other: Self) -> u32 {
        let d = other - self;
        d.x.unsigned_abs().max(d.y.unsigned_abs())
    }

    pub fn distance(self, other: Self) -> f64 {
        let d = other - self;
        let (dx, dy) = (d.x as f64, d.y as f64);
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `(x, y)` as indices if the point lies inside a `width x height` grid.
    pub fn to_index(self, width: usize, height: usize) -> Option<(usize, usize)> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        let (x, y) = (self.x as usize, self.y as usize);
        (x < width && y < height).then_some((x, y))
    }
}

impl Add for Point2i {
    type Output = Point2i;

    fn add(self, rhs: Point2i) -> Self::Output {
        Point2i {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point2i {
    type Output = Point2i;

    fn sub(self, rhs: Point2i) -> Self::Output {
        Point2i {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
