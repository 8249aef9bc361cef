use core::fmt;

use crate::geom::Point2i;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    TooSmall { width: usize, height: usize },
    /// A segment whose endpoints coincide has no samples to rasterize.
    DegenerateSegment { at: Point2i },
    TooFewHooks { count: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::TooSmall { width, height } => {
                write!(f, "image of {width}x{height} pixels is too small")
            }
            Self::DegenerateSegment { at } => {
                write!(f, "degenerate segment: both endpoints at ({}, {})", at.x, at.y)
            }
            Self::TooFewHooks { count } => {
                write!(f, "at least 3 hooks are required, got {count}")
            }
        }
    }
}

impl std::error::Error for Error {}
