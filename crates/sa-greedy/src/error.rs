use core::fmt;

use sa_core::Point2i;

use crate::chord::{Chord, StringOrder};

/// Invalid optimizer input, detected before the first iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    TooFewHooks { count: usize },
    /// The exclusion window would cover the whole boundary from every hook.
    ExclusionTooWide { distance: usize, hooks: usize },
    StartOutOfRange { start: usize, hooks: usize },
    DiscountOutOfRange(f32),
    RandomAcceptOutOfRange(f32),
    HookOutOfBounds { index: usize, point: Point2i },
    InvalidPixel { x: usize, y: usize, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewHooks { count } => {
                write!(f, "at least 3 hooks are required, got {count}")
            }
            Self::ExclusionTooWide { distance, hooks } => write!(
                f,
                "hook distance {distance} leaves no candidates on a boundary of {hooks} hooks"
            ),
            Self::StartOutOfRange { start, hooks } => {
                write!(f, "start hook {start} is outside 0..{hooks}")
            }
            Self::DiscountOutOfRange(v) => write!(f, "discount {v} is outside (0, 1]"),
            Self::RandomAcceptOutOfRange(v) => {
                write!(f, "random-accept probability {v} is outside [0, 1]")
            }
            Self::HookOutOfBounds { index, point } => write!(
                f,
                "hook {index} at ({}, {}) lies outside the image",
                point.x, point.y
            ),
            Self::InvalidPixel { x, y, value } => {
                write!(f, "pixel ({x}, {y}) has value {value}, expected [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Config(ConfigError),
    /// No unused chord with positive darkness leaves `hook`. `partial` holds
    /// every chord committed before iteration `iteration`.
    Exhausted {
        iteration: usize,
        hook: usize,
        partial: StringOrder,
    },
    DegenerateChord { chord: Chord },
    Image(sa_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Exhausted {
                iteration,
                hook,
                partial,
            } => write!(
                f,
                "no valid chord from hook {hook} at iteration {iteration} ({} chords kept)",
                partial.len()
            ),
            Self::DegenerateChord { chord } => write!(
                f,
                "chord {} -> {} joins hooks at the same position",
                chord.start, chord.end
            ),
            Self::Image(e) => write!(f, "image access failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<sa_core::Error> for Error {
    fn from(e: sa_core::Error) -> Self {
        Self::Image(e)
    }
}
