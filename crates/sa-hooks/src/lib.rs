//! Hook layouts for string-art boundaries.
//!
//! A [`HookSet`] is an ordered list of pixel coordinates. Hook indices follow
//! generation order and are the only way chords refer to hooks.
//!
//! Layouts:
//! - [`circle_hooks`]: evenly spaced angles over a closed turn, so the first
//!   and last hook share a coordinate.
//! - [`rectangle_hooks`]: hooks spread along the four sides in proportion to
//!   side length, with one fewer hook on the closing sides to break rotational
//!   symmetry. Shared corners are removed, so the returned count may differ
//!   from the requested one.

mod circle;
mod hookset;
mod rectangle;

pub use circle::circle_hooks;
pub use hookset::HookSet;
pub use rectangle::rectangle_hooks;
