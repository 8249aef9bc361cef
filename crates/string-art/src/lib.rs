//! Umbrella crate for the `string-art` workspace.
//!
//! Re-exports the image primitives, hook layouts and the greedy optimizer so
//! a single dependency is enough to go from a grayscale image to a thread path.
//! The optimizer's [`Error`] is the crate-level error; image and geometry
//! failures surface as [`ImageError`].

pub use sa_core::Error as ImageError;
pub use sa_core::{
    Image, ImageView, ImageViewMut, Point2i, rasterize, rasterize_into, sample_count, to_unit_f32,
};
pub use sa_greedy::*;
pub use sa_hooks::*;
