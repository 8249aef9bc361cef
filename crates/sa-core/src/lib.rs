//! Foundational primitives for string-art generation.
//!
//! ## Images
//! [`Image`] is an owned, row-major buffer; [`ImageView`] and [`ImageViewMut`]
//! borrow it. Intensities used by the optimizer are `f32` in `[0, 1]` with
//! `1.0` meaning white.
//!
//! ## Coordinates
//! [`Point2i`] addresses pixels as `(x, y) = (column, row)`. Signed coordinates
//! are accepted everywhere and validated against the image bounds on access.
//!
//! ## Rasterization
//! [`rasterize`] turns a segment between two pixels into a sample path, see
//! the [`raster`] module for the exact sampling rule.

mod error;
mod geom;
mod image;
pub mod raster;

pub use error::Error;
pub use geom::Point2i;
pub use image::{Image, ImageView, ImageViewMut, to_unit_f32};
pub use raster::{rasterize, rasterize_into, sample_count};
