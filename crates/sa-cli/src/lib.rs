//! I/O glue around the string-art optimizer: image preprocessing, result
//! persistence and preview rendering. The `string_art` binary wires these
//! together.

mod boundary;
pub mod persist;
pub mod preprocess;
pub mod render;

pub use boundary::{Boundary, layout};
