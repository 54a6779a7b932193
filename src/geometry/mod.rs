//! Shared geometry primitives: points, affine matrices, and the segment
//! model used by both the PDF and SVG front-ends.

pub mod matrix;
pub mod path;

pub use matrix::Matrix;
pub use path::{PendingPath, Point, VectorSegment};
