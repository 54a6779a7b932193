//! Page-description → canonical vector scene conversion.
//!
//! This crate interprets PDF content-stream operator lists and SVG
//! path-data strings into a shared scene model: a flat table of
//! deduplicated paths plus an ordered list of draw commands referencing
//! them. The output is resolution-independent, lives in a canonical
//! Y-up-flipped coordinate space anchored at the content's bounding box,
//! and is stable across repeated conversions of the same input.
//!
//! The typical entry points are [`convert::convert_page`] for PDF pages,
//! [`convert::convert_svg_path`] for standalone path data, and
//! [`convert::ConversionCache`] when the same pages are requested
//! repeatedly.

pub mod convert;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod pdf;
pub mod scene;
pub mod style;
pub mod svg;

pub use convert::{
    BorderTolerance, ConversionCache, ConvertOptions, PageSource, convert_page, convert_svg_path,
};
pub use error::{VectorError, VectorResult};
pub use geometry::{Matrix, PendingPath, Point, VectorSegment};
pub use scene::{VectorDocument, VectorDraw, VectorPath, VectorStyle};
pub use style::{ColorScheme, Rgb};
