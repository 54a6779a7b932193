//! The shared vector segment and path model.
//!
//! Paths are built incrementally from move, line, curve, arc, and close
//! segments, similar to how PDF content streams and SVG path data both
//! construct paths. All point fields are absolute coordinates in the
//! coordinate space active when the segment was recorded (device space for
//! the PDF interpreter, markup space for the SVG parser).

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A single path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorSegment {
    /// Start a new subpath at `to`.
    Move { to: Point },
    /// Straight line to `to`.
    Line { to: Point },
    /// Quadratic Bézier with control point `ctrl`.
    Quad { ctrl: Point, to: Point },
    /// Cubic Bézier with control points `ctrl1` and `ctrl2`.
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    /// Elliptical arc in center parameterization.
    Arc {
        center: Point,
        /// `(rx, ry)` semi-axes.
        radius: (f64, f64),
        /// Rotation of the ellipse x-axis, in radians.
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        /// Counterclockwise sweep direction.
        ccw: bool,
    },
    /// Close the current subpath.
    Close,
}

/// An ordered list of segments plus a closed flag.
///
/// `closed` is true if a `Close` segment is present or a paint operator
/// forced closure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingPath {
    pub segments: Vec<VectorSegment>,
    pub closed: bool,
}

impl PendingPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from recorded segments, deriving `closed` from the
    /// presence of a `Close` segment (optionally forced by the caller).
    pub fn from_segments(segments: Vec<VectorSegment>, force_closed: bool) -> Self {
        let closed =
            force_closed || segments.iter().any(|s| matches!(s, VectorSegment::Close));
        PendingPath { segments, closed }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Count of straight-line segments (used by the border heuristic).
    pub fn line_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, VectorSegment::Line { .. }))
            .count()
    }
}
