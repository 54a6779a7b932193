//! Graphics state for content-stream interpretation.
//!
//! The interpreter owns one live state plus a save/restore stack. State is
//! value-cloned on `save` (matrix, dash array, and clip stack included) so
//! a restored state never shares buffers with the scope it left.

use smallvec::SmallVec;

use crate::geometry::Matrix;
use crate::scene::{LineCap, LineJoin, PendingClip};
use crate::style::Rgb;

/// Minimum line width; thinner strokes would rasterize to nothing.
pub const MIN_LINE_WIDTH: f64 = 0.05;

/// The graphics state tracked per save/restore scope.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix (user space → page space).
    pub ctm: Matrix,

    /// Stroke color; `None` is transparent.
    pub stroke_color: Option<Rgb>,

    /// Fill color; `None` is transparent.
    pub fill_color: Option<Rgb>,

    /// Line width in user space units, floored at `MIN_LINE_WIDTH`.
    pub line_width: f64,

    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,

    /// Dash pattern in user space units.
    pub dash: SmallVec<[f64; 4]>,
    pub dash_offset: f64,

    /// Stroke alpha (`CA`), clamped to `[0, 1]`.
    pub stroke_alpha: f64,

    /// Fill alpha (`ca`), clamped to `[0, 1]`.
    pub fill_alpha: f64,

    /// Clip regions active in this scope, innermost last.
    pub clip_stack: Vec<PendingClip>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            ctm: Matrix::IDENTITY,
            stroke_color: Some(Rgb::BLACK),
            fill_color: Some(Rgb::BLACK),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash: SmallVec::new(),
            dash_offset: 0.0,
            stroke_alpha: 1.0,
            fill_alpha: 1.0,
            clip_stack: Vec::new(),
        }
    }
}

impl GraphicsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line width, applying the minimum floor.
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width.max(MIN_LINE_WIDTH);
    }

    /// Set the stroke alpha, clamped to `[0, 1]`.
    pub fn set_stroke_alpha(&mut self, alpha: f64) {
        self.stroke_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Set the fill alpha, clamped to `[0, 1]`.
    pub fn set_fill_alpha(&mut self, alpha: f64) {
        self.fill_alpha = alpha.clamp(0.0, 1.0);
    }
}
