//! The canonical vector scene model.
//!
//! Intermediate, device-space values (`PendingPath`, `PendingClip`,
//! `PendingDraw`) are produced by the front-ends; the normalization stage
//! turns them into an immutable `VectorDocument` with deduplicated paths
//! and painter's-order draws.

use crate::geometry::{PendingPath, Point};
use crate::style::Rgb;

/// Line cap style (PDF spec 8.4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    /// Butt cap (default) - stroke is squared off at the endpoint
    #[default]
    Butt = 0,
    /// Round cap - semicircular arc with center at endpoint
    Round = 1,
    /// Projecting square cap - stroke continues beyond endpoint
    Square = 2,
}

impl LineCap {
    /// Map a PDF integer operand to a cap style; out-of-range values keep
    /// the default.
    pub fn from_pdf(v: i64) -> Self {
        match v {
            1 => LineCap::Round,
            2 => LineCap::Square,
            _ => LineCap::Butt,
        }
    }
}

/// Line join style (PDF spec 8.4.3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    /// Miter join (default) - outer edges meet at a sharp point
    #[default]
    Miter = 0,
    /// Round join - circular arc between the edges
    Round = 1,
    /// Bevel join - outer edges meet at a beveled edge
    Bevel = 2,
}

impl LineJoin {
    pub fn from_pdf(v: i64) -> Self {
        match v {
            1 => LineJoin::Round,
            2 => LineJoin::Bevel,
            _ => LineJoin::Miter,
        }
    }
}

/// Fill rule for path interiors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Nonzero winding number rule (default for most operations)
    #[default]
    NonZero,
    /// Even-odd rule
    EvenOdd,
}

/// Stroke component of a style.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Stroke width in device units.
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    /// Dash pattern in device units, when set.
    pub dash: Option<Vec<f64>>,
    pub dash_offset: Option<f64>,
}

/// Fill component of a style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Rgb,
}

/// Complete style for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStyle {
    pub stroke: Option<StrokeStyle>,
    pub fill: Option<FillStyle>,
    pub fill_rule: FillRule,
    /// Draw opacity in `[0, 1]`.
    pub opacity: f64,
}

impl VectorStyle {
    /// True when the style has a visible stroke and no opaque fill, the
    /// shape class the border-removal heuristic considers.
    pub fn is_stroke_only(&self) -> bool {
        self.fill.is_none()
            && self.stroke.as_ref().is_some_and(|s| s.width > 0.0)
    }
}

/// A clip region captured as an immutable snapshot at clip-op time.
///
/// Later mutation of the live path buffer never affects an already
/// captured clip.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingClip {
    pub path: PendingPath,
    pub fill_rule: FillRule,
}

/// A device-space draw awaiting normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDraw {
    pub path: PendingPath,
    pub style: VectorStyle,
    /// Snapshot of the state's clip stack at paint time.
    pub clip_stack: Vec<PendingClip>,
}

/// A deduplicated path stored once in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    pub id: u32,
    pub segments: Vec<crate::geometry::VectorSegment>,
    pub closed: bool,
}

/// A clip entry on a draw, referencing a stored path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRef {
    pub path_id: u32,
    pub fill_rule: FillRule,
}

/// One paint operation in painter's order (later = on top).
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDraw {
    pub id: u32,
    pub path_id: u32,
    pub style: VectorStyle,
    pub clip_stack: Option<Vec<ClipRef>>,
}

/// The canonical vector scene. Created once per conversion call and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    /// Format version; always 1.
    pub version: u32,
    pub width: f64,
    pub height: f64,
    /// Pre-normalization translation offset (PDF conversions only).
    pub origin: Option<Point>,
    pub paths: Vec<VectorPath>,
    pub draws: Vec<VectorDraw>,
}

impl VectorDocument {
    /// The empty document emitted for fully degenerate input.
    pub fn empty() -> Self {
        VectorDocument {
            version: 1,
            width: 0.0,
            height: 0.0,
            origin: None,
            paths: Vec::new(),
            draws: Vec::new(),
        }
    }
}
