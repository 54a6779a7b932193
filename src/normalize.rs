//! Normalization and deduplication: pending draws → `VectorDocument`.
//!
//! The pipeline computes global bounds (clip geometry included), optionally
//! strips one frame/border draw, flips device coordinates into the canonical
//! scene space (increasing source Y maps to decreasing output Y), and
//! structurally deduplicates paths so geometrically identical input yields
//! a byte-stable path table.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::convert::BorderTolerance;
use crate::geometry::{PendingPath, Point, VectorSegment};
use crate::scene::{ClipRef, PendingDraw, VectorDocument, VectorDraw, VectorPath};

/// Axis-aligned bounding box accumulator.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn new() -> Self {
        Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn add_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn add_segment(&mut self, seg: &VectorSegment) {
        match seg {
            VectorSegment::Move { to } | VectorSegment::Line { to } => self.add_point(*to),
            VectorSegment::Quad { ctrl, to } => {
                self.add_point(*ctrl);
                self.add_point(*to);
            }
            VectorSegment::Cubic { ctrl1, ctrl2, to } => {
                self.add_point(*ctrl1);
                self.add_point(*ctrl2);
                self.add_point(*to);
            }
            VectorSegment::Arc { center, radius, .. } => {
                // Conservative: the rotated ellipse fits in center ± radius.
                self.add_point(Point::new(center.x - radius.0, center.y - radius.1));
                self.add_point(Point::new(center.x + radius.0, center.y + radius.1));
            }
            VectorSegment::Close => {}
        }
    }

    fn add_path(&mut self, path: &PendingPath) {
        for seg in &path.segments {
            self.add_segment(seg);
        }
    }

    fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Build the canonical document from device-space pending draws.
///
/// `origin_out` receives the pre-flip translation offset when the bounds
/// are finite.
pub fn build_document(
    draws: Vec<PendingDraw>,
    remove_border: bool,
    tolerance: BorderTolerance,
) -> (VectorDocument, Option<Point>) {
    // 1. Global bounds over draw and clip geometry alike; clip-only
    //    geometry still affects framing.
    let mut bounds = Bounds::new();
    for draw in &draws {
        bounds.add_path(&draw.path);
        for clip in &draw.clip_stack {
            bounds.add_path(&clip.path);
        }
    }

    // 2. Fully degenerate input yields the explicit empty document.
    if !bounds.is_finite() {
        return (VectorDocument::empty(), None);
    }

    let width = (bounds.max_x - bounds.min_x).max(1.0);
    let height = (bounds.max_y - bounds.min_y).max(1.0);

    // 3. Optionally drop one frame/border draw.
    let draws = if remove_border {
        strip_border(draws, &bounds, width, height, tolerance)
    } else {
        draws
    };

    // 4. Flip into canonical space and deduplicate paths structurally.
    let mut dedup = PathTable::new();
    let mut out_draws = Vec::with_capacity(draws.len());
    for (i, draw) in draws.into_iter().enumerate() {
        let path_id = dedup.intern(normalize_path(&draw.path, &bounds, height));
        let clip_stack = if draw.clip_stack.is_empty() {
            None
        } else {
            Some(
                draw.clip_stack
                    .iter()
                    .map(|clip| ClipRef {
                        path_id: dedup.intern(normalize_path(&clip.path, &bounds, height)),
                        fill_rule: clip.fill_rule,
                    })
                    .collect(),
            )
        };
        out_draws.push(VectorDraw {
            id: i as u32,
            path_id,
            style: draw.style,
            clip_stack,
        });
    }

    let doc = VectorDocument {
        version: 1,
        width,
        height,
        origin: None,
        paths: dedup.into_paths(),
        draws: out_draws,
    };
    (doc, Some(Point::new(bounds.min_x, bounds.min_y)))
}

/// Remove at most one draw that looks like a page frame: stroke-only,
/// closed, at least four line segments, and a bounding box matching the
/// global bounds within the configured tolerance on all four sides.
fn strip_border(
    mut draws: Vec<PendingDraw>,
    global: &Bounds,
    width: f64,
    height: f64,
    tolerance: BorderTolerance,
) -> Vec<PendingDraw> {
    let tol = tolerance.resolve(width, height);

    let candidate = draws.iter().position(|draw| {
        if !draw.style.is_stroke_only() {
            return false;
        }
        // The close operation contributes the final edge of a frame.
        if !draw.path.closed || draw.path.line_count() + 1 < 4 {
            return false;
        }
        let mut own = Bounds::new();
        own.add_path(&draw.path);
        own.is_finite()
            && (own.min_x - global.min_x).abs() <= tol
            && (own.min_y - global.min_y).abs() <= tol
            && (own.max_x - global.max_x).abs() <= tol
            && (own.max_y - global.max_y).abs() <= tol
    });

    if let Some(i) = candidate {
        draws.remove(i);
    }
    draws
}

fn flip(p: Point, bounds: &Bounds, height: f64) -> Point {
    Point::new(p.x - bounds.min_x, height - (p.y - bounds.min_y))
}

/// Map a device-space path into the canonical scene space.
fn normalize_path(path: &PendingPath, bounds: &Bounds, height: f64) -> PendingPath {
    let segments = path
        .segments
        .iter()
        .map(|seg| match *seg {
            VectorSegment::Move { to } => VectorSegment::Move {
                to: flip(to, bounds, height),
            },
            VectorSegment::Line { to } => VectorSegment::Line {
                to: flip(to, bounds, height),
            },
            VectorSegment::Quad { ctrl, to } => VectorSegment::Quad {
                ctrl: flip(ctrl, bounds, height),
                to: flip(to, bounds, height),
            },
            VectorSegment::Cubic { ctrl1, ctrl2, to } => VectorSegment::Cubic {
                ctrl1: flip(ctrl1, bounds, height),
                ctrl2: flip(ctrl2, bounds, height),
                to: flip(to, bounds, height),
            },
            VectorSegment::Arc {
                center,
                radius,
                rotation,
                start_angle,
                end_angle,
                ccw,
            } => VectorSegment::Arc {
                center: flip(center, bounds, height),
                radius,
                // Mirroring about the x-axis negates angles and reverses
                // the sweep direction.
                rotation: -rotation,
                start_angle: -start_angle,
                end_angle: -end_angle,
                ccw: !ccw,
            },
            VectorSegment::Close => VectorSegment::Close,
        })
        .collect();
    PendingPath {
        segments,
        closed: path.closed,
    }
}

/// Interning table mapping structural path keys to stable ids.
struct PathTable {
    ids: FxHashMap<String, u32>,
    paths: Vec<VectorPath>,
}

impl PathTable {
    fn new() -> Self {
        PathTable {
            ids: FxHashMap::default(),
            paths: Vec::new(),
        }
    }

    /// Intern a normalized path, returning the id of its first structural
    /// occurrence.
    fn intern(&mut self, path: PendingPath) -> u32 {
        let key = structural_key(&path);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.paths.len() as u32;
        self.ids.insert(key, id);
        self.paths.push(VectorPath {
            id,
            segments: path.segments,
            closed: path.closed,
        });
        id
    }

    fn into_paths(self) -> Vec<VectorPath> {
        self.paths
    }
}

/// Round to four decimal places for the structural key.
fn round4(v: f64) -> f64 {
    let r = (v * 10_000.0).round() / 10_000.0;
    // Avoid distinct keys for 0.0 and -0.0.
    if r == 0.0 { 0.0 } else { r }
}

/// Structural key: every segment field rounded to 4 decimals plus the
/// closed flag. Paths with equal keys collapse to one stored entity.
fn structural_key(path: &PendingPath) -> String {
    let mut key = String::with_capacity(path.segments.len() * 16 + 4);
    for seg in &path.segments {
        match *seg {
            VectorSegment::Move { to } => {
                let _ = write!(key, "M{},{};", round4(to.x), round4(to.y));
            }
            VectorSegment::Line { to } => {
                let _ = write!(key, "L{},{};", round4(to.x), round4(to.y));
            }
            VectorSegment::Quad { ctrl, to } => {
                let _ = write!(
                    key,
                    "Q{},{},{},{};",
                    round4(ctrl.x),
                    round4(ctrl.y),
                    round4(to.x),
                    round4(to.y)
                );
            }
            VectorSegment::Cubic { ctrl1, ctrl2, to } => {
                let _ = write!(
                    key,
                    "C{},{},{},{},{},{};",
                    round4(ctrl1.x),
                    round4(ctrl1.y),
                    round4(ctrl2.x),
                    round4(ctrl2.y),
                    round4(to.x),
                    round4(to.y)
                );
            }
            VectorSegment::Arc {
                center,
                radius,
                rotation,
                start_angle,
                end_angle,
                ccw,
            } => {
                let _ = write!(
                    key,
                    "A{},{},{},{},{},{},{},{};",
                    round4(center.x),
                    round4(center.y),
                    round4(radius.0),
                    round4(radius.1),
                    round4(rotation),
                    round4(start_angle),
                    round4(end_angle),
                    u8::from(ccw)
                );
            }
            VectorSegment::Close => key.push_str("Z;"),
        }
    }
    let _ = write!(key, "|{}", u8::from(path.closed));
    key
}
