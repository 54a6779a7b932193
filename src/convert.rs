//! Conversion entry points and the per-page document cache.
//!
//! [`convert_page`] drives the content-stream interpreter for one page and
//! normalizes the result; [`convert_svg_path`] does the same for a single
//! SVG path-data string. [`ConversionCache`] memoizes finished documents
//! keyed by page identity and option fingerprint, collapsing concurrent
//! requests for the same key into a single conversion.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, OnceLock};

use lru::LruCache;
use rustc_hash::FxHasher;

use crate::error::VectorResult;
use crate::geometry::{Matrix, PendingPath};
use crate::normalize::build_document;
use crate::pdf::{ContentStreamInterpreter, OperatorList};
use crate::scene::{
    FillRule, LineCap, LineJoin, PendingDraw, StrokeStyle, VectorDocument, VectorStyle,
};
use crate::style::{ColorScheme, Rgb};
use crate::svg::parse_path_data;

/// A renderable page: something that can produce an operator list and a
/// device transform for a requested scale.
pub trait PageSource {
    /// Stable identity of the underlying page, used as the cache key.
    fn identity(&self) -> u64;

    /// The page's content as a flat operator list. May be expensive; the
    /// cache guarantees at most one call per (identity, options) pair.
    fn operator_list(&self) -> VectorResult<OperatorList>;

    /// Page-space → device-space transform at the given scale.
    fn viewport(&self, scale: f64) -> Matrix;
}

/// Tolerance for frame/border detection, resolved against the document
/// extent at conversion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderTolerance {
    /// Absolute floor in device units.
    pub floor: f64,
    /// Fraction of the smaller document dimension.
    pub ratio: f64,
}

impl Default for BorderTolerance {
    fn default() -> Self {
        BorderTolerance {
            floor: 2.0,
            ratio: 0.005,
        }
    }
}

impl BorderTolerance {
    pub fn resolve(&self, width: f64, height: f64) -> f64 {
        self.floor.max(self.ratio * width.min(height))
    }
}

/// Options controlling one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Rendering scale passed through to the page viewport.
    pub scale: f64,
    pub color_scheme: ColorScheme,
    /// Override color for [`ColorScheme::Monochrome`].
    pub custom_color: Option<Rgb>,
    /// Strip a page-frame draw when one is detected. Off by default; only
    /// page conversions honor it, [`convert_svg_path`] has no frame to
    /// strip and ignores the flag.
    pub remove_border: bool,
    pub border_tolerance: BorderTolerance,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            scale: 1.0,
            color_scheme: ColorScheme::Normal,
            custom_color: None,
            remove_border: false,
            border_tolerance: BorderTolerance::default(),
        }
    }
}

impl ConvertOptions {
    /// Collapse the options into a cache-key fingerprint. Floats hash by
    /// bit pattern, so `0.0` and `-0.0` are distinct keys; callers pass
    /// canonical values.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FxHasher::default();
        self.scale.to_bits().hash(&mut h);
        (self.color_scheme == ColorScheme::Monochrome).hash(&mut h);
        match self.custom_color {
            Some(c) => (1u8, c.r, c.g, c.b).hash(&mut h),
            None => 0u8.hash(&mut h),
        }
        self.remove_border.hash(&mut h);
        self.border_tolerance.floor.to_bits().hash(&mut h);
        self.border_tolerance.ratio.to_bits().hash(&mut h);
        h.finish()
    }
}

/// Convert one page into a canonical vector document.
pub fn convert_page<P: PageSource>(
    page: &P,
    options: &ConvertOptions,
) -> VectorResult<VectorDocument> {
    let list = page.operator_list()?;
    let viewport = page.viewport(options.scale);
    let interpreter =
        ContentStreamInterpreter::new(viewport, options.color_scheme, options.custom_color);
    let draws = interpreter.run(&list);
    log::debug!(
        "interpreted {} operations into {} draws",
        list.len(),
        draws.len()
    );

    let (mut doc, origin) = build_document(draws, options.remove_border, options.border_tolerance);
    doc.origin = origin;
    Ok(doc)
}

/// Convert a standalone SVG path-data string into a single stroked draw.
///
/// The path is rendered stroke-only in black (or the monochrome override)
/// at unit width. Frame detection does not apply and the document carries
/// no origin.
pub fn convert_svg_path(d: &str, options: &ConvertOptions) -> VectorDocument {
    let segments = parse_path_data(d);
    if segments.is_empty() {
        return VectorDocument::empty();
    }
    let path = PendingPath::from_segments(segments, false);
    let color = options
        .color_scheme
        .apply(Some(Rgb::BLACK), options.custom_color)
        .unwrap_or(Rgb::BLACK);
    let draw = PendingDraw {
        path,
        style: VectorStyle {
            stroke: Some(StrokeStyle {
                color,
                width: 1.0,
                cap: LineCap::default(),
                join: LineJoin::default(),
                miter_limit: 10.0,
                dash: None,
                dash_offset: None,
            }),
            fill: None,
            fill_rule: FillRule::NonZero,
            opacity: 1.0,
        },
        clip_stack: Vec::new(),
    };
    let (doc, _) = build_document(vec![draw], false, options.border_tolerance);
    doc
}

type CacheCell = Arc<OnceLock<VectorResult<Arc<VectorDocument>>>>;

/// LRU cache of converted documents with request collapsing.
///
/// Each key owns a `OnceLock` cell; the first caller for a key runs the
/// conversion inside `get_or_init` while later callers for the same key
/// block on the cell instead of converting again. Errors are cached like
/// successes so a failing page is not re-interpreted on every request.
pub struct ConversionCache {
    cells: Mutex<LruCache<(u64, u64), CacheCell>>,
}

impl ConversionCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        ConversionCache {
            cells: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fetch the document for `page` under `options`, converting at most
    /// once per (identity, fingerprint) pair while the entry is resident.
    pub fn get_or_convert<P: PageSource>(
        &self,
        page: &P,
        options: &ConvertOptions,
    ) -> VectorResult<Arc<VectorDocument>> {
        let key = (page.identity(), options.fingerprint());
        let cell = {
            let mut cells = match self.cells.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            cells
                .get_or_insert(key, || Arc::new(OnceLock::new()))
                .clone()
        };
        cell.get_or_init(|| convert_page(page, options).map(Arc::new))
            .clone()
    }

    pub fn len(&self) -> usize {
        match self.cells.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached documents.
    pub fn clear(&self) {
        match self.cells.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
