//! Colorspace resolution and color-scheme post-processing.
//!
//! PDF color operators carry 1 (gray), 3 (RGB), or 4 (CMYK) numeric
//! components in `[0, 1]`; everything resolves to 8-bit RGB here. Fill
//! colors additionally pass through a near-white suppression rule so that
//! opaque page-background rectangles do not hide real content.

/// An opaque 8-bit RGB color. Transparency is modeled as `Option<Rgb>`
/// (`None` = transparent) by the graphics state and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` hex string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// True when every channel is at or above 242/255. Fills this bright
    /// are treated as page background and suppressed to transparent.
    pub fn is_near_white(&self) -> bool {
        self.r >= 242 && self.g >= 242 && self.b >= 242
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Resolve a color operator's components to RGB.
///
/// 1 component is DeviceGray, 3 is DeviceRGB, 4 is DeviceCMYK
/// (`r = 255·(1−c)·(1−k)` etc.). Any other arity resolves to opaque black
/// as a defensive default.
pub fn format_color(components: &[f64]) -> Rgb {
    match components {
        [g] => {
            let v = channel(*g);
            Rgb::new(v, v, v)
        }
        [r, g, b] => Rgb::new(channel(*r), channel(*g), channel(*b)),
        [c, m, y, k] => {
            let c = c.clamp(0.0, 1.0);
            let m = m.clamp(0.0, 1.0);
            let y = y.clamp(0.0, 1.0);
            let k = k.clamp(0.0, 1.0);
            Rgb::new(
                channel((1.0 - c) * (1.0 - k)),
                channel((1.0 - m) * (1.0 - k)),
                channel((1.0 - y) * (1.0 - k)),
            )
        }
        _ => Rgb::BLACK,
    }
}

/// Post-processing applied uniformly to every resolved stroke and fill
/// color before it enters a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    /// Colors pass through unchanged.
    #[default]
    Normal,
    /// Every opaque color is replaced by a single tint (the configured
    /// custom color, or black when none is set).
    Monochrome,
}

impl ColorScheme {
    /// Apply the scheme to a resolved color. Transparent stays transparent.
    pub fn apply(&self, color: Option<Rgb>, custom: Option<Rgb>) -> Option<Rgb> {
        match self {
            ColorScheme::Normal => color,
            ColorScheme::Monochrome => color.map(|_| custom.unwrap_or(Rgb::BLACK)),
        }
    }
}
