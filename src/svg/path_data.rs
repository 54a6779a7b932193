//! SVG path-data (`d` attribute) parser.
//!
//! Tokenizes the standard letter grammar `M L H V C S Q T A Z` (upper and
//! lower case) into the shared segment model. Elliptical arcs go through
//! the SVG 1.1 endpoint-to-center conversion and stay first-class `Arc`
//! segments; degenerate arcs fall back to straight lines. Unrecognized
//! command letters consume one token and continue: the parser never fails
//! and never loops forever.

use std::f64::consts::PI;

use crate::geometry::{Point, VectorSegment};

/// Parse a path `d` string into segments.
pub fn parse_path_data(d: &str) -> Vec<VectorSegment> {
    let mut segments = Vec::new();
    let mut cursor = Cursor::new(d);

    let mut cmd = ' ';
    let mut curr = Point::default();
    let mut start = Point::default();
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    loop {
        let before = cursor.pos();
        let Some(c) = cursor.next_command(&mut cmd) else {
            break;
        };
        let rel = c.is_ascii_lowercase();
        match c.to_ascii_uppercase() {
            'M' => {
                if let Some((x, y)) = cursor.next_pair() {
                    let p = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Move { to: p });
                    curr = p;
                    start = p;
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;

                    // Subsequent bare pairs are implicit lineTo commands of
                    // the matching case.
                    while let Some((x, y)) = cursor.next_pair() {
                        let p = resolve(curr, x, y, rel);
                        segments.push(VectorSegment::Line { to: p });
                        curr = p;
                    }
                }
            }
            'L' => {
                while let Some((x, y)) = cursor.next_pair() {
                    let p = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Line { to: p });
                    curr = p;
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'H' => {
                while let Some(x) = cursor.next_number() {
                    let p = Point::new(if rel { curr.x + x } else { x }, curr.y);
                    segments.push(VectorSegment::Line { to: p });
                    curr = p;
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'V' => {
                while let Some(y) = cursor.next_number() {
                    let p = Point::new(curr.x, if rel { curr.y + y } else { y });
                    segments.push(VectorSegment::Line { to: p });
                    curr = p;
                }
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            'C' => {
                while let Some([x1, y1, x2, y2, x, y]) = cursor.next_numbers::<6>() {
                    let c1 = resolve(curr, x1, y1, rel);
                    let c2 = resolve(curr, x2, y2, rel);
                    let to = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Cubic { ctrl1: c1, ctrl2: c2, to });
                    curr = to;
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                }
            }
            'S' => {
                while let Some([x2, y2, x, y]) = cursor.next_numbers::<4>() {
                    let c1 = reflect(curr, last_cubic_ctrl);
                    let c2 = resolve(curr, x2, y2, rel);
                    let to = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Cubic { ctrl1: c1, ctrl2: c2, to });
                    curr = to;
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                }
            }
            'Q' => {
                while let Some([x1, y1, x, y]) = cursor.next_numbers::<4>() {
                    let ctrl = resolve(curr, x1, y1, rel);
                    let to = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Quad { ctrl, to });
                    curr = to;
                    last_quad_ctrl = Some(ctrl);
                    last_cubic_ctrl = None;
                }
            }
            'T' => {
                while let Some((x, y)) = cursor.next_pair() {
                    let ctrl = reflect(curr, last_quad_ctrl);
                    let to = resolve(curr, x, y, rel);
                    segments.push(VectorSegment::Quad { ctrl, to });
                    curr = to;
                    last_quad_ctrl = Some(ctrl);
                    last_cubic_ctrl = None;
                }
            }
            'A' => {
                loop {
                    let (Some(rx), Some(ry), Some(rot)) =
                        (cursor.next_number(), cursor.next_number(), cursor.next_number())
                    else {
                        break;
                    };
                    let (Some(large_arc), Some(sweep)) =
                        (cursor.next_flag(), cursor.next_flag())
                    else {
                        break;
                    };
                    let Some((x, y)) = cursor.next_pair() else {
                        break;
                    };
                    let to = resolve(curr, x, y, rel);
                    segments.push(arc_segment(curr, rx, ry, rot, large_arc, sweep, to));
                    curr = to;
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
            }
            'Z' => {
                segments.push(VectorSegment::Close);
                curr = start;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            _ => {
                // Unknown command letter: consume one token and move on.
                cursor.next_number();
            }
        }

        // A repeated implicit command whose operands fail to parse consumes
        // nothing; drop a byte so the loop always terminates.
        if cursor.pos() == before {
            cursor.skip_byte();
        }
    }

    segments
}

fn resolve(curr: Point, x: f64, y: f64, rel: bool) -> Point {
    if rel {
        Point::new(curr.x + x, curr.y + y)
    } else {
        Point::new(x, y)
    }
}

/// Reflect the previous control point about the current point; when the
/// previous command was not of the same curve family, the reflection
/// collapses to the current point.
fn reflect(curr: Point, prev_ctrl: Option<Point>) -> Point {
    match prev_ctrl {
        Some(c) => Point::new(2.0 * curr.x - c.x, 2.0 * curr.y - c.y),
        None => curr,
    }
}

/// Endpoint-to-center conversion for an elliptical arc, per the SVG 1.1
/// implementation notes (F.6.5). Returns a straight `Line` when either
/// source radius is ≤ 0 or the conversion degenerates.
fn arc_segment(
    from: Point,
    rx_in: f64,
    ry_in: f64,
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> VectorSegment {
    if rx_in <= 0.0 || ry_in <= 0.0 {
        return VectorSegment::Line { to };
    }

    let mut rx = rx_in;
    let mut ry = ry_in;
    let phi = x_axis_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: half-chord in the ellipse frame.
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: scale radii up if the chord does not fit.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 3: center in the ellipse frame.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let den = rx2 * y1p2 + ry2 * x1p2;
    let mut coef = 0.0;
    if den != 0.0 {
        let num = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        coef = sign * (num / den).max(0.0).sqrt();
    }
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    // Step 4: center in user space.
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    // Step 5: start angle and sweep.
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let start_angle = vector_angle(1.0, 0.0, ux, uy);
    let mut delta = vector_angle(ux, uy, vx, vy);
    if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    } else if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    }

    if rx < 1e-9 || ry < 1e-9 || !delta.is_finite() || !start_angle.is_finite() {
        return VectorSegment::Line { to };
    }

    VectorSegment::Arc {
        center: Point::new(cx, cy),
        radius: (rx, ry),
        rotation: phi,
        start_angle,
        end_angle: start_angle + delta,
        // SVG sweep=1 advances angles positively (clockwise on a y-down
        // canvas); the scene model records the anticlockwise flag.
        ccw: !sweep,
    }
}

fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let det = ux * vy - uy * vx;
    det.atan2(dot)
}

/// Byte cursor over path data: commands, numbers (signed, decimal,
/// exponent), compact arc flags, comma/whitespace separators.
struct Cursor<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            bytes: input.as_bytes(),
            i: 0,
        }
    }

    fn skip_separators(&mut self) {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b' ' | b'\t' | b'\r' | b'\n' | b',' => self.i += 1,
                _ => break,
            }
        }
    }

    fn pos(&self) -> usize {
        self.i
    }

    /// Next command letter, or the previous one when the next token is not
    /// a letter (implicit command repetition).
    fn next_command(&mut self, current: &mut char) -> Option<char> {
        loop {
            self.skip_separators();
            let b = *self.bytes.get(self.i)?;
            if b.is_ascii_alphabetic() {
                self.i += 1;
                *current = b as char;
                return Some(b as char);
            }
            if *current != ' ' {
                return Some(*current);
            }
            // Data before any command; drop a byte and retry.
            self.i += 1;
        }
    }

    fn next_number(&mut self) -> Option<f64> {
        self.skip_separators();
        if self.i >= self.bytes.len() {
            return None;
        }
        let begin = self.i;
        let mut has_digits = false;

        if matches!(self.bytes[self.i], b'+' | b'-') {
            self.i += 1;
        }
        while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
            self.i += 1;
            has_digits = true;
        }
        if self.i < self.bytes.len() && self.bytes[self.i] == b'.' {
            self.i += 1;
            while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
                self.i += 1;
                has_digits = true;
            }
        }
        if has_digits && self.i < self.bytes.len() && matches!(self.bytes[self.i], b'e' | b'E') {
            let mark = self.i;
            self.i += 1;
            if self.i < self.bytes.len() && matches!(self.bytes[self.i], b'+' | b'-') {
                self.i += 1;
            }
            let mut exp_digits = false;
            while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
                self.i += 1;
                exp_digits = true;
            }
            if !exp_digits {
                self.i = mark;
            }
        }

        if !has_digits {
            self.i = begin;
            return None;
        }

        std::str::from_utf8(&self.bytes[begin..self.i])
            .ok()?
            .parse::<f64>()
            .ok()
    }

    /// Arc flags may be written compactly (`01` is two flags).
    fn next_flag(&mut self) -> Option<bool> {
        self.skip_separators();
        match self.bytes.get(self.i) {
            Some(b'0') => {
                self.i += 1;
                Some(false)
            }
            Some(b'1') => {
                self.i += 1;
                Some(true)
            }
            _ => self.next_number().map(|v| v.abs() > 0.5),
        }
    }

    fn next_pair(&mut self) -> Option<(f64, f64)> {
        let save = self.i;
        let x = self.next_number()?;
        match self.next_number() {
            Some(y) => Some((x, y)),
            None => {
                self.i = save;
                None
            }
        }
    }

    fn next_numbers<const N: usize>(&mut self) -> Option<[f64; N]> {
        let save = self.i;
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            match self.next_number() {
                Some(v) => *slot = v,
                None => {
                    self.i = save;
                    return None;
                }
            }
        }
        Some(out)
    }

    fn skip_byte(&mut self) {
        if self.i < self.bytes.len() {
            self.i += 1;
        }
    }
}
