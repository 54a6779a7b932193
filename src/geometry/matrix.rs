//! 2D affine matrix representation and composition.
//!
//! A matrix `[a b c d e f]` represents the affine transform:
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! i.e. `x' = a·x + c·y + e` and `y' = b·x + d·y + f`.

use super::path::Point;

/// A 2D affine transformation matrix `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [f64; 6]);

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Create a matrix from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Matrix([a, b, c, d, e, f])
    }

    /// A pure translation by `(tx, ty)`.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// A pure (possibly non-uniform) scale.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Matrix([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Compose two transforms. `incoming` is applied first, then `current`.
    ///
    /// This is the PDF `cm` concatenation order: after
    /// `ctm = Matrix::multiply(incoming, ctm)`, a point is mapped through
    /// `incoming` and the result through the old `ctm`.
    pub fn multiply(incoming: Matrix, current: Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = incoming.0;
        let [a2, b2, c2, d2, e2, f2] = current.0;

        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    /// Map a point through this matrix.
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point {
            x: a * p.x + c * p.y + e,
            y: b * p.x + d * p.y + f,
        }
    }

    /// Map raw coordinates through this matrix.
    pub fn apply_xy(&self, x: f64, y: f64) -> Point {
        self.apply(Point { x, y })
    }

    /// Extract an average uniform scale factor: `(|[a,b]| + |[c,d]|) / 2`.
    ///
    /// Used to convert user-space line widths and dash lengths into device
    /// units. Returns `1.0` if either column norm is non-finite or ≤ 0, so
    /// degenerate matrices never produce zero or NaN widths.
    pub fn average_scale(&self) -> f64 {
        let [a, b, c, d, _, _] = self.0;
        let sx = (a * a + b * b).sqrt();
        let sy = (c * c + d * d).sqrt();
        if !sx.is_finite() || !sy.is_finite() || sx <= 0.0 || sy <= 0.0 {
            return 1.0;
        }
        (sx + sy) / 2.0
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}
