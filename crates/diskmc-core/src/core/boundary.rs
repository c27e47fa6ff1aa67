use nalgebra::{Point2, Vector2};

/// A rectangular periodic domain centered on the origin.
///
/// Positions are canonicalized into `[-width/2, width/2) × [-height/2, height/2)`
/// under the minimum-image convention. Each axis wraps by its own length, so
/// non-square boxes are handled correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicBox {
    width: f64,
    height: f64,
}

impl PeriodicBox {
    /// Creates a box with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not strictly positive; a degenerate box is
    /// a programming error, not a recoverable condition.
    pub fn new(width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "box dimensions must be positive, got {width} x {height}"
        );
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Folds a separation vector onto its minimum image.
    ///
    /// Correct for separations spanning any number of box lengths, not just a
    /// single wrap.
    pub fn min_image(&self, separation: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            fold(separation.x, self.width),
            fold(separation.y, self.height),
        )
    }

    /// Wraps a position into the canonical image inside the box.
    pub fn wrap(&self, position: Point2<f64>) -> Point2<f64> {
        Point2::origin() + self.min_image(position.coords)
    }

    /// Returns a new box with both dimensions scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

// Maps x into [-length/2, length/2) by subtracting the nearest integer
// multiple of the box length.
fn fold(x: f64, length: f64) -> f64 {
    x - (x / length + 0.5).floor() * length
}
