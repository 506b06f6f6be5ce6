//! Space abstraction with retraction-style step updates.

/// Trait that represents an abstract optimization space.
///
/// Solvers only need a handful of operations:
/// - points (`x`) on the space
/// - local update vectors (`direction`) consumed by `retract_into`
///
/// The gradient step of every solver in this crate is
/// `x_next = Retr_x(alpha * direction)`.
pub trait Space {
    type Point: Clone;
    type Tangent: Clone;

    fn zero_like(&self, x: &Self::Point) -> Self::Point;

    /// Tangent/local zero vector at `x`.
    fn zero_tangent_like(&self, x: &Self::Point) -> Self::Tangent;

    /// Reset `v` to the zero local vector at `x`, reusing its storage when possible.
    fn zero_tangent_into(&self, v: &mut Self::Tangent, x: &Self::Point) {
        *v = self.zero_tangent_like(x);
    }

    /// Number of coordinates of a point.
    fn dim(&self, x: &Self::Point) -> usize;

    /// Number of coordinates of a local update vector.
    fn tangent_dim(&self, v: &Self::Tangent) -> usize;

    /// Norm on the local update vector.
    fn tangent_norm(&self, v: &Self::Tangent) -> f64;

    /// Distance between two points.
    fn distance(&self, x: &Self::Point, y: &Self::Point) -> f64;

    fn scale_into(&self, out: &mut Self::Tangent, v: &Self::Tangent, alpha: f64);
    fn add_into(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Tangent);

    /// v <- -v
    fn negate_in_place(&self, v: &mut Self::Tangent) {
        let tmp = v.clone();
        self.scale_into(v, &tmp, -1.0);
    }

    /// out = Retr_x(alpha * direction)
    fn retract_into(
        &self,
        out: &mut Self::Point,
        x: &Self::Point,
        direction: &Self::Tangent,
        alpha: f64,
        tmp: &mut Self::Tangent,
    ) {
        self.scale_into(tmp, direction, alpha);
        self.add_into(out, x, tmp);
    }

    /// In-place step update: x <- Retr_x(alpha * direction)
    fn retract_step_into(
        &self,
        x: &mut Self::Point,
        direction: &Self::Tangent,
        alpha: f64,
        x_next: &mut Self::Point,
        tmp: &mut Self::Tangent,
    ) {
        self.retract_into(x_next, x, direction, alpha, tmp);
        std::mem::swap(x, x_next);
    }

    // --- convenience wrapper (allocates) ---
    fn retract(&self, x: &Self::Point, direction: &Self::Tangent, alpha: f64) -> Self::Point {
        let mut out = self.zero_like(x);
        let mut tmp = self.zero_tangent_like(x);
        self.retract_into(&mut out, x, direction, alpha, &mut tmp);
        out
    }
}
