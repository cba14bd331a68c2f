//! Geometric primitives and the abstract-domain trait contract shared by
//! every lattice in `core-domains`.
//!
//! Coordinates are machine integers (`i32`) with two reserved sentinel
//! values standing in for `-infinity` and `+infinity`. Saturating
//! arithmetic near those sentinels is the responsibility of each concrete
//! domain; this crate only names the sentinels and the shapes built out of
//! them.

use std::fmt;

/// Sentinel standing in for `+infinity` in saturating integer arithmetic.
pub const INF: i32 = i32::MAX;
/// Sentinel standing in for `-infinity` in saturating integer arithmetic.
pub const NEG_INF: i32 = i32::MIN;

/// A point (or, depending on context, a free vector) in the 2D plane the
/// walk moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed polygon, represented as its ordered vertex list. Degenerate
/// polygons (a single point, a zero-width segment) are legal; renderers
/// are expected to handle them gracefully rather than reject them.
pub type Polygon = Vec<Vec2>;

/// Clips a coordinate that may carry [`INF`]/[`NEG_INF`] to a finite pixel
/// offset for rendering, mirroring the clipping the reference renderer
/// performs at the canvas boundary.
pub fn clip_to_canvas(value: i32, half_extent: i32) -> i32 {
    if value == INF {
        half_extent
    } else if value == NEG_INF {
        -half_extent
    } else {
        value
    }
}

/// A complete join-semilattice with a bottom element, a printable
/// representation, and an optional geometric projection used only by the
/// renderer.
///
/// Implementations must satisfy, for all `a, b, c: Self`:
/// - `a.le(&a)` (reflexive)
/// - `a.le(&b) && b.le(&a) ⇒ a == b` (antisymmetric)
/// - `Self::bottom().le(&a)` for every `a`
/// - `a.join(&a) == a`, `a.join(&b) == b.join(&a)`
/// - `a.join(&b).le(&a)` is false unless `a == a.join(&b)`; i.e. the join is
///   an upper bound of both operands
/// - `Self::bottom().join(&a) == a`
pub trait Domain: Clone + PartialEq + fmt::Debug {
    /// The least element of the lattice.
    fn bottom() -> Self;

    /// The partial order `a ≤ b`.
    fn le(&self, other: &Self) -> bool;

    /// Least upper bound.
    fn join(&self, other: &Self) -> Self;

    /// Pure, total rendering of the value. Never used for anything but
    /// display.
    fn display(&self) -> String;

    /// Geometric projection used only by the SVG renderer to draw the
    /// inferred covered area. The default is the empty projection; domains
    /// with no natural geometric reading (e.g. [`PowersetDomain`]) should
    /// leave it at that.
    fn covers(&self) -> Vec<Polygon> {
        Vec::new()
    }
}

/// A [`Domain`] that additionally supports widening, the extrapolation
/// operator the solver uses to force termination on lattices of infinite
/// height.
///
/// `widen(prev, new)` must satisfy `bottom().widen(&x) == x`,
/// `a.widen(&a) == a`, and `b.widen(&a) == b` whenever `a.le(&b)`. It need
/// not be monotone in its right argument; applied repeatedly along any
/// ascending chain it must reach a fixed point in finitely many steps.
pub trait WidenableDomain: Domain {
    fn widen(&self, transferred: &Self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_to_canvas_passes_through_finite_values() {
        assert_eq!(clip_to_canvas(12, 250), 12);
        assert_eq!(clip_to_canvas(-7, 250), -7);
    }

    #[test]
    fn clip_to_canvas_clamps_sentinels() {
        assert_eq!(clip_to_canvas(INF, 250), 250);
        assert_eq!(clip_to_canvas(NEG_INF, 250), -250);
    }

    #[test]
    fn vec2_display_matches_tuple_form() {
        assert_eq!(Vec2::new(3, -4).to_string(), "(3, -4)");
    }
}
