//! A product domain lifting any [`Domain`] to a 2D point/vector, used to
//! track `(x, y)` position abstractly.

use core_geo::{Domain, Polygon, WidenableDomain};

#[derive(Debug, Clone, PartialEq)]
pub struct Vec2Domain<D> {
    pub x: D,
    pub y: D,
}

impl<D> Vec2Domain<D> {
    pub fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

impl<D: Domain> Domain for Vec2Domain<D> {
    fn bottom() -> Self {
        Self {
            x: D::bottom(),
            y: D::bottom(),
        }
    }

    /// Componentwise order: `a ≤ b ⇔ a.x ≤ b.x ∧ a.y ≤ b.y`.
    ///
    /// A lexicographic fallback (compare `x` first, falling back to `y`
    /// only when the `x` components are equal) was considered and rejected:
    /// it is not even a valid lattice order, since `join`'s componentwise
    /// max would then disagree with the comparison itself whenever
    /// `a.x != b.x`.
    fn le(&self, other: &Self) -> bool {
        self.x.le(&other.x) && self.y.le(&other.y)
    }

    fn join(&self, other: &Self) -> Self {
        Self {
            x: self.x.join(&other.x),
            y: self.y.join(&other.y),
        }
    }

    fn display(&self) -> String {
        format!("{{ x: {}, y: {} }}", self.x.display(), self.y.display())
    }

    fn covers(&self) -> Vec<Polygon> {
        let xs = self.x.covers();
        let ys = self.y.covers();
        debug_assert_eq!(
            xs.len(),
            ys.len(),
            "x and y component covers() lists must have matching length to zip into rectangles"
        );
        xs.iter()
            .zip(ys.iter())
            .map(|(xp, yp)| {
                let x_lo = xp.iter().map(|v| v.x).min().unwrap_or(0);
                let x_hi = xp.iter().map(|v| v.x).max().unwrap_or(0);
                let y_lo = yp.iter().map(|v| v.x).min().unwrap_or(0);
                let y_hi = yp.iter().map(|v| v.x).max().unwrap_or(0);
                // Note: `covers()` segments are always laid out on the x
                // axis by convention (see `SignDomain::covers` /
                // `IntervalDomain::covers`), so reading `.x` off both
                // component's segments is correct here even for the y
                // component — it is not a copy-paste slip.
                vec![
                    core_geo::Vec2::new(x_lo, y_lo),
                    core_geo::Vec2::new(x_hi, y_lo),
                    core_geo::Vec2::new(x_hi, y_hi),
                    core_geo::Vec2::new(x_lo, y_hi),
                ]
            })
            .collect()
    }
}

impl<D: WidenableDomain> WidenableDomain for Vec2Domain<D> {
    fn widen(&self, transferred: &Self) -> Self {
        Self {
            x: self.x.widen(&transferred.x),
            y: self.y.widen(&transferred.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalDomain;
    use crate::sign::SignDomain;

    #[test]
    fn componentwise_order_rejects_cases_lexicographic_would_accept() {
        // Lexicographic (x-first) order would call these comparable because
        // the x components differ; componentwise order correctly rejects it
        // since neither y component dominates the other.
        let a = Vec2Domain::new(IntervalDomain::new(0, 0), IntervalDomain::new(10, 10));
        let b = Vec2Domain::new(IntervalDomain::new(1, 1), IntervalDomain::new(-5, -5));
        assert!(!a.le(&b));
        assert!(!b.le(&a));
    }

    #[test]
    fn bottom_is_componentwise_bottom() {
        let bottom: Vec2Domain<SignDomain> = Vec2Domain::bottom();
        assert_eq!(bottom.x, SignDomain::Bottom);
        assert_eq!(bottom.y, SignDomain::Bottom);
    }

    #[test]
    fn display_matches_brace_notation() {
        let v = Vec2Domain::new(SignDomain::Positive, SignDomain::Positive);
        assert_eq!(v.display(), "{ x: Positive, y: Positive }");
    }

    #[test]
    fn covers_zips_component_extents_into_a_rectangle() {
        let v = Vec2Domain::new(IntervalDomain::new(10, 20), IntervalDomain::new(-5, 5));
        let rects = v.covers();
        assert_eq!(rects.len(), 1);
        let xs: Vec<i32> = rects[0].iter().map(|p| p.x).collect();
        let ys: Vec<i32> = rects[0].iter().map(|p| p.y).collect();
        assert_eq!(xs.iter().min().copied().unwrap(), 10);
        assert_eq!(xs.iter().max().copied().unwrap(), 20);
        assert_eq!(ys.iter().min().copied().unwrap(), -5);
        assert_eq!(ys.iter().max().copied().unwrap(), 5);
    }
}
