//! Geometric primitives, like points and edges.

use kurbo::Vec2;

use crate::num::{CheapOrderedFloat, RELATIVE_SLACK};

mod bbox;

pub use bbox::BoundaryBox;

/// A three-dimensional point.
///
/// Only `x` and `y` take part in the sweep; `z` is carried along (it's the
/// elevation, for terrain data) and only matters for equality.
///
/// Points are sorted by `x`, then by `y`, then by `z`, for the convenience of
/// our sweep-line algorithm (which moves in increasing `x`).
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate; the sweep moves in increasing `x`.
    pub x: f64,
    /// Vertical coordinate. "Upper" and "lower" refer to larger and smaller `y`.
    pub y: f64,
    /// Elevation.
    pub z: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.x),
            CheapOrderedFloat::from(self.y),
            CheapOrderedFloat::from(self.z),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.x),
                CheapOrderedFloat::from(other.y),
                CheapOrderedFloat::from(other.z),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        debug_assert!(z.is_finite());
        Point { x, y, z }
    }

    /// Returns true if all coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Compute an affine combination between `self` and `other`; that is, `(1 - t) * self + t * other`.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
            z: (1.0 - t) * self.z + t * other.z,
        }
    }

    /// The projection of this point onto the `xy` plane.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// A straight edge between two points, in sweep-line order.
///
/// The endpoints are stored so that `left <= right` (comparing `x` first and
/// breaking ties with `y`), regardless of the order they were given in. In
/// particular, two edges are equal if they have the same endpoints, no matter
/// which way around they were constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[Point; 2]", into = "[Point; 2]")]
pub struct Edge {
    left: Point,
    right: Point,
}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        CheapOrderedFloat::from(self.x).hash(state);
        CheapOrderedFloat::from(self.y).hash(state);
        CheapOrderedFloat::from(self.z).hash(state);
    }
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.left, self.right)
    }
}

impl From<[Point; 2]> for Edge {
    fn from([p, q]: [Point; 2]) -> Self {
        Edge::new(p, q)
    }
}

impl From<Edge> for [Point; 2] {
    fn from(e: Edge) -> Self {
        [e.left, e.right]
    }
}

/// How two edges meet, if at all.
///
/// Only the `xy` projections are intersected. Reported points are on the
/// first edge, so they carry its elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeIntersection {
    /// The edges have no point in common.
    Disjoint,
    /// The edges meet at a single point, which is an endpoint of both.
    SharedEndpoint(Point),
    /// The edges meet at a single point, which is in the interior of at least one of them.
    Crossing(Point),
    /// The edges are collinear and share a piece of positive length, running
    /// between the two points.
    Overlap(Point, Point),
}

impl EdgeIntersection {
    /// Does this intersection get in the way of a constraint edge?
    ///
    /// Meeting at a common endpoint is how edges of a triangulation normally
    /// touch, so that doesn't count.
    pub fn is_obstruction(&self) -> bool {
        matches!(
            self,
            EdgeIntersection::Crossing(_) | EdgeIntersection::Overlap(..)
        )
    }
}

// The sign of the cross product (b - a) x (c - a), or zero if it's within
// rounding error of zero.
fn orientation(a: &Point, b: &Point, c: &Point) -> i8 {
    let ab = Vec2::new(b.x - a.x, b.y - a.y);
    let ac = Vec2::new(c.x - a.x, c.y - a.y);
    let cross = ab.cross(ac);
    let slack = ab.hypot() * ac.hypot() * RELATIVE_SLACK;
    if cross > slack {
        1
    } else if cross < -slack {
        -1
    } else {
        0
    }
}

impl Edge {
    /// Create a new edge between two points, in either order.
    pub fn new(p: Point, q: Point) -> Self {
        if p <= q {
            Edge { left: p, right: q }
        } else {
            Edge { left: q, right: p }
        }
    }

    /// A shortcut for building an edge from six coordinates.
    pub fn from_coords(x0: f64, y0: f64, z0: f64, x1: f64, y1: f64, z1: f64) -> Self {
        Edge::new(Point::new(x0, y0, z0), Point::new(x1, y1, z1))
    }

    /// The endpoint with the smaller `x` (or the smaller `y`, if the edge is vertical).
    pub fn left(&self) -> &Point {
        &self.left
    }

    /// The endpoint with the larger `x` (or the larger `y`, if the edge is vertical).
    pub fn right(&self) -> &Point {
        &self.right
    }

    /// Returns true if this edge is exactly vertical.
    pub fn is_vertical(&self) -> bool {
        self.left.x == self.right.x
    }

    /// Returns true if both endpoints project to the same `xy` point.
    pub fn is_degenerate(&self) -> bool {
        self.left.x == self.right.x && self.left.y == self.right.y
    }

    /// Does our `x` range contain `x`?
    pub fn spans(&self, x: f64) -> bool {
        self.left.x <= x && x <= self.right.x
    }

    /// The slope `dy / dx`.
    ///
    /// Vertical edges (including degenerate ones) have slope `+∞`: they go
    /// up as steeply as possible.
    pub fn slope(&self) -> f64 {
        if self.is_vertical() {
            f64::INFINITY
        } else {
            (self.right.y - self.left.y) / (self.right.x - self.left.x)
        }
    }

    /// Our `y` coordinate at the given `x` coordinate.
    ///
    /// Vertical edges return their smallest `y` coordinate.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `x` is outside the `x` range of this edge.
    pub fn y_at(&self, x: f64) -> f64 {
        debug_assert!(self.spans(x), "edge {self:?}, x={x:?}");
        self.extrapolated_y_at(x)
    }

    /// The `y` coordinate at `x` of the line supporting this edge.
    ///
    /// This is exact at the endpoints. Vertical edges return their smallest
    /// `y` coordinate, wherever they are asked.
    pub fn extrapolated_y_at(&self, x: f64) -> f64 {
        if self.is_vertical() || x == self.left.x {
            self.left.y
        } else if x == self.right.x {
            self.right.y
        } else {
            let dx = self.right.x - self.left.x;
            self.left.y + (x - self.left.x) * (self.right.y - self.left.y) / dx
        }
    }

    /// The projection of this edge onto the `xy` plane.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.left.to_kurbo(), self.right.to_kurbo())
    }

    /// Is `p` one of our endpoints, in the `xy` projection?
    pub fn has_endpoint_2d(&self, p: &Point) -> bool {
        let same = |q: &Point| q.x == p.x && q.y == p.y;
        same(&self.left) || same(&self.right)
    }

    // Where along this edge (as a fraction of its length) does `p` project?
    fn param_of(&self, p: &Point) -> f64 {
        let d = self.right.to_kurbo() - self.left.to_kurbo();
        let len2 = d.hypot2();
        if len2 == 0.0 {
            0.0
        } else {
            (p.to_kurbo() - self.left.to_kurbo()).dot(d) / len2
        }
    }

    /// Computes how this edge meets `other`, in the `xy` projection.
    pub fn intersection(&self, other: &Edge) -> EdgeIntersection {
        let (a0, a1) = (&self.left, &self.right);
        let (b0, b1) = (&other.left, &other.right);

        let o1 = orientation(a0, a1, b0);
        let o2 = orientation(a0, a1, b1);
        let o3 = orientation(b0, b1, a0);
        let o4 = orientation(b0, b1, a1);

        if o1 == 0 && o2 == 0 && o3 == 0 && o4 == 0 {
            return self.collinear_intersection(other);
        }
        if o1 * o2 > 0 || o3 * o4 > 0 {
            return EdgeIntersection::Disjoint;
        }

        let p = if o1 == 0 {
            self.point_at_x_or_y(b0)
        } else if o2 == 0 {
            self.point_at_x_or_y(b1)
        } else if o3 == 0 {
            *a0
        } else if o4 == 0 {
            *a1
        } else {
            let da = a1.to_kurbo() - a0.to_kurbo();
            let db = b1.to_kurbo() - b0.to_kurbo();
            let t = (b0.to_kurbo() - a0.to_kurbo()).cross(db) / da.cross(db);
            a0.affine(a1, t.clamp(0.0, 1.0))
        };

        if self.has_endpoint_2d(&p) && other.has_endpoint_2d(&p) {
            EdgeIntersection::SharedEndpoint(p)
        } else {
            EdgeIntersection::Crossing(p)
        }
    }

    // The point on this edge with the same xy position as `p`, but with our
    // elevation.
    fn point_at_x_or_y(&self, p: &Point) -> Point {
        if self.left.x == p.x && self.left.y == p.y {
            self.left
        } else if self.right.x == p.x && self.right.y == p.y {
            self.right
        } else {
            let t = self.param_of(p);
            let q = self.left.affine(&self.right, t);
            Point::new(p.x, p.y, q.z)
        }
    }

    fn collinear_intersection(&self, other: &Edge) -> EdgeIntersection {
        let mut t0 = self.param_of(&other.left);
        let mut t1 = self.param_of(&other.right);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        let start = t0.max(0.0);
        let end = t1.min(1.0);

        // Both edges might be degenerate, in which case everything is "collinear".
        if self.is_degenerate() || other.is_degenerate() {
            let p = if self.is_degenerate() {
                &self.left
            } else {
                &other.left
            };
            let e = if self.is_degenerate() { other } else { self };
            let on_edge = e.is_degenerate() && e.left.x == p.x && e.left.y == p.y
                || !e.is_degenerate() && (0.0..=1.0).contains(&e.param_of(p));
            return if !on_edge {
                EdgeIntersection::Disjoint
            } else if self.has_endpoint_2d(p) && other.has_endpoint_2d(p) {
                EdgeIntersection::SharedEndpoint(self.point_at_x_or_y(p))
            } else {
                EdgeIntersection::Crossing(self.point_at_x_or_y(p))
            };
        }

        if start > end {
            EdgeIntersection::Disjoint
        } else if start == end {
            EdgeIntersection::SharedEndpoint(self.left.affine(&self.right, start))
        } else {
            EdgeIntersection::Overlap(
                self.left.affine(&self.right, start),
                self.left.affine(&self.right, end),
            )
        }
    }

    /// Returns true if `self` and `other` cross or overlap.
    ///
    /// Meeting only at a shared endpoint is not an intersection.
    pub fn intersects(&self, other: &Edge) -> bool {
        self.intersection(other).is_obstruction()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    impl Reasonable for Point {
        type Strategy = BoxedStrategy<Point>;

        fn reasonable() -> Self::Strategy {
            (f64::reasonable(), f64::reasonable())
                .prop_map(|(x, y)| Point::new(x, y, 0.0))
                .boxed()
        }
    }

    impl Reasonable for Edge {
        type Strategy = BoxedStrategy<Edge>;

        fn reasonable() -> Self::Strategy {
            (Point::reasonable(), Point::reasonable())
                .prop_filter("degenerate", |(p, q)| p != q)
                .prop_map(|(p, q)| Edge::new(p, q))
                .boxed()
        }
    }

    fn e(x0: f64, y0: f64, x1: f64, y1: f64) -> Edge {
        Edge::from_coords(x0, y0, 0.0, x1, y1, 0.0)
    }

    #[test]
    fn canonical_endpoints() {
        let edge = Edge::from_coords(6.0, 1.0, 4.0, 3.0, 1.0, 0.0);
        assert_eq!(edge.left(), &Point::new(3.0, 1.0, 0.0));
        assert_eq!(edge.right(), &Point::new(6.0, 1.0, 4.0));
        assert_eq!(edge, Edge::from_coords(3.0, 1.0, 0.0, 6.0, 1.0, 4.0));

        // Vertical edges break the tie with y.
        let vertical = e(4.0, 5.0, 4.0, 2.0);
        assert_eq!(vertical.left(), &Point::new(4.0, 2.0, 0.0));
        assert_eq!(vertical.right(), &Point::new(4.0, 5.0, 0.0));
        assert!(vertical.is_vertical());
        assert_eq!(vertical.slope(), f64::INFINITY);
    }

    #[test]
    fn evaluation() {
        let edge = e(2.0, 5.0, 5.0, 8.0);
        assert_eq!(edge.y_at(2.0), 5.0);
        assert_eq!(edge.y_at(4.0), 7.0);
        assert_eq!(edge.y_at(5.0), 8.0);
        assert_eq!(edge.extrapolated_y_at(1.0), 4.0);
        assert_eq!(edge.extrapolated_y_at(6.0), 9.0);
        assert_eq!(edge.slope(), 1.0);

        // Endpoints are exact, even when interpolation would round.
        let edge = e(
            296448.8,
            2254721.9000000004,
            296449.0999999999,
            2254720.5999999987,
        );
        assert_eq!(edge.y_at(296449.0999999999), 2254720.5999999987);
    }

    #[test]
    fn crossing() {
        let a = e(4.0, 3.0, 6.0, 1.0);
        let b = e(4.0, 2.0, 5.0, 3.0);
        assert_matches!(a.intersection(&b), EdgeIntersection::Crossing(p) => {
            assert!((p.x - 4.5).abs() < 1e-12);
            assert!((p.y - 2.5).abs() < 1e-12);
        });
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn parallel_and_apart() {
        let a = e(4.0, 4.0, 6.0, 6.0);
        let b = e(4.0, 2.0, 5.0, 3.0);
        assert_eq!(a.intersection(&b), EdgeIntersection::Disjoint);

        let c = e(0.0, 0.0, 1.0, 0.0);
        let d = e(2.0, 1.0, 3.0, -1.0);
        assert_eq!(c.intersection(&d), EdgeIntersection::Disjoint);
    }

    #[test]
    fn shared_endpoint_is_not_an_obstruction() {
        let a = e(0.0, 0.0, 4.0, 4.0);
        let b = e(4.0, 4.0, 6.0, 1.0);
        assert_eq!(
            a.intersection(&b),
            EdgeIntersection::SharedEndpoint(Point::new(4.0, 4.0, 0.0))
        );
        assert!(!a.intersects(&b));
    }

    #[test]
    fn t_junction() {
        // b ends in the middle of a.
        let a = e(0.0, 0.0, 4.0, 0.0);
        let b = e(2.0, 0.0, 3.0, 5.0);
        assert_eq!(
            a.intersection(&b),
            EdgeIntersection::Crossing(Point::new(2.0, 0.0, 0.0))
        );
        assert_eq!(
            b.intersection(&a),
            EdgeIntersection::Crossing(Point::new(2.0, 0.0, 0.0))
        );
    }

    #[test]
    fn collinear() {
        let a = e(0.0, 0.0, 4.0, 4.0);
        assert_eq!(
            a.intersection(&e(2.0, 2.0, 6.0, 6.0)),
            EdgeIntersection::Overlap(Point::new(2.0, 2.0, 0.0), Point::new(4.0, 4.0, 0.0))
        );
        assert_eq!(
            a.intersection(&e(4.0, 4.0, 6.0, 6.0)),
            EdgeIntersection::SharedEndpoint(Point::new(4.0, 4.0, 0.0))
        );
        assert_eq!(
            a.intersection(&e(5.0, 5.0, 6.0, 6.0)),
            EdgeIntersection::Disjoint
        );
    }

    #[test]
    fn vertical_intersections() {
        let v = e(3.0, 0.0, 3.0, 8.0);
        assert_matches!(v.intersection(&e(0.0, 4.0, 6.0, 4.0)), EdgeIntersection::Crossing(p) => {
            assert_eq!((p.x, p.y), (3.0, 4.0));
        });
        assert_eq!(
            v.intersection(&e(4.0, 0.0, 6.0, 8.0)),
            EdgeIntersection::Disjoint
        );
    }

    #[test]
    fn degenerate_edges() {
        let dot = e(1.0, 1.0, 1.0, 1.0);
        assert!(dot.is_degenerate());
        assert_eq!(
            dot.intersection(&e(0.0, 0.0, 2.0, 2.0)),
            EdgeIntersection::Crossing(Point::new(1.0, 1.0, 0.0))
        );
        assert_eq!(
            dot.intersection(&e(1.0, 1.0, 2.0, 2.0)),
            EdgeIntersection::SharedEndpoint(Point::new(1.0, 1.0, 0.0))
        );
        assert_eq!(
            dot.intersection(&e(0.0, 1.0, 2.0, 3.0)),
            EdgeIntersection::Disjoint
        );
    }

    #[test]
    fn serialized_as_point_pair() {
        let json = r#"[{"x":6.0,"y":1.0,"z":0.0},{"x":4.0,"y":3.0,"z":0.0}]"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.left(), &Point::new(4.0, 3.0, 0.0));
        assert_eq!(edge.right(), &Point::new(6.0, 1.0, 0.0));

        let out = serde_json::to_string(&edge).unwrap();
        assert_eq!(
            out,
            r#"[{"x":4.0,"y":3.0,"z":0.0},{"x":6.0,"y":1.0,"z":0.0}]"#
        );
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in Edge::reasonable(), b in Edge::reasonable()) {
            let ab = a.intersection(&b);
            let ba = b.intersection(&a);
            prop_assert_eq!(ab == EdgeIntersection::Disjoint, ba == EdgeIntersection::Disjoint);
        }

        #[test]
        fn interpolation_stays_on_the_edge(edge in Edge::reasonable(), t in 0.0..=1.0f64) {
            prop_assume!(!edge.is_vertical());
            let x = edge.left().x + t * (edge.right().x - edge.left().x);
            let x = x.clamp(edge.left().x, edge.right().x);
            let y = edge.y_at(x);
            let (lo, hi) = if edge.left().y <= edge.right().y {
                (edge.left().y, edge.right().y)
            } else {
                (edge.right().y, edge.left().y)
            };
            prop_assert!(lo - 1e-9 <= y && y <= hi + 1e-9);
        }
    }
}
