use arrayvec::ArrayVec;

use super::Point;

/// An axis-aligned box in three dimensions.
///
/// A box starts out empty, and grows to contain every point it's shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryBox {
    // Invariant: if `extent` is `Some((min, max))` then min <= max coordinatewise.
    extent: Option<(Point, Point)>,
}

impl BoundaryBox {
    /// A box with the given opposite corners, in any order.
    pub fn from_corners(p: Point, q: Point) -> Self {
        let min = Point::new(p.x.min(q.x), p.y.min(q.y), p.z.min(q.z));
        let max = Point::new(p.x.max(q.x), p.y.max(q.y), p.z.max(q.z));
        BoundaryBox {
            extent: Some((min, max)),
        }
    }

    /// Does this box contain nothing at all?
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Grow this box so that it contains `p`.
    pub fn alter(&mut self, p: &Point) {
        self.extent = Some(match self.extent {
            None => (*p, *p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            ),
        });
    }

    /// Grow this box so that it contains all of `other`.
    pub fn union(&mut self, other: &BoundaryBox) {
        if let Some((min, max)) = other.extent {
            self.alter(&min);
            self.alter(&max);
        }
    }

    /// The corner with the smallest coordinates.
    pub fn min(&self) -> Option<Point> {
        self.extent.map(|(min, _)| min)
    }

    /// The corner with the largest coordinates.
    pub fn max(&self) -> Option<Point> {
        self.extent.map(|(_, max)| max)
    }

    /// The center of the box. An empty box is centered on the origin.
    pub fn middle(&self) -> Point {
        match self.extent {
            None => Point::new(0.0, 0.0, 0.0),
            Some((min, max)) => min.affine(&max, 0.5),
        }
    }

    /// The two opposite corners that define this box, or nothing if it's empty.
    pub fn points(&self) -> ArrayVec<Point, 2> {
        let mut ret = ArrayVec::new();
        if let Some((min, max)) = self.extent {
            ret.push(min);
            ret.push(max);
        }
        ret
    }

    /// The largest absolute value of any coordinate in the `xy` plane.
    ///
    /// This is the scale that rounding errors in the sweep are relative to.
    pub fn magnitude(&self) -> f64 {
        self.extent.map_or(0.0, |(min, max)| {
            min.x.abs().max(min.y.abs()).max(max.x.abs()).max(max.y.abs())
        })
    }

    /// The footprint of this box in the `xy` plane.
    pub fn to_kurbo_rect(&self) -> Option<kurbo::Rect> {
        self.extent
            .map(|(min, max)| kurbo::Rect::new(min.x, min.y, max.x, max.y))
    }
}
