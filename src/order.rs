//! The vertical order of edges along a sweep line.
//!
//! The sweep line is the vertical line `x = abscissa`. Edges are ordered from
//! bottom to top by where they cross it, and when two edges cross it at
//! exactly the same place, by what they do just to the right of it.

use std::cmp::Ordering;

use crate::{geom::Edge, num::CheapOrderedFloat};

// Everything the order looks at for one edge, apart from its endpoints.
// No tolerance here: close-but-unequal heights must not compare as ties.
fn sort_key(e: &Edge, abscissa: f64) -> (CheapOrderedFloat, CheapOrderedFloat) {
    (
        CheapOrderedFloat::from(e.extrapolated_y_at(abscissa)),
        CheapOrderedFloat::from(e.slope()),
    )
}

/// Compares two edges by their vertical position on the sweep line at `abscissa`.
///
/// This is a total order: it only returns `Ordering::Equal` for equal edges.
///
/// 1. Edges are first compared by their `y` coordinate at `abscissa`. Edges
///    that don't reach the sweep line are extended along their supporting line;
///    vertical edges are placed at their lowest point. This evaluation is exact
///    at the endpoints, so edges sharing an endpoint on the sweep line tie
///    exactly.
/// 2. If those coordinates are equal, the edge with the smaller slope is
///    below: it's the one that will be below just to the right of the sweep
///    line. Vertical edges are steeper than anything else.
/// 3. Edges on the same line are ordered by their endpoints.
pub fn vertical_order(a: &Edge, b: &Edge, abscissa: f64) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    sort_key(a, abscissa)
        .cmp(&sort_key(b, abscissa))
        .then_with(|| a.left().cmp(b.left()))
        .then_with(|| a.right().cmp(b.right()))
}

/// A comparator with its abscissa baked in.
///
/// This is just a convenience for the places that want a comparison closure;
/// there's no state beyond the abscissa.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalComparator {
    abscissa: f64,
}

impl VerticalComparator {
    /// A comparator for the sweep line at `abscissa`.
    pub fn new(abscissa: f64) -> Self {
        VerticalComparator { abscissa }
    }

    /// Where this comparator's sweep line is.
    pub fn abscissa(&self) -> f64 {
        self.abscissa
    }

    /// See [`vertical_order`].
    pub fn compare(&self, a: &Edge, b: &Edge) -> Ordering {
        vertical_order(a, b, self.abscissa)
    }
}
