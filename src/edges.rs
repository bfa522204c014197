use crate::{
    geom::{BoundaryBox, Edge, Point},
    num::CheapOrderedFloat,
    Error,
};

/// An index into our edge arena.
///
/// Throughout this library, we assign identities to edges, so that we may
/// consider edges as different even if they have the same endpoints.
///
/// This index is used to identify an edge, whose data can be retrieved by looking
/// it up in [`Edges`]. (Of course, this index-as-identifier breaks down if there are
/// multiple `Edges` in flight. Just be careful not to mix them up.)
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EdgeIdx(pub usize);

impl std::fmt::Debug for EdgeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e_{}", self.0)
    }
}

/// An arena of edges.
///
/// Edges are indexed by [`EdgeIdx`] and can be retrieved by indexing (i.e. with
/// square brackets). Once added, an edge never changes, so it's safe for a
/// [`VerticalList`](crate::sweep::VerticalList) to hold on to its index.
#[derive(Debug, Clone, Default)]
pub struct Edges {
    edges: Vec<Edge>,
    /// For each edge, stores true if the sweep-line order (left to right)
    /// is the same as the orientation it was given in.
    orientation: Vec<bool>,
    bbox: BoundaryBox,

    /// All the entrance abscissas of edges, ordered by abscissa.
    enter: Vec<(f64, EdgeIdx)>,
    /// All the exit abscissas of edges, ordered by abscissa.
    exit: Vec<(f64, EdgeIdx)>,
}

fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    pairs(xs).chain(xs.last().zip(xs.first()))
}

fn pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2).map(|pair| (&pair[0], &pair[1]))
}

fn check_finite(p: &Point) -> Result<(), Error> {
    if p.x.is_nan() || p.y.is_nan() || p.z.is_nan() {
        Err(Error::NaN)
    } else if !p.is_finite() {
        Err(Error::Infinity)
    } else {
        Ok(())
    }
}

impl Edges {
    /// The number of edges in this arena.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Are there no edges at all?
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = EdgeIdx> {
        (0..self.edges.len()).map(EdgeIdx)
    }

    /// Iterate over all edges in this arena.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The smallest box containing every edge we've seen.
    pub fn bounding_box(&self) -> &BoundaryBox {
        &self.bbox
    }

    /// Returns the starting point of the edge at `idx`, relative to the edge's original orientation.
    ///
    /// The endpoints of the edge itself are stored in sweep-line order
    /// (i.e. `left` has the smaller `x` coordinate), regardless of the
    /// original orientation of the edge. Use this method to retrieve the
    /// edge's original start point.
    pub fn oriented_start(&self, idx: EdgeIdx) -> &Point {
        if self.orientation[idx.0] {
            self[idx].left()
        } else {
            self[idx].right()
        }
    }

    /// Returns the ending point of the edge at `idx`, relative to the edge's original orientation.
    pub fn oriented_end(&self, idx: EdgeIdx) -> &Point {
        if self.orientation[idx.0] {
            self[idx].right()
        } else {
            self[idx].left()
        }
    }

    /// Does the sweep-line orientation of `idx` agree with its original orientation?
    pub fn positively_oriented(&self, idx: EdgeIdx) -> bool {
        self.orientation[idx.0]
    }

    fn push_without_updating_enter_exit(&mut self, p: Point, q: Point) -> Result<EdgeIdx, Error> {
        check_finite(&p)?;
        check_finite(&q)?;

        let edge = Edge::new(p, q);
        if edge.is_degenerate() {
            log::warn!("adding a zero-length edge at {p:?}");
        }
        self.bbox.alter(&p);
        self.bbox.alter(&q);
        self.edges.push(edge);
        self.orientation.push(p <= q);
        Ok(EdgeIdx(self.edges.len() - 1))
    }

    // Undo any pushes past `old_len`, after one of them failed.
    fn truncate(&mut self, old_len: usize) {
        self.edges.truncate(old_len);
        self.orientation.truncate(old_len);
        self.bbox = BoundaryBox::default();
        for e in &self.edges {
            self.bbox.alter(e.left());
            self.bbox.alter(e.right());
        }
    }

    /// Add a single edge between `p` and `q`, returning its index.
    ///
    /// Fails (without adding anything) if any of the coordinates is infinite or NaN.
    pub fn add_edge(&mut self, p: impl Into<Point>, q: impl Into<Point>) -> Result<EdgeIdx, Error> {
        let old_len = self.edges.len();
        let idx = self.push_without_updating_enter_exit(p.into(), q.into())?;
        self.update_enter_exit(old_len);
        log::trace!("added {idx:?}: {:?}", self[idx]);
        Ok(idx)
    }

    /// Add a (non-closed) polyline to this arena, returning the indices of the new edges.
    ///
    /// Fails (without adding anything) if any of the coordinates is infinite or NaN.
    pub fn add_points<P: Into<Point>>(
        &mut self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<Vec<EdgeIdx>, Error> {
        let ps: Vec<Point> = ps.into_iter().map(|p| p.into()).collect();
        self.add_pairs(pairs(&ps))
    }

    /// Add a closed polyline to this arena, returning the indices of the new edges.
    ///
    /// Fails (without adding anything) if any of the coordinates is infinite or NaN.
    pub fn add_cycle<P: Into<Point>>(
        &mut self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<Vec<EdgeIdx>, Error> {
        let ps: Vec<Point> = ps.into_iter().map(|p| p.into()).collect();
        if ps.len() <= 2 {
            // Two points make a single edge, not a two-edge cycle.
            return self.add_pairs(pairs(&ps));
        }
        self.add_pairs(cyclic_pairs(&ps))
    }

    fn add_pairs<'a>(
        &mut self,
        pairs: impl Iterator<Item = (&'a Point, &'a Point)>,
    ) -> Result<Vec<EdgeIdx>, Error> {
        let old_len = self.edges.len();
        let mut ret = Vec::new();
        for (p, q) in pairs {
            match self.push_without_updating_enter_exit(*p, *q) {
                Ok(idx) => ret.push(idx),
                Err(e) => {
                    self.truncate(old_len);
                    return Err(e);
                }
            }
        }
        self.update_enter_exit(old_len);
        Ok(ret)
    }

    fn update_enter_exit(&mut self, old_len: usize) {
        for idx in old_len..self.len() {
            let edge_idx = EdgeIdx(idx);
            let edge = &self.edges[idx];

            self.enter.push((edge.left().x, edge_idx));
            self.exit.push((edge.right().x, edge_idx));
        }

        // We sort the enter edges by x position, and then by vertical
        // start position so that they're fairly likely to get inserted in the
        // sweep-line in order.
        self.enter.sort_by(|(x1, e1), (x2, e2)| {
            CheapOrderedFloat::from(*x1)
                .cmp(&CheapOrderedFloat::from(*x2))
                .then_with(|| {
                    CheapOrderedFloat::from(self.edges[e1.0].left().y)
                        .cmp(&CheapOrderedFloat::from(self.edges[e2.0].left().y))
                })
        });
        self.exit.sort_by(|(x1, _), (x2, _)| {
            CheapOrderedFloat::from(*x1).cmp(&CheapOrderedFloat::from(*x2))
        });
    }

    /// All the entrance abscissas of edges (i.e. the `x` coordinates of their
    /// left points), ordered by abscissa.
    pub fn entrances(&self) -> &[(f64, EdgeIdx)] {
        &self.enter
    }

    /// All the exit abscissas of edges (i.e. the `x` coordinates of their
    /// right points), ordered by abscissa.
    pub fn exits(&self) -> &[(f64, EdgeIdx)] {
        &self.exit
    }
}

impl std::ops::Index<EdgeIdx> for Edges {
    type Output = Edge;

    fn index(&self, index: EdgeIdx) -> &Self::Output {
        &self.edges[index.0]
    }
}
