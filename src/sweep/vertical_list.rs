//! The status structure of the sweep: active edges in vertical order.

use crate::{
    edges::{EdgeIdx, Edges},
    geom::{Edge, Point},
    num::ordinates_close,
    order::vertical_order,
    Error,
};

/// The outcome of looking for an edge in a [`VerticalList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// The edge is stored at this position.
    Found(usize),
    /// The edge isn't stored; this is the position it would be inserted at.
    NotFound(usize),
}

impl SearchResult {
    /// The position of the edge, if it was found.
    pub fn index(&self) -> Option<usize> {
        match self {
            SearchResult::Found(i) => Some(*i),
            SearchResult::NotFound(_) => None,
        }
    }

    /// Where the edge belongs in the list: its position if it was found, or
    /// the position it would be inserted at otherwise.
    pub fn insertion_index(&self) -> usize {
        match self {
            SearchResult::Found(i) | SearchResult::NotFound(i) => *i,
        }
    }

    /// Packs this result into a single integer: the position if the edge was
    /// found, and `-(insertion_index) - 1` if it wasn't.
    pub fn encoded(&self) -> isize {
        match self {
            SearchResult::Found(i) => *i as isize,
            SearchResult::NotFound(i) => -(*i as isize) - 1,
        }
    }
}

/// The edge found to bound a point from one side, and the point it bounds.
///
/// `edge` is `None` if nothing bounds the point from that side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// The query point.
    pub point: Point,
    /// The bounding edge.
    pub edge: Option<EdgeIdx>,
}

/// The results of the most recent neighbor queries.
///
/// Anything that changes the list throws this away.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct NeighborCache {
    upper: Option<Neighbor>,
    lower: Option<Neighbor>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Upper,
    Lower,
}

/// Edges that are active on the sweep line, ordered from bottom to top.
///
/// The edges themselves live in an [`Edges`] arena; this list only stores
/// their indices, so almost every method takes the arena as an argument. Be
/// sure to always pass the same one.
///
/// The list is ordered by [`vertical_order`] at its current abscissa. That
/// order is re-established from scratch whenever the abscissa changes, so it
/// doesn't matter if edges cross in between. Edges that don't reach the
/// current abscissa (because they've just finished, or are just about to
/// start) are ordered along their extensions.
#[derive(Clone, Debug, Default)]
pub struct VerticalList {
    abscissa: f64,
    order: Vec<EdgeIdx>,
    cache: NeighborCache,
}

impl VerticalList {
    /// An empty list with its sweep line at `abscissa`.
    pub fn new(abscissa: f64) -> Self {
        VerticalList {
            abscissa,
            ..Default::default()
        }
    }

    /// An empty list with its sweep line through `p`.
    pub fn at_point(p: &Point) -> Self {
        VerticalList::new(p.x)
    }

    /// The `x` coordinate of the sweep line.
    pub fn abscissa(&self) -> f64 {
        self.abscissa
    }

    /// Moves the sweep line to `abscissa`, and re-sorts the list accordingly.
    pub fn set_abscissa(&mut self, edges: &Edges, abscissa: f64) {
        log::debug!(
            "moving sweep line from {} to {abscissa}, re-sorting {} edges",
            self.abscissa,
            self.order.len()
        );
        self.abscissa = abscissa;
        self.order
            .sort_by(|&a, &b| vertical_order(&edges[a], &edges[b], abscissa));
        self.invalidate();
        self.check_invariants(edges);
    }

    /// Moves the sweep line to pass through `p`, and re-sorts the list accordingly.
    pub fn set_abscissa_at(&mut self, edges: &Edges, p: &Point) {
        self.set_abscissa(edges, p.x);
    }

    /// The number of edges in the list.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The edge at position `index`, counting from the bottom.
    pub fn get(&self, index: usize) -> Result<EdgeIdx, Error> {
        self.order.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: self.order.len(),
        })
    }

    /// All the edges, from bottom to top.
    pub fn edges(&self) -> &[EdgeIdx] {
        &self.order
    }

    /// Iterates over the edges themselves, from bottom to top.
    pub fn iter_edges<'a>(&'a self, edges: &'a Edges) -> impl Iterator<Item = &'a Edge> + 'a {
        self.order.iter().map(move |&idx| &edges[idx])
    }

    /// Inserts an edge in its place.
    ///
    /// If some equal edges are already in the list, the new one goes just above them.
    pub fn add_edge(&mut self, edges: &Edges, idx: EdgeIdx) {
        let edge = &edges[idx];
        let pos = self.order.partition_point(|&other| {
            vertical_order(&edges[other], edge, self.abscissa) != std::cmp::Ordering::Greater
        });
        log::trace!("inserting {idx:?} at position {pos}");
        self.order.insert(pos, idx);
        self.invalidate();
        self.check_invariants(edges);
    }

    /// Inserts a bunch of edges at once.
    ///
    /// This gives the same order as adding them one by one, but it's faster
    /// if there are many of them.
    pub fn add_edges(&mut self, edges: &Edges, new: impl IntoIterator<Item = EdgeIdx>) {
        let old_len = self.order.len();
        self.order.extend(new);
        log::trace!("inserting {} edges", self.order.len() - old_len);
        let abscissa = self.abscissa;
        self.order
            .sort_by(|&a, &b| vertical_order(&edges[a], &edges[b], abscissa));
        self.invalidate();
        self.check_invariants(edges);
    }

    /// Looks for an edge equal to `edge`, using binary search.
    pub fn search_edge(&self, edges: &Edges, edge: &Edge) -> SearchResult {
        match self
            .order
            .binary_search_by(|&other| vertical_order(&edges[other], edge, self.abscissa))
        {
            Ok(i) => SearchResult::Found(i),
            Err(i) => SearchResult::NotFound(i),
        }
    }

    /// The position of the lowest stored edge equal to `edge`.
    pub fn position_of(&self, edges: &Edges, edge: &Edge) -> Option<usize> {
        let pos = self.order.partition_point(|&other| {
            vertical_order(&edges[other], edge, self.abscissa) == std::cmp::Ordering::Less
        });
        self.order
            .get(pos)
            .is_some_and(|&other| edges[other] == *edge)
            .then_some(pos)
    }

    /// Removes the lowest stored edge equal to `edge`, returning its index.
    ///
    /// Does nothing (and returns `None`) if there's no such edge.
    pub fn remove_edge(&mut self, edges: &Edges, edge: &Edge) -> Option<EdgeIdx> {
        let ret = self.position_of(edges, edge).map(|pos| self.order.remove(pos));
        if ret.is_none() {
            log::debug!("{edge:?} isn't in the list at abscissa {}", self.abscissa);
        }
        self.invalidate();
        ret
    }

    /// Removes the edge at position `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<EdgeIdx, Error> {
        if index >= self.order.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.order.len(),
            });
        }
        let ret = self.order.remove(index);
        self.invalidate();
        Ok(ret)
    }

    /// Removes every edge whose right point is `p`, returning how many were removed.
    ///
    /// This is what happens when the sweep line passes a vertex: all the edges
    /// ending there become inactive.
    pub fn remove_edge_from_right_point(&mut self, edges: &Edges, p: &Point) -> usize {
        let old_len = self.order.len();
        self.order.retain(|&idx| edges[idx].right() != p);
        let removed = old_len - self.order.len();
        log::trace!("removed {removed} edges ending at {p:?}");
        self.invalidate();
        removed
    }

    /// The edge immediately above `p`, if there is one.
    ///
    /// Only edges whose `x` range contains `p.x` are considered, and they
    /// must pass strictly above `p`: an edge through `p` doesn't bound it.
    pub fn upper_edge(&mut self, edges: &Edges, p: &Point) -> Option<EdgeIdx> {
        if let Some(n) = self.cache.upper.filter(|n| n.point == *p) {
            return n.edge;
        }
        let edge = self.bound(edges, p, Side::Upper);
        self.cache.upper = Some(Neighbor { point: *p, edge });
        edge
    }

    /// The edge immediately below `p`, if there is one.
    ///
    /// Only edges whose `x` range contains `p.x` are considered, and they
    /// must pass strictly below `p`: an edge through `p` doesn't bound it.
    pub fn lower_edge(&mut self, edges: &Edges, p: &Point) -> Option<EdgeIdx> {
        if let Some(n) = self.cache.lower.filter(|n| n.point == *p) {
            return n.edge;
        }
        let edge = self.bound(edges, p, Side::Lower);
        self.cache.lower = Some(Neighbor { point: *p, edge });
        edge
    }

    /// Does `candidate` cross either of the edges immediately above and below `p`?
    ///
    /// Meeting one of them at a shared endpoint isn't a crossing. If the list
    /// is a valid sweep status (no two active edges cross), anything
    /// `candidate` could cross on its way to `p` would have to be crossed
    /// after one of these two first.
    pub fn intersects_upper_or_lower(
        &mut self,
        edges: &Edges,
        p: &Point,
        candidate: &Edge,
    ) -> bool {
        let upper = self.upper_edge(edges, p);
        let lower = self.lower_edge(edges, p);
        [upper, lower]
            .into_iter()
            .flatten()
            .any(|idx| edges[idx].intersects(candidate))
    }

    /// The edge found by the most recent upper neighbor query.
    pub fn last_upper_edge(&self) -> Option<EdgeIdx> {
        self.cache.upper.and_then(|n| n.edge)
    }

    /// The edge found by the most recent lower neighbor query.
    pub fn last_lower_edge(&self) -> Option<EdgeIdx> {
        self.cache.lower.and_then(|n| n.edge)
    }

    /// The point of the most recent upper neighbor query.
    pub fn last_upper_point(&self) -> Option<Point> {
        self.cache.upper.map(|n| n.point)
    }

    /// The point of the most recent lower neighbor query.
    pub fn last_lower_point(&self) -> Option<Point> {
        self.cache.lower.map(|n| n.point)
    }

    fn invalidate(&mut self) {
        self.cache = NeighborCache::default();
    }

    // A linear scan, because the list is sorted at our abscissa and not at `p.x`.
    fn bound(&self, edges: &Edges, p: &Point, side: Side) -> Option<EdgeIdx> {
        let mut best: Option<(f64, EdgeIdx)> = None;
        for &idx in &self.order {
            let edge = &edges[idx];
            if !edge.spans(p.x) {
                continue;
            }

            // A vertical edge at p.x bounds p only if all of it is on one side.
            let v = match (edge.is_vertical(), side) {
                (true, Side::Upper) => edge.left().y,
                (true, Side::Lower) => edge.right().y,
                (false, _) => edge.y_at(p.x),
            };
            if ordinates_close(p.x, v, p.y) {
                continue;
            }

            let closer = match (side, best) {
                (Side::Upper, _) if v < p.y => false,
                (Side::Lower, _) if v > p.y => false,
                (_, None) => true,
                // Ties go to the edge that's closest to p in the list order.
                (Side::Upper, Some((best_v, _))) => v < best_v,
                (Side::Lower, Some((best_v, _))) => v >= best_v,
            };
            if closer {
                best = Some((v, idx));
            }
        }
        best.map(|(_, idx)| idx)
    }

    // Used in tests, and when enabling slow-asserts
    #[allow(dead_code)]
    fn find_invalid_order(&self, edges: &Edges) -> Option<(usize, usize)> {
        self.order
            .windows(2)
            .position(|w| {
                vertical_order(&edges[w[0]], &edges[w[1]], self.abscissa)
                    == std::cmp::Ordering::Greater
            })
            .map(|i| (i, i + 1))
    }

    #[cfg(feature = "slow-asserts")]
    fn check_invariants(&self, edges: &Edges) {
        if let Some((i, j)) = self.find_invalid_order(edges) {
            panic!(
                "edges {:?} and {:?} out of order at abscissa {}",
                edges[self.order[i]], edges[self.order[j]], self.abscissa
            );
        }
    }

    #[cfg(not(feature = "slow-asserts"))]
    fn check_invariants(&self, _edges: &Edges) {}
}
