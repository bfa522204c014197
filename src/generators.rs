//! Utilities for generating examples, benchmarks, and test cases.

use crate::{EdgeIdx, Edges, Error, Point};

/// Generate `n` horizontal-ish polylines stacked on top of one another, with
/// `segments` edges each.
///
/// Each polyline zig-zags gently between `x = x0` and `x = x0 + segments`,
/// so a sweep across them always has `n` active edges, and the vertices of
/// neighboring lines are at the same abscissas. The elevation of each vertex
/// is its line number.
pub fn strata(x0: f64, n: usize, segments: usize) -> Vec<Vec<Point>> {
    (0..n)
        .map(|i| {
            (0..=segments)
                .map(|j| {
                    let wiggle = if j % 2 == 0 { 0.0 } else { 0.25 };
                    Point::new(x0 + j as f64, 2.0 * i as f64 + wiggle, i as f64)
                })
                .collect()
        })
        .collect()
}

/// Generate a fan of `n` edges that all end at the same point.
///
/// This is the shape of the constraints around a survey station, and the
/// worst case for the tie-breaking parts of the vertical order: at the
/// hub's abscissa, all the edges are at exactly the same height.
pub fn fan(hub: Point, radius: f64, n: usize) -> Vec<(Point, Point)> {
    (0..n)
        .map(|i| {
            // Spread over a half-circle on the left, so that the hub is always
            // the right point.
            let theta = std::f64::consts::PI * (i as f64 + 0.5) / n as f64;
            let p = Point::new(
                hub.x - radius * theta.sin(),
                hub.y + radius * theta.cos(),
                hub.z,
            );
            (p, hub)
        })
        .collect()
}

/// Add the output of [`strata`] to an arena, as open polylines.
pub fn add_strata(
    edges: &mut Edges,
    x0: f64,
    n: usize,
    segments: usize,
) -> Result<Vec<EdgeIdx>, Error> {
    let mut ret = Vec::new();
    for line in strata(x0, n, segments) {
        ret.extend(edges.add_points(line)?);
    }
    Ok(ret)
}

/// Add the output of [`fan`] to an arena.
pub fn add_fan(
    edges: &mut Edges,
    hub: Point,
    radius: f64,
    n: usize,
) -> Result<Vec<EdgeIdx>, Error> {
    fan(hub, radius, n)
        .into_iter()
        .map(|(p, q)| edges.add_edge(p, q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fans_share_their_hub() {
        let hub = Point::new(10.0, 5.0, 1.0);
        let mut edges = Edges::default();
        let idxs = add_fan(&mut edges, hub, 3.0, 16).unwrap();
        assert_eq!(idxs.len(), 16);
        for idx in idxs {
            assert_eq!(edges[idx].right(), &hub);
        }
    }

    #[test]
    fn strata_dont_overlap() {
        let mut edges = Edges::default();
        let idxs = add_strata(&mut edges, 0.0, 4, 10).unwrap();
        assert_eq!(idxs.len(), 40);
        for a in &idxs {
            for b in &idxs {
                assert!(!edges[*a].intersects(&edges[*b]) || a == b);
            }
        }
    }
}
