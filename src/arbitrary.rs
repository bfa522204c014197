//! Utilities for fuzz and/or property testing using `arbitrary`.
//!
//! The generators here are biased towards the configurations that make sweep
//! lines unhappy: shared endpoints, nearly parallel edges, vertical edges and
//! large coordinates.

use arbitrary::Unstructured;

use crate::geom::{Edge, Point};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    // Survey coordinates are often large, with small differences between them.
    let big: bool = u.arbitrary()?;
    if big {
        float_in_range(2e5, 3e6, u)
    } else {
        float_in_range(-1e3, 1e3, u)
    }
}

/// Generate a float in some range, but give it a chance to be close to another float.
fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        Ok((orig * scale).clamp(start, end))
    } else {
        float_in_range(start, end, u)
    }
}

/// Generate an arbitrary point, on the `z = 0` plane.
pub fn point(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(float(u)?, float(u)?, 0.0))
}

// A point near `orig`: either a few ulps away, or anywhere in a unit box around it.
fn point_near(orig: &Point, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    let x = another_float_in_range(orig.x, orig.x - 1.0, orig.x + 1.0, u)?;
    let y = another_float_in_range(orig.y, orig.y - 1.0, orig.y + 1.0, u)?;
    Ok(Point::new(x, y, 0.0))
}

/// Generate an arbitrary edge, which is sometimes vertical.
pub fn edge(u: &mut Unstructured<'_>) -> Result<Edge, arbitrary::Error> {
    let p = point(u)?;
    let vertical: bool = u.ratio(1, 8)?;
    let q = if vertical {
        Point::new(p.x, float_in_range(p.y - 10.0, p.y + 10.0, u)?, 0.0)
    } else {
        point_near(&p, u)?
    };
    Ok(Edge::new(p, q))
}

/// Generate an arbitrary edge that has a good chance of being nearly degenerate
/// with respect to `first`: sharing an endpoint, nearly parallel, or on the same line.
pub fn another_edge(u: &mut Unstructured<'_>, first: &Edge) -> Result<Edge, arbitrary::Error> {
    let kind: u8 = u.int_in_range(0..=4)?;
    let (l, r) = (*first.left(), *first.right());
    let e = match kind {
        // Continue on from the right point.
        0 => Edge::new(r, point_near(&r, u)?),
        // Share the left point.
        1 => Edge::new(l, point_near(&r, u)?),
        // Share the right point.
        2 => Edge::new(point_near(&l, u)?, r),
        // Collinear, with a different extent.
        3 => {
            let t0 = float_in_range(-1.0, 2.0, u)?;
            let t1 = float_in_range(-1.0, 2.0, u)?;
            Edge::new(l.affine(&r, t0), l.affine(&r, t1))
        }
        _ => edge(u)?,
    };
    Ok(e)
}

/// Generate an abscissa that is on, or close to, the `x` range of `edge`.
pub fn abscissa_near(u: &mut Unstructured<'_>, edge: &Edge) -> Result<f64, arbitrary::Error> {
    let which: u8 = u.int_in_range(0..=3)?;
    Ok(match which {
        0 => edge.left().x,
        1 => edge.right().x,
        _ => {
            let (l, r) = (edge.left().x, edge.right().x);
            float_in_range(l - (r - l), r + (r - l), u)?
        }
    })
}
