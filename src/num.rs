//! Float ordering and the tolerances used by the sweep.

use std::hash::Hash;

/// How many machine epsilons of slack we allow, relative to the magnitude of
/// the numbers being compared.
///
/// Survey data tends to have large coordinates (hundreds of thousands of
/// meters) with sub-meter detail, so an absolute tolerance is useless there.
pub const RELATIVE_SLACK: f64 = 64.0 * f64::EPSILON;

/// A wrapper for `f64` that implements `Ord`.
///
/// This one just panics when comparing NaNs -- it doesn't order them, nor does
/// it guard against them on construction. Coordinates are checked for NaNs
/// when they enter the edge arena, so there should be none by the time we
/// compare anything.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl Hash for CheapOrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Adding zero turns -0.0 into 0.0, which compares equal to it.
        (self.0 + 0.0).to_bits().hash(state)
    }
}

// Now comes the fishy stuff.
impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 < other.0 {
            std::cmp::Ordering::Less
        } else if self.0 > other.0 {
            std::cmp::Ordering::Greater
        } else {
            debug_assert!(!self.0.is_nan() && !other.0.is_nan());
            std::cmp::Ordering::Equal
        }
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

/// The tolerance for deciding that two ordinates evaluated at `abscissa` are
/// the same.
///
/// Evaluating a line at `abscissa` loses precision proportional to the
/// magnitude of both the abscissa and the result, so all of them contribute.
pub fn ordinate_tolerance(abscissa: f64, y0: f64, y1: f64) -> f64 {
    let m = abscissa.abs().max(y0.abs()).max(y1.abs()).max(1.0);
    m * RELATIVE_SLACK
}

/// Are `a` and `b` equal, up to [`ordinate_tolerance`]?
pub fn ordinates_close(abscissa: f64, a: f64, b: f64) -> bool {
    (a - b).abs() <= ordinate_tolerance(abscissa, a, b)
}
