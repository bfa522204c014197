#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod edges;
mod geom;
pub mod num;
pub mod order;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

pub use edges::{EdgeIdx, Edges};
pub use geom::{BoundaryBox, Edge, EdgeIntersection, Point};
pub use order::{vertical_order, VerticalComparator};
pub use sweep::{Neighbor, SearchResult, VerticalList};

/// Something went wrong with the input, or with a positional lookup.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A position past the end of a list.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange {
        /// The position that was asked for.
        index: usize,
        /// The length of the list.
        len: usize,
    },
    /// At least one of the inputs was infinite.
    #[error("one of the inputs was infinite")]
    Infinity,
    /// At least one of the inputs was not a number.
    #[error("one of the inputs had a NaN")]
    NaN,
}
