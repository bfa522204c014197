//! The sweep-line status structure.
//!
//! A constrained triangulation is built by sweeping a vertical line from left
//! to right across the input. At each vertex, the sweep needs to know which
//! constraint edges are currently crossed by the sweep line, in what order,
//! and which of them are immediately above and below the vertex. The main
//! entry point is [`VerticalList`], which keeps track of all that.

mod vertical_list;

pub use vertical_list::{Neighbor, SearchResult, VerticalList};
