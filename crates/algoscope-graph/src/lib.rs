//! Algoscope Graph
//!
//! Random planar graphs for the path-search and tour algorithms.
//!
//! A graph is a set of uniformly random points in a rectangle, joined by the
//! edges of their Delaunay triangulation. Each unordered pair appears once,
//! canonicalised as `(low, high)`. Node 0 is the default start and the last
//! node the default goal.
//!
//! Graphs are immutable once built, so concurrent runs may share one behind
//! an `Arc` without locking.

mod error;
mod generate;
mod graph;
mod point;
mod shortest;
mod triangulate;

pub use error::{Error, Result};
pub use generate::{generate, generate_with};
pub use graph::{EdgeKey, Graph};
pub use point::{Bounds, Point};
pub use shortest::{AllPairs, MinCost, ShortestPaths};
pub use triangulate::delaunay_edges;
