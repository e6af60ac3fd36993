//! Spatial indexing and nearest-stop search.

pub mod index;
pub mod node;
pub mod region;
pub mod search;

pub use index::SpatialIndex;
pub use node::{NodeId, QuadNode};
pub use region::{Quadrant, Region};
pub use search::{SearchEvent, SearchStats};
