//! # transit-finder
//!
//! Interactive stop lookup for a transit map.
//!
//! ## Features
//!
//! - **Click lookup**: region quadtree with branch-and-bound nearest-stop search
//! - **Name search**: character trie with exact and prefix lookup
//! - **Loading**: tab-delimited stop and trip tables, projected to kilometres
//!
//! Both indexes are built once per data load and are read-only afterwards.
//!
//! ## Example
//!
//! ```
//! use transit_finder::prelude::*;
//! use geo::Point;
//!
//! let stops = vec![
//!     Stop::at("A", "Alpha", Point::new(0.0, 0.0)),
//!     Stop::at("B", "Bravo", Point::new(10.0, 0.0)),
//!     Stop::at("C", "Charlie", Point::new(0.0, 10.0)),
//! ];
//! let trips = vec![Trip::new("t1", vec!["A".into(), "B".into()])];
//!
//! let provider = StaticTransitProvider::from_data(stops, trips)?;
//!
//! // A click near the origin selects Alpha
//! let clicked = provider.stop_at(Point::new(1.0, 1.0)).unwrap();
//! assert_eq!(clicked.id.as_str(), "A");
//!
//! // Searches are case-insensitive
//! assert_eq!(provider.search("BRA").stops().len(), 1);
//! assert_eq!(provider.trips_through(&clicked.id).len(), 1);
//! # Ok::<(), TransitError>(())
//! ```

pub mod config;
pub mod identifiers;
pub mod loader;
pub mod models;
pub mod prefix;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::IndexConfig;
    pub use crate::identifiers::*;
    pub use crate::loader::{Equirectangular, Projection, StopRecord};
    pub use crate::models::{traits::*, types::*};
    pub use crate::prefix::PrefixIndex;
    pub use crate::provider::StaticTransitProvider;
    pub use crate::spatial::{Quadrant, Region, SpatialIndex};
}

pub use prelude::*;
