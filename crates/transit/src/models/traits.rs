//! Core traits for indexed entities and the providers that serve them.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Entity Traits
// ============================================================================

/// Anything with a fixed position in the planar coordinate space used by the
/// spatial index.
///
/// The location must not change while the value is stored in an index.
pub trait Located {
    fn location(&self) -> Point;
}

impl Located for Stop {
    fn location(&self) -> Point {
        self.location
    }
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Read-only access to a loaded network.
pub trait TransitProvider {
    // ---- Lookups ----
    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<Stop>>;
    fn get_trip(&self, id: &TripIdentifier) -> Option<Arc<Trip>>;

    // ---- Collections ----
    fn all_stops(&self) -> Vec<Arc<Stop>>;
    fn all_trips(&self) -> Vec<Arc<Trip>>;

    /// Trips that call at the given stop
    fn trips_through(&self, id: &StopIdentifier) -> Vec<Arc<Trip>>;

    // ---- Queries ----

    /// Stop closest to a planar point (e.g. a map click)
    fn stop_at(&self, point: Point) -> Option<Arc<Stop>>;

    /// Case-insensitive name search: exact matches if any, otherwise
    /// prefix matches
    fn search(&self, query: &str) -> SearchOutcome;
}
