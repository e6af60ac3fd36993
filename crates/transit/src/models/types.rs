//! Core data types for stops and trips.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// A named stop at a fixed location.
///
/// `location` is the projected planar position (kilometres) used for spatial
/// lookups; `latitude`/`longitude` are kept as read from the source data.
/// Two stops are equal when their ids are equal.
#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    pub latitude: f64,
    pub longitude: f64,
    pub location: Point,
}

impl Stop {
    /// Stop with a planar location only, latitude and longitude set to zero.
    pub fn at(id: impl Into<StopIdentifier>, name: impl AsRef<str>, location: Point) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
            latitude: 0.0,
            longitude: 0.0,
            location,
        }
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A vehicle run visiting stops in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trip {
    pub id: TripIdentifier,
    pub stop_ids: Vec<StopIdentifier>,
}

impl Trip {
    pub fn new(id: impl Into<TripIdentifier>, stop_ids: Vec<StopIdentifier>) -> Self {
        Self {
            id: id.into(),
            stop_ids,
        }
    }

    pub fn serves(&self, stop_id: &StopIdentifier) -> bool {
        self.stop_ids.contains(stop_id)
    }

    /// Consecutive (from, to) stop pairs along this trip
    pub fn connections(&self) -> impl Iterator<Item = (&StopIdentifier, &StopIdentifier)> {
        self.stop_ids.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Result of a stop-name search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Stops whose name equals the query.
    Exact(Vec<Arc<Stop>>),
    /// No exact match; stops whose name starts with the query.
    Prefix(Vec<Arc<Stop>>),
    NoMatch,
}

impl SearchOutcome {
    pub fn stops(&self) -> &[Arc<Stop>] {
        match self {
            Self::Exact(stops) | Self::Prefix(stops) => stops,
            Self::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Point ({x}, {y}) lies outside the index region")]
    OutOfBounds { x: f64, y: f64 },

    #[error("Stop not found: {0}")]
    StopNotFound(StopIdentifier),

    #[error("Duplicate stop id: {0}")]
    DuplicateStop(StopIdentifier),

    #[error("Duplicate trip id: {0}")]
    DuplicateTrip(TripIdentifier),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransitError>;
