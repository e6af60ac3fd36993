//! In-memory transit provider backed by loaded stop and trip tables.
//!
//! This is the core implementation that keeps every stop in an id-keyed map
//! and in two indexes: a quadtree by location for map clicks, and a prefix
//! trie by lowercased name for searches. Stops are shared between all three
//! through `Arc`s.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

use geo::Point;
use tracing::{debug, info};

use crate::config::IndexConfig;
use crate::identifiers::*;
use crate::loader::{self, Equirectangular, Projection};
use crate::models::{traits::*, types::*};
use crate::prefix::PrefixIndex;
use crate::spatial::{Region, SpatialIndex};

/// In-memory transit provider with spatial and name indexing
#[derive(Clone, Debug)]
pub struct StaticTransitProvider {
    // Core data
    stops: Vec<Arc<Stop>>,
    trips: Vec<Arc<Trip>>,

    // Lookup maps
    stop_map: HashMap<StopIdentifier, Arc<Stop>>,
    trip_map: HashMap<TripIdentifier, Arc<Trip>>,
    trips_by_stop: HashMap<StopIdentifier, Vec<Arc<Trip>>>,

    // Indices
    stop_tree: SpatialIndex<Stop>,
    stop_names: PrefixIndex<Stop>,

    config: IndexConfig,
}

impl StaticTransitProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            stops: Vec::new(),
            trips: Vec::new(),
            stop_map: HashMap::new(),
            trip_map: HashMap::new(),
            trips_by_stop: HashMap::new(),
            stop_tree: SpatialIndex::with_config(Self::root_region(&[], &config), config),
            stop_names: PrefixIndex::new(),
            config,
        }
    }

    /// Build a provider from already projected stops and their trips.
    ///
    /// Fails on duplicate stop or trip ids and on trips that reference a stop
    /// missing from `stops`.
    pub fn from_data(stops: Vec<Stop>, trips: Vec<Trip>) -> Result<Self> {
        Self::from_data_with_config(stops, trips, IndexConfig::default())
    }

    pub fn from_data_with_config(
        stops: Vec<Stop>,
        trips: Vec<Trip>,
        config: IndexConfig,
    ) -> Result<Self> {
        let stops: Vec<Arc<Stop>> = stops.into_iter().map(Arc::new).collect();
        let trips: Vec<Arc<Trip>> = trips.into_iter().map(Arc::new).collect();

        // Build lookup maps
        let mut stop_map = HashMap::with_capacity(stops.len());
        for stop in &stops {
            if stop_map.insert(stop.id.clone(), stop.clone()).is_some() {
                return Err(TransitError::DuplicateStop(stop.id.clone()));
            }
        }

        let mut trip_map = HashMap::with_capacity(trips.len());
        let mut trips_by_stop: HashMap<StopIdentifier, Vec<Arc<Trip>>> = HashMap::new();
        for trip in &trips {
            if trip_map.insert(trip.id.clone(), trip.clone()).is_some() {
                return Err(TransitError::DuplicateTrip(trip.id.clone()));
            }
            for stop_id in &trip.stop_ids {
                if !stop_map.contains_key(stop_id) {
                    return Err(TransitError::StopNotFound(stop_id.clone()));
                }
                // A trip's stops are recorded in one pass, so a repeat visit
                // can only match the most recent trip for that stop
                let through = trips_by_stop.entry(stop_id.clone()).or_default();
                if !through.last().is_some_and(|t| Arc::ptr_eq(t, trip)) {
                    through.push(trip.clone());
                }
            }
        }

        // Build indices
        let mut stop_tree = SpatialIndex::with_config(Self::root_region(&stops, &config), config);
        let mut stop_names = PrefixIndex::new();
        for stop in &stops {
            stop_tree.try_insert(stop.clone())?;
            stop_names.insert(&stop.name.to_lowercase(), stop.clone());
        }

        info!(
            stops = stops.len(),
            trips = trips.len(),
            nodes = stop_tree.node_count(),
            depth = stop_tree.depth(),
            "built transit indexes"
        );

        Ok(Self {
            stops,
            trips,
            stop_map,
            trip_map,
            trips_by_stop,
            stop_tree,
            stop_names,
            config,
        })
    }

    /// Parse stop and trip tables, projecting stops around the centre of
    /// their own extents.
    pub fn load<S: BufRead, T: BufRead>(stops: S, trips: T) -> Result<Self> {
        let records = loader::read_stops(stops)?;
        let projection = Equirectangular::centred_on(&records);
        Self::load_records(records, trips, &projection, IndexConfig::default())
    }

    /// Parse stop and trip tables with an explicit projection and config.
    pub fn load_with<S: BufRead, T: BufRead>(
        stops: S,
        trips: T,
        projection: &dyn Projection,
        config: IndexConfig,
    ) -> Result<Self> {
        let records = loader::read_stops(stops)?;
        Self::load_records(records, trips, projection, config)
    }

    fn load_records<T: BufRead>(
        records: Vec<loader::StopRecord>,
        trips: T,
        projection: &dyn Projection,
        config: IndexConfig,
    ) -> Result<Self> {
        let stops = records
            .into_iter()
            .map(|record| record.into_stop(projection))
            .collect();
        let trips = loader::read_trips(trips)?;
        Self::from_data_with_config(stops, trips, config)
    }

    /// Replace the loaded network with freshly parsed tables.
    ///
    /// The new indexes are built completely before they replace the old
    /// ones; on error the provider is left unchanged.
    pub fn reload<S: BufRead, T: BufRead>(&mut self, stops: S, trips: T) -> Result<()> {
        let records = loader::read_stops(stops)?;
        let projection = Equirectangular::centred_on(&records);
        *self = Self::load_records(records, trips, &projection, self.config)?;
        Ok(())
    }

    /// Drop every stop and trip.
    pub fn clear(&mut self) {
        *self = Self::with_config(self.config);
    }

    /// Data extents padded on every side; a padded point at the origin for
    /// an empty network.
    fn root_region(stops: &[Arc<Stop>], config: &IndexConfig) -> Region {
        Region::from_extents(stops.iter().map(|s| s.location))
            .unwrap_or_else(|| Region::from_corners(Point::new(0.0, 0.0), Point::new(0.0, 0.0)))
            .padded(config.padding)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn region(&self) -> &Region {
        self.stop_tree.region()
    }

    pub fn spatial_index(&self) -> &SpatialIndex<Stop> {
        &self.stop_tree
    }

    pub fn name_index(&self) -> &PrefixIndex<Stop> {
        &self.stop_names
    }
}

impl Default for StaticTransitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitProvider for StaticTransitProvider {
    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<Stop>> {
        self.stop_map.get(id).cloned()
    }

    fn get_trip(&self, id: &TripIdentifier) -> Option<Arc<Trip>> {
        self.trip_map.get(id).cloned()
    }

    fn all_stops(&self) -> Vec<Arc<Stop>> {
        self.stops.clone()
    }

    fn all_trips(&self) -> Vec<Arc<Trip>> {
        self.trips.clone()
    }

    fn trips_through(&self, id: &StopIdentifier) -> Vec<Arc<Trip>> {
        self.trips_by_stop.get(id).cloned().unwrap_or_default()
    }

    fn stop_at(&self, point: Point) -> Option<Arc<Stop>> {
        self.stop_tree.nearest(point)
    }

    fn search(&self, query: &str) -> SearchOutcome {
        let key = query.to_lowercase();

        let outcome = match self.stop_names.lookup_exact(&key) {
            Some(exact) if !exact.is_empty() => SearchOutcome::Exact(exact.to_vec()),
            _ => {
                let prefixed = self.stop_names.lookup_prefix(&key);
                if prefixed.is_empty() {
                    SearchOutcome::NoMatch
                } else {
                    SearchOutcome::Prefix(prefixed)
                }
            }
        };

        debug!(query, matches = outcome.stops().len(), "stop name search");
        outcome
    }
}
