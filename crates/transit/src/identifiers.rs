//! Type-safe identifiers for stops and trips.
//!
//! Identifiers wrap an `Arc<str>`, so the id-keyed stop table, the trips and
//! both indexes can share them without copying the underlying string.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_identifier!(StopIdentifier);
impl_identifier!(TripIdentifier);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stop, Trip};
    use crate::prefix::PrefixIndex;
    use geo::Point;
    use std::collections::HashMap;

    #[test]
    fn test_stop_id_is_shared_not_copied() {
        let stop = Arc::new(Stop::at("cp", "Courtenay Place", Point::new(0.0, 0.0)));

        // The id-keyed table and the name index hold the same id allocation
        let mut table = HashMap::new();
        table.insert(stop.id.clone(), stop.clone());
        let mut names = PrefixIndex::new();
        names.insert("courtenay place", stop.clone());

        let (key, _) = table.iter().next().unwrap();
        let named = &names.lookup_exact("courtenay place").unwrap()[0];
        assert!(Arc::ptr_eq(&key.0, &named.id.0));
        assert!(Arc::ptr_eq(&key.0, &stop.id.0));
    }

    #[test]
    fn test_trip_stop_ids_resolve_by_value() {
        let stops = [
            Stop::at("cp", "Courtenay Place", Point::new(0.0, 0.0)),
            Stop::at("lq", "Lambton Quay", Point::new(1.0, 1.0)),
        ];
        let table: HashMap<StopIdentifier, &Stop> =
            stops.iter().map(|s| (s.id.clone(), s)).collect();

        // Parsed separately, so equal by value but not by pointer
        let trip = Trip::new("t1", vec![String::from("lq").into(), "cp".into()]);
        assert!(!Arc::ptr_eq(&trip.stop_ids[1].0, &stops[0].id.0));

        let names: Vec<_> = trip.stop_ids.iter().map(|id| &*table[id].name).collect();
        assert_eq!(names, vec!["Lambton Quay", "Courtenay Place"]);
        assert_ne!(trip.stop_ids[0], StopIdentifier::new("LQ"));
    }

    #[test]
    fn test_identifiers_read_as_plain_strings() {
        let trip = Trip::new("loop", vec!["cp".into()]);

        assert_eq!(trip.id.to_string(), "loop");
        assert_eq!(trip.id.as_ref(), trip.id.as_str());
        assert_eq!(format!("{}->{}", trip.id, trip.stop_ids[0]), "loop->cp");
    }
}
