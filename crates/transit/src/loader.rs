//! Reading stop and trip tables and projecting them onto the planar map.
//!
//! Both tables are tab-delimited text with one header line:
//!
//! ```text
//! stop_id<TAB>stop_name<TAB>stop_lat<TAB>stop_lon
//! trip_id<TAB>stop_id<TAB>stop_id<TAB>...
//! ```
//!
//! Blank lines are ignored. Line numbers in errors count the header as line 1.

use std::io::BufRead;

use geo::Point;

use crate::identifiers::*;
use crate::models::{Result, Stop, TransitError, Trip};

/// Converts geographic coordinates into the planar space used by the spatial
/// index.
pub trait Projection {
    fn project(&self, latitude: f64, longitude: f64) -> Point;
}

/// Equirectangular projection in kilometres around a reference point.
///
/// Accurate enough for a city-sized network; distortion grows with distance
/// from the reference latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Equirectangular {
    pub centre_latitude: f64,
    pub centre_longitude: f64,
}

impl Equirectangular {
    pub const KM_PER_DEGREE: f64 = 111.0;

    pub fn new(centre_latitude: f64, centre_longitude: f64) -> Self {
        Self {
            centre_latitude,
            centre_longitude,
        }
    }

    /// Projection centred on the middle of the records' extents, or on (0, 0)
    /// when there are none.
    pub fn centred_on(records: &[StopRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::new(0.0, 0.0);
        };

        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);
        for r in &records[1..] {
            min_lat = min_lat.min(r.latitude);
            max_lat = max_lat.max(r.latitude);
            min_lon = min_lon.min(r.longitude);
            max_lon = max_lon.max(r.longitude);
        }

        Self::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0)
    }
}

impl Projection for Equirectangular {
    fn project(&self, latitude: f64, longitude: f64) -> Point {
        let y = (latitude - self.centre_latitude) * Self::KM_PER_DEGREE;
        let x = (longitude - self.centre_longitude)
            * Self::KM_PER_DEGREE
            * self.centre_latitude.to_radians().cos();
        Point::new(x, y)
    }
}

/// One row of the stops table.
#[derive(Clone, Debug, PartialEq)]
pub struct StopRecord {
    pub id: StopIdentifier,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StopRecord {
    pub fn into_stop(self, projection: &dyn Projection) -> Stop {
        let location = projection.project(self.latitude, self.longitude);
        Stop {
            id: self.id,
            name: self.name.into(),
            latitude: self.latitude,
            longitude: self.longitude,
            location,
        }
    }
}

/// Data lines with their 1-based line numbers, header and blanks skipped.
fn data_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .skip(1)
        .map(|(i, line)| -> Result<(usize, String)> { Ok((i + 1, line?)) })
        .filter(|line| match line {
            Ok((_, text)) => !text.trim().is_empty(),
            Err(_) => true,
        })
}

fn parse_coordinate(field: &str, name: &str, line: usize) -> Result<f64> {
    let value: f64 = field.trim().parse().map_err(|_| TransitError::Parse {
        line,
        reason: format!("invalid {name} '{field}'"),
    })?;

    if !value.is_finite() {
        return Err(TransitError::Parse {
            line,
            reason: format!("{name} must be finite, got '{field}'"),
        });
    }
    Ok(value)
}

/// Parse the stops table.
pub fn read_stops<R: BufRead>(reader: R) -> Result<Vec<StopRecord>> {
    let mut records = Vec::new();

    for item in data_lines(reader) {
        let (line, text) = item?;
        let fields: Vec<&str> = text.trim_end_matches('\r').split('\t').collect();
        let [id, name, lat, lon, ..] = fields[..] else {
            return Err(TransitError::Parse {
                line,
                reason: format!("expected 4 tab-separated fields, found {}", fields.len()),
            });
        };

        if id.is_empty() {
            return Err(TransitError::Parse {
                line,
                reason: "empty stop id".into(),
            });
        }

        records.push(StopRecord {
            id: StopIdentifier::new(id),
            name: name.to_string(),
            latitude: parse_coordinate(lat, "latitude", line)?,
            longitude: parse_coordinate(lon, "longitude", line)?,
        });
    }

    Ok(records)
}

/// Parse the trips table. Stop references are not checked here.
pub fn read_trips<R: BufRead>(reader: R) -> Result<Vec<Trip>> {
    let mut trips = Vec::new();

    for item in data_lines(reader) {
        let (line, text) = item?;
        let mut fields = text.trim_end_matches('\r').split('\t');
        let id = fields.next().unwrap_or_default();
        if id.is_empty() {
            return Err(TransitError::Parse {
                line,
                reason: "empty trip id".into(),
            });
        }

        let stop_ids = fields
            .filter(|field| !field.is_empty())
            .map(StopIdentifier::new)
            .collect();
        trips.push(Trip::new(id, stop_ids));
    }

    Ok(trips)
}
