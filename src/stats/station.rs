use crate::data::model::{split_trip_key, TripTable};

use super::mode;

/// Most popular stations and station pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// `(start, end)` recovered from the most frequent trip key.
    pub trip: Option<(String, String)>,
}

impl StationStats {
    /// Expects trip keys to have been derived.
    pub fn compute(table: &TripTable) -> Self {
        let trips = &table.trips;
        let trip = mode(trips.iter().map(|t| t.derived.trip_key.as_str()))
            .and_then(split_trip_key)
            .map(|(start, end)| (start.to_string(), end.to_string()));

        StationStats {
            start_station: mode(trips.iter().map(|t| t.start_station.as_str())).map(String::from),
            end_station: mode(trips.iter().map(|t| t.end_station.as_str())).map(String::from),
            trip,
        }
    }
}
