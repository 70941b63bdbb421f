use log::debug;

use super::model::{FilterSpec, Trip, TripTable, ALL};

/// Whether a trip passes the month and day restrictions of `spec`.
///
/// * month `"all"` → no month constraint, otherwise the derived month must
///   equal the 1-based position of the name in the month list
/// * day `"all"` → no day constraint, otherwise the derived day name must
///   match case-insensitively
pub fn matches(trip: &Trip, spec: &FilterSpec) -> bool {
    if spec.month != ALL && spec.month_number() != Some(trip.derived.month) {
        return false;
    }
    match spec.day_name() {
        Some(day) => trip.derived.day_name.eq_ignore_ascii_case(day),
        None => true,
    }
}

/// Return a new table holding the trips of `table` that pass `spec`, in their
/// original order. The input is left untouched.
pub fn filter(table: &TripTable, spec: &FilterSpec) -> TripTable {
    let trips: Vec<Trip> = table
        .trips
        .iter()
        .filter(|trip| matches(trip, spec))
        .cloned()
        .collect();

    debug!(
        "filter month={} day={}: {} of {} trips retained",
        spec.month,
        spec.day,
        trips.len(),
        table.len()
    );

    TripTable::new(table.schema.clone(), trips)
}
