use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Months covered by the published data sets (first half of the year only).
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Days of the week, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Title-cased day names as derived from timestamps, Monday first.
const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Separator between start and end station inside a trip key.
///
/// Assumed absent from station names; a name containing it would split at the
/// first occurrence when the key is decomposed.
pub const TRIP_KEY_SEPARATOR: char = '^';

/// Name used when a filter selects every month or day.
pub const ALL: &str = "all";

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// The cities with a published trip file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File holding this city's trips, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.name()))
    }
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// One resolved set of filter answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    /// `"all"` or one of [`MONTHS`].
    pub month: String,
    /// `"all"` or one of [`WEEKDAYS`].
    pub day: String,
}

impl FilterSpec {
    pub fn new(city: City, month: &str, day: &str) -> Self {
        FilterSpec {
            city,
            month: month.to_ascii_lowercase(),
            day: day.to_ascii_lowercase(),
        }
    }

    /// 1-based month number, or `None` when every month is selected or the
    /// name is not in the vocabulary.
    pub fn month_number(&self) -> Option<u32> {
        MONTHS
            .iter()
            .position(|m| *m == self.month)
            .map(|i| i as u32 + 1)
    }

    /// Requested day name, or `None` when every day is selected.
    pub fn day_name(&self) -> Option<&str> {
        (self.day != ALL).then_some(self.day.as_str())
    }
}

// ---------------------------------------------------------------------------
// Schema – which raw columns a loaded file carries
// ---------------------------------------------------------------------------

/// Optional columns detected in the loaded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Retained raw columns of a loaded file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<String>,
    pub capabilities: Capabilities,
}

// ---------------------------------------------------------------------------
// Trip – one row of the table
// ---------------------------------------------------------------------------

/// Fields computed from a trip once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    /// 1-based calendar month of the start time.
    pub month: u32,
    /// Title-cased weekday of the start time, e.g. `"Monday"`.
    pub day_name: &'static str,
    /// Hour of the start time, 0–23.
    pub hour: u32,
    /// `start ^ end`; empty until [`TripTable::derive_trip_keys`] runs.
    pub trip_key: String,
}

impl Derived {
    pub fn from_start(start: NaiveDateTime) -> Self {
        Derived {
            month: start.month(),
            day_name: day_name(start.weekday()),
            hour: start.hour(),
            trip_key: String::new(),
        }
    }
}

/// A single trip (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Trip duration in seconds; some cities publish fractional values.
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub derived: Derived,
    /// Retained raw cells, aligned with [`Schema::columns`].
    pub raw: Vec<String>,
}

// ---------------------------------------------------------------------------
// TripTable – the loaded (and possibly filtered) data set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TripTable {
    pub schema: Schema,
    /// Trips in file order.
    pub trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(schema: Schema, trips: Vec<Trip>) -> Self {
        TripTable { schema, trips }
    }

    /// Join start and end station of every trip into its trip key.
    pub fn derive_trip_keys(&mut self) {
        for trip in &mut self.trips {
            trip.derived.trip_key = trip_key(&trip.start_station, &trip.end_station);
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn trip_key(start: &str, end: &str) -> String {
    format!("{start}{TRIP_KEY_SEPARATOR}{end}")
}

/// Split a trip key back into `(start, end)`.
pub fn split_trip_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(TRIP_KEY_SEPARATOR)
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// `"new york city"` → `"New York City"`.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn derived_fields_follow_start_time() {
        // 2017-03-06 was a Monday.
        let start = NaiveDate::from_ymd_opt(2017, 3, 6)
            .unwrap()
            .and_hms_opt(17, 45, 0)
            .unwrap();
        let derived = Derived::from_start(start);
        assert_eq!(derived.month, 3);
        assert_eq!(derived.day_name, "Monday");
        assert_eq!(derived.hour, 17);
        assert!(derived.trip_key.is_empty());
    }

    #[test]
    fn trip_key_splits_back_into_stations() {
        let key = trip_key("Canal St & Adams St", "Clinton St & Madison St");
        assert_eq!(key, "Canal St & Adams St^Clinton St & Madison St");
        assert_eq!(
            split_trip_key(&key),
            Some(("Canal St & Adams St", "Clinton St & Madison St"))
        );
    }

    #[test]
    fn city_names_and_files() {
        assert_eq!(City::Washington.file_name(), "washington.csv");
        assert_eq!(City::NewYorkCity.name(), "new york city");
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
    }

    #[test]
    fn filter_spec_month_number_is_one_based() {
        assert_eq!(FilterSpec::new(City::Chicago, "March", "all").month_number(), Some(3));
        assert_eq!(FilterSpec::new(City::Chicago, "all", "all").month_number(), None);
        assert_eq!(FilterSpec::new(City::Chicago, "all", "all").day_name(), None);
        assert_eq!(
            FilterSpec::new(City::Chicago, "all", "Friday").day_name(),
            Some("friday")
        );
    }

    #[test]
    fn month_names_cover_the_calendar() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(6), Some("June"));
        assert_eq!(month_name(13), None);
    }
}
