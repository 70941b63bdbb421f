use crate::data::model::{Capabilities, TripTable};

use super::{mode, value_counts};

/// A statistic over an optional column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<T> {
    Available(T),
    /// The loaded file has no such column.
    Unavailable,
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<i32>,
}

/// Who rides: user types, genders and birth years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// User type → trip count, most frequent first.
    pub user_types: Vec<(String, usize)>,
    pub genders: Availability<Vec<(String, usize)>>,
    pub birth_years: Availability<BirthYearStats>,
}

impl UserStats {
    /// `capabilities` comes from the schema of the loaded file; optional
    /// columns it does not list are reported as unavailable.
    pub fn compute(table: &TripTable, capabilities: Capabilities) -> Self {
        let trips = &table.trips;

        let user_types = owned(value_counts(trips.iter().map(|t| t.user_type.as_str())));

        let genders = if capabilities.has_gender {
            Availability::Available(owned(value_counts(
                trips.iter().filter_map(|t| t.gender.as_deref()),
            )))
        } else {
            Availability::Unavailable
        };

        let birth_years = if capabilities.has_birth_year {
            let years = || trips.iter().filter_map(|t| t.birth_year);
            Availability::Available(BirthYearStats {
                earliest: years().min(),
                latest: years().max(),
                most_common: mode(years()),
            })
        } else {
            Availability::Unavailable
        };

        UserStats {
            user_types,
            genders,
            birth_years,
        }
    }
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}
