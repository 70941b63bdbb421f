use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Deserialize;

use super::model::{Capabilities, City, Derived, Schema, Trip, TripTable};
use crate::error::{BikeshareError, Result};

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Header pandas writes for an unnamed index column.
const PANDAS_INDEX_HEADER: &str = "Unnamed: 0";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the trip file of `city` from `data_dir`.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripTable> {
    load_file(&data_dir.join(city.file_name()))
}

/// Load a trip file.
///
/// CSV layout: header row with column names, at least the
/// [`REQUIRED_COLUMNS`], optionally `Gender` and `Birth Year`, optionally an
/// unlabeled leading index column (dropped). Rows with an empty cell in any
/// retained column are skipped. Trip keys are not derived here; see
/// [`TripTable::derive_trip_keys`].
pub fn load_file(path: &Path) -> Result<TripTable> {
    let file = File::open(path).map_err(|e| BikeshareError::io(path, e))?;
    let table = read_trips(file, &path.display().to_string())?;
    info!("loaded {} trips from {}", table.len(), path.display());
    Ok(table)
}

/// Parse trips from any CSV source. `source` names it in error messages.
///
/// Rows shorter than the header are treated like rows with empty cells.
pub fn read_trips<R: Read>(input: R, source: &str) -> Result<TripTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();

    let retained = retained_columns(&headers);
    let columns: Vec<String> = retained.iter().map(|&i| headers[i].to_string()).collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(BikeshareError::MissingColumn {
                path: source.to_string(),
                column: required,
            });
        }
    }

    let schema = Schema {
        capabilities: Capabilities {
            has_gender: columns.iter().any(|c| c == GENDER),
            has_birth_year: columns.iter().any(|c| c == BIRTH_YEAR),
        },
        columns,
    };

    let mut trips = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let has_gap = retained
            .iter()
            .any(|&i| record.get(i).map_or(true, |v| v.trim().is_empty()));
        if has_gap {
            dropped += 1;
            continue;
        }

        let raw: Vec<String> = retained.iter().map(|&i| record[i].to_string()).collect();
        let row: TripRow = record.deserialize(Some(&headers))?;
        trips.push(row.into_trip(row_no + 1, raw)?);
    }

    debug!("{source}: kept {} rows, dropped {dropped} with missing values", trips.len());
    Ok(TripTable::new(schema, trips))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// One CSV record, cells still as text.
#[derive(Debug, Deserialize)]
struct TripRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

impl TripRow {
    fn into_trip(self, row: usize, raw: Vec<String>) -> Result<Trip> {
        let start_time = parse_timestamp(&self.start_time, row, START_TIME)?;
        let end_time = parse_timestamp(&self.end_time, row, END_TIME)?;
        let duration_secs = parse_duration(&self.trip_duration, row)?;
        let birth_year = self
            .birth_year
            .as_deref()
            .map(|s| parse_year(s, row))
            .transpose()?;

        Ok(Trip {
            start_time,
            end_time,
            duration_secs,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: self.user_type,
            gender: self.gender,
            birth_year,
            derived: Derived::from_start(start_time),
            raw,
        })
    }
}

/// Indices of the columns kept from the header: everything except an
/// unlabeled leading index column.
fn retained_columns(headers: &csv::StringRecord) -> Vec<usize> {
    let skip_first = headers
        .get(0)
        .is_some_and(|h| h.trim().is_empty() || h == PANDAS_INDEX_HEADER);
    (0..headers.len())
        .filter(|&i| !(skip_first && i == 0))
        .collect()
}

fn invalid(row: usize, column: &'static str, value: &str) -> BikeshareError {
    BikeshareError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

fn parse_timestamp(s: &str, row: usize, column: &'static str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| invalid(row, column, s))
}

fn parse_duration(s: &str, row: usize) -> Result<f64> {
    match s.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(invalid(row, TRIP_DURATION, s)),
    }
}

/// Birth years are often published as floats (`1989.0`).
fn parse_year(s: &str, row: usize) -> Result<i32> {
    match s.trim().parse::<f64>() {
        Ok(year) if year.is_finite() && year.fract() == 0.0 && year.abs() < 1e6 => {
            Ok(year as i32)
        }
        _ => Err(invalid(row, BIRTH_YEAR, s)),
    }
}
