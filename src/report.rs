//! Plain-text rendering of each analysis stage.

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;

use crate::error::BikeshareError;
use crate::stats::{Availability, DurationStats, StationStats, TemporalStats, UserStats};

const RULE_WIDTH: usize = 40;
const NO_TRIPS: &str = "n/a (no trips match the filters)";

pub fn rule<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Closing line of a timed stage.
pub fn elapsed<W: Write + ?Sized>(out: &mut W, took: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {:.3} seconds.", took.as_secs_f64())?;
    rule(out)
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NO_TRIPS.to_string(), |v| v.to_string())
}

fn counts<W: Write + ?Sized>(out: &mut W, rows: &[(String, usize)]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "{NO_TRIPS}");
    }
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in rows {
        writeln!(out, "{label:<width$}  {count}")?;
    }
    Ok(())
}

pub fn temporal<W: Write + ?Sized>(out: &mut W, stats: &TemporalStats) -> io::Result<()> {
    writeln!(out, "Most common month of travel is {}", or_none(stats.month_name()))?;
    writeln!(out, "Most common day in a week for travel is {}", or_none(stats.day))?;
    writeln!(out, "Most common hour for travel is {}", or_none(stats.hour))
}

pub fn stations<W: Write + ?Sized>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "Most commonly used start station is {}",
        or_none(stats.start_station.as_deref())
    )?;
    writeln!(
        out,
        "Most commonly used end station is {}",
        or_none(stats.end_station.as_deref())
    )?;
    match &stats.trip {
        Some((start, end)) => writeln!(out, "Most common trip is from {start} to {end}"),
        None => writeln!(out, "Most common trip is {NO_TRIPS}"),
    }
}

pub fn durations<W: Write + ?Sized>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "Total travel time is {}.", stats.total)?;
    writeln!(out, "Average travel time is {}.", or_none(stats.mean))?;
    writeln!(out, "Longest travel time is {}.", or_none(stats.longest))?;
    writeln!(out, "Shortest travel time is {}.", or_none(stats.shortest))
}

pub fn users<W: Write + ?Sized>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "Counts of user types:")?;
    counts(out, &stats.user_types)?;

    match &stats.genders {
        Availability::Available(genders) => {
            writeln!(out, "\nCounts of traveler gender:")?;
            counts(out, genders)?;
        }
        Availability::Unavailable => writeln!(out, "\nNo gender data available")?,
    }

    match &stats.birth_years {
        Availability::Available(years) => {
            writeln!(out)?;
            writeln!(out, "Earliest traveler year of birth is {}.", or_none(years.earliest))?;
            writeln!(out, "Most recent traveler year of birth is {}.", or_none(years.latest))?;
            writeln!(out, "Most common traveler year of birth is {}.", or_none(years.most_common))?;
        }
        Availability::Unavailable => writeln!(out, "\nNo traveler birth year data available")?,
    }
    Ok(())
}

/// One page of raw rows under their column headers, columns padded to the
/// widest cell on the page.
pub fn page<W: Write + ?Sized>(out: &mut W, columns: &[String], rows: &[&[String]]) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "No trips match the filters.")?;
        return rule(out);
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    writeln!(out, "{}", padded_line(columns.iter(), &widths))?;
    for row in rows {
        writeln!(out, "{}", padded_line(row.iter(), &widths))?;
    }
    rule(out)
}

fn padded_line<'c>(cells: impl Iterator<Item = &'c String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// A cycle that could not load its data.
pub fn failure<W: Write + ?Sized>(out: &mut W, err: &BikeshareError) -> io::Result<()> {
    let kind = if err.is_schema() {
        "Unexpected data layout"
    } else {
        "Could not load data"
    };
    writeln!(out, "\n{kind}: {err}")?;
    rule(out)
}
