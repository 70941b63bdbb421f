use std::fmt;

use crate::data::model::TripTable;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// A whole number of seconds split into days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Span {
    pub fn from_secs(total: u64) -> Self {
        Span {
            days: total / SECS_PER_DAY,
            hours: total % SECS_PER_DAY / SECS_PER_HOUR,
            minutes: total % SECS_PER_HOUR / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Truncates toward zero; negative input saturates to zero.
    pub fn from_secs_f64(total: f64) -> Self {
        Span::from_secs(total as u64)
    }

    #[cfg(test)]
    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

/// `3 days, 4:05:06`, or `0:05:06` below one day.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            n => write!(f, "{n} days, ")?,
        }
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Total and typical trip durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStats {
    pub total: Span,
    pub mean: Option<Span>,
    pub longest: Option<Span>,
    pub shortest: Option<Span>,
}

impl DurationStats {
    pub fn compute(table: &TripTable) -> Self {
        let durations = || table.trips.iter().map(|t| t.duration_secs);
        let total: f64 = durations().sum();
        let mean = (!table.is_empty()).then(|| total / table.len() as f64);

        DurationStats {
            total: Span::from_secs_f64(total),
            mean: mean.map(Span::from_secs_f64),
            longest: durations().reduce(f64::max).map(Span::from_secs_f64),
            shortest: durations().reduce(f64::min).map(Span::from_secs_f64),
        }
    }
}
