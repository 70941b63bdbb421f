use crate::data::model::{month_name, TripTable};

use super::mode;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalStats {
    /// 1-based month number.
    pub month: Option<u32>,
    pub day: Option<&'static str>,
    pub hour: Option<u32>,
}

impl TemporalStats {
    pub fn compute(table: &TripTable) -> Self {
        let derived = || table.trips.iter().map(|t| &t.derived);
        TemporalStats {
            month: mode(derived().map(|d| d.month)),
            day: mode(derived().map(|d| d.day_name)),
            hour: mode(derived().map(|d| d.hour)),
        }
    }

    /// English name of the most common month.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.and_then(month_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_trips;

    #[test]
    fn reports_mode_of_each_time_field() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-06 08:10:00,2017-03-06 08:20:00,600,A,B,Subscriber
2017-03-07 08:15:00,2017-03-07 08:20:00,300,A,B,Subscriber
2017-03-13 17:00:00,2017-03-13 17:20:00,1200,A,B,Subscriber
2017-01-03 17:00:00,2017-01-03 17:20:00,1200,A,B,Subscriber
";
        let table = read_trips(csv.as_bytes(), "t.csv").unwrap();
        let stats = TemporalStats::compute(&table);
        assert_eq!(stats.month, Some(3));
        assert_eq!(stats.month_name(), Some("March"));
        // Tuesday and Monday both occur twice; Monday appears first.
        assert_eq!(stats.day, Some("Monday"));
        // 8 and 17 tie; 8 appears first.
        assert_eq!(stats.hour, Some(8));
    }

    #[test]
    fn empty_table_has_no_modes() {
        let stats = TemporalStats::compute(&TripTable::default());
        assert_eq!(stats, TemporalStats { month: None, day: None, hour: None });
        assert_eq!(stats.month_name(), None);
    }
}
