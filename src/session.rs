use std::io::{self, Write};
use std::time::Instant;

use log::{debug, warn};

use crate::config::Config;
use crate::data::filter::filter;
use crate::data::loader;
use crate::data::model::{City, FilterSpec, TripTable, ALL, MONTHS, WEEKDAYS};
use crate::data::pager::Pager;
use crate::error::PromptError;
use crate::input::{ask_required, confirm, AnswerSource};
use crate::report;
use crate::stats::{DurationStats, StationStats, TemporalStats, UserStats};

// ---------------------------------------------------------------------------
// Session state machine
// ---------------------------------------------------------------------------

/// Where the session is in its query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    CollectFilters,
    RunAnalysis(FilterSpec),
    AskRestart,
    End,
}

/// Drives repeated query cycles against one answer source and one output.
pub struct Session<S, W> {
    config: Config,
    input: S,
    out: W,
}

impl<S: AnswerSource, W: Write> Session<S, W> {
    pub fn new(config: Config, input: S, out: W) -> Self {
        Self { config, input, out }
    }

    /// Run cycles until the user declines to restart.
    ///
    /// Returns an error only when a filter prompt is interrupted or input
    /// ends while filters are being collected, or when the terminal fails.
    pub fn run(&mut self) -> Result<(), PromptError> {
        let mut state = State::CollectFilters;
        while state != State::End {
            debug!("session state: {state:?}");
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Perform one transition.
    pub fn step(&mut self, state: State) -> Result<State, PromptError> {
        match state {
            State::CollectFilters => Ok(State::RunAnalysis(self.collect_filters()?)),
            State::RunAnalysis(spec) => {
                self.run_analysis(&spec)?;
                Ok(State::AskRestart)
            }
            State::AskRestart => {
                if confirm(&mut self.input, &mut self.out, "\nWould you like to restart?")? {
                    Ok(State::CollectFilters)
                } else {
                    writeln!(self.out, "Goodbye")?;
                    Ok(State::End)
                }
            }
            State::End => Ok(State::End),
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (S, W) {
        (self.input, self.out)
    }

    fn collect_filters(&mut self) -> Result<FilterSpec, PromptError> {
        writeln!(self.out, "Hello! Let's explore some US bikeshare data!")?;

        let names: Vec<&str> = City::ALL.iter().map(|c| c.name()).collect();
        let months: Vec<&str> = std::iter::once(ALL).chain(MONTHS).collect();
        let days: Vec<&str> = std::iter::once(ALL).chain(WEEKDAYS).collect();

        let name = ask_required(
            &mut self.input,
            &mut self.out,
            "Name of the city to analyze",
            &names,
        )?;
        // `name` is always one of `names`, which follow `City::ALL`.
        let city = City::ALL[names.iter().position(|n| *n == name).unwrap_or_default()];
        let month = ask_required(
            &mut self.input,
            &mut self.out,
            "Name of the month to analyze",
            &months,
        )?;
        let day = ask_required(
            &mut self.input,
            &mut self.out,
            "Day of the week to analyze",
            &days,
        )?;
        report::rule(&mut self.out)?;

        Ok(FilterSpec::new(city, month, day))
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    fn run_analysis(&mut self, spec: &FilterSpec) -> io::Result<()> {
        let Some(table) = self.load(spec)? else {
            return Ok(());
        };
        let capabilities = table.schema.capabilities;
        let out = &mut self.out;

        writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
        let started = Instant::now();
        report::temporal(out, &TemporalStats::compute(&table))?;
        report::elapsed(out, started.elapsed())?;

        writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
        let started = Instant::now();
        report::stations(out, &StationStats::compute(&table))?;
        report::elapsed(out, started.elapsed())?;

        writeln!(out, "\nCalculating Trip Duration...\n")?;
        let started = Instant::now();
        report::durations(out, &DurationStats::compute(&table))?;
        report::elapsed(out, started.elapsed())?;

        writeln!(out, "\nCalculating User Stats...\n")?;
        let started = Instant::now();
        report::users(out, &UserStats::compute(&table, capabilities))?;
        report::elapsed(out, started.elapsed())?;

        self.browse_raw(&table)
    }

    /// Load, key and filter the city's trips. A load failure is reported and
    /// yields `None`.
    fn load(&mut self, spec: &FilterSpec) -> io::Result<Option<TripTable>> {
        let out = &mut self.out;

        writeln!(out, "Loading file of {}", spec.city)?;
        let started = Instant::now();
        let mut table = match loader::load_city(&self.config.data_dir, spec.city) {
            Ok(table) => table,
            Err(err) => {
                warn!("loading {} failed: {err}", spec.city);
                report::failure(out, &err)?;
                return Ok(None);
            }
        };
        report::elapsed(out, started.elapsed())?;

        writeln!(
            out,
            "\nCreating a table of trips by aggregating start and end stations...\n"
        )?;
        let started = Instant::now();
        table.derive_trip_keys();
        report::elapsed(out, started.elapsed())?;

        let filtered = filter(&table, spec);
        writeln!(
            out,
            "\n{} of {} trips match month={} day={}.",
            filtered.len(),
            table.len(),
            spec.month,
            spec.day
        )?;
        Ok(Some(filtered))
    }

    /// Offer raw rows page by page until the user says no. An empty selection
    /// has nothing to page through, so the offer is skipped.
    fn browse_raw(&mut self, table: &TripTable) -> io::Result<()> {
        let mut pager = Pager::new(table, self.config.page_size);
        if !pager.has_more() {
            return report::page(&mut self.out, pager.columns(), &[]);
        }
        let prompt = format!(
            "Do you want to display next {} rows of data",
            pager.page_size()
        );

        while confirm(&mut self.input, &mut self.out, &prompt)? {
            let rows = pager.next_page();
            report::page(&mut self.out, pager.columns(), &rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::input::scripted::ScriptedInput;
    use crate::input::Answer;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-03-06 08:10:00,2017-03-06 08:20:00,600,Canal St,Clark St,Subscriber,Male,1990.0
2,2017-01-10 09:00:00,2017-01-10 09:30:00,1800,Clark St,Canal St,Customer,Female,1985.0
3,2017-03-07 17:15:00,2017-03-07 17:25:00,600,Canal St,Clark St,Subscriber,Female,1990.0
4,2017-06-02 12:00:00,2017-06-02 12:10:00,600,Lake St,Canal St,Subscriber,Male,1970.0
5,2017-03-13 08:40:00,2017-03-13 08:50:00,600,Canal St,Clark St,Subscriber,Male,1990.0
6,2017-01-11 09:00:00,2017-01-11 09:30:00,1800,Clark St,Canal St,Customer,Female,1985.0
7,2017-03-20 08:05:00,2017-03-20 08:15:00,600,Clark St,Lake St,Subscriber,Male,1992.0
";

    const WASHINGTON: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Ohio Dr & West Basin Dr SW,Ohio Dr & West Basin Dr SW,Customer
";

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
        dir
    }

    fn run(dir: &Path, input: ScriptedInput) -> (Result<(), PromptError>, ScriptedInput, String) {
        let config = Config {
            data_dir: dir.to_path_buf(),
            page_size: 5,
        };
        let mut session = Session::new(config, input, Vec::new());
        let result = session.run();
        let (input, out) = session.into_parts();
        (result, input, String::from_utf8(out).unwrap())
    }

    #[test]
    fn chicago_in_march_end_to_end() {
        let dir = data_dir();

        let table = loader::load_city(dir.path(), City::Chicago).unwrap();
        let filtered = filter(&table, &FilterSpec::new(City::Chicago, "march", "all"));
        assert_eq!(filtered.len(), 4);
        assert!(filtered.trips.iter().all(|t| t.derived.month == 3));

        let input = ScriptedInput::lines(&["  Chicago  ", "March", "all", "no", "no"]);
        let (result, input, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("4 of 7 trips match month=march day=all."));
        assert!(text.contains("Most common month of travel is March"));
        assert!(text.contains("Most common day in a week for travel is Monday"));
        assert!(text.contains("Most common hour for travel is 8"));
        assert!(text.contains("Most common trip is from Canal St to Clark St"));
        assert!(text.contains("Total travel time is 0:40:00."));
        assert!(text.ends_with("Goodbye\n"));
    }

    #[test]
    fn rejected_city_is_prompted_again() {
        let dir = data_dir();
        let input = ScriptedInput::lines(&["Chigaco", "chicago", "all", "all", "no", "no"]);
        let (result, _, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert!(text.contains("[chigaco] is not a valid choice, please try again"));
        assert_eq!(text.matches("Name of the city to analyze").count(), 2);
    }

    #[test]
    fn pages_wrap_around_and_restart_runs_a_new_cycle() {
        let dir = data_dir();
        let input = ScriptedInput::lines(&[
            "chicago", "all", "all", "yes", "yes", "yes", "no", "yes",
            "washington", "all", "all", "no", "no",
        ]);
        let (result, input, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert_eq!(input.remaining(), 0);

        // Seven rows, five per page: rows 1-5, rows 6-7, rows 1-5 again.
        let headers = text.lines().filter(|l| l.starts_with("Start Time ")).count();
        assert_eq!(headers, 3);
        assert_eq!(text.matches("2017-03-06 08:10:00").count(), 2);
        assert_eq!(text.matches("2017-01-11 09:00:00").count(), 1);

        // Second cycle reads a file without gender or birth year columns.
        assert_eq!(text.matches("Hello! Let's explore").count(), 2);
        assert!(text.contains("No gender data available"));
        assert!(text.contains("No traveler birth year data available"));
        assert!(text.ends_with("Goodbye\n"));
    }

    #[test]
    fn interrupt_while_collecting_filters_stops_the_session() {
        let dir = data_dir();
        let input = ScriptedInput::new([
            Answer::Line("chicago".into()),
            Answer::Interrupted,
            Answer::Line("all".into()),
        ]);
        let (result, input, text) = run(dir.path(), input);

        assert!(matches!(result, Err(PromptError::Interrupted)));
        assert_eq!(input.remaining(), 1);
        assert!(!text.contains("Loading file"));
        assert!(!text.contains("Goodbye"));
    }

    #[test]
    fn interrupt_while_paging_or_restarting_means_no() {
        let dir = data_dir();
        let input = ScriptedInput::new([
            Answer::Line("chicago".into()),
            Answer::Line("all".into()),
            Answer::Line("friday".into()),
            Answer::Interrupted,
            Answer::Interrupted,
        ]);
        let (result, input, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("1 of 7 trips match month=all day=friday."));
        assert_eq!(text.matches("User interrupted").count(), 2);
        assert!(text.ends_with("Goodbye\n"));
    }

    #[test]
    fn missing_file_is_reported_and_session_continues() {
        let dir = data_dir();
        let input = ScriptedInput::lines(&["new york city", "all", "all", "no"]);
        let (result, _, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert!(text.contains("Loading file of New York City"));
        assert!(text.contains("Could not load data: failed to read"));
        assert!(!text.contains("Calculating"));
        assert!(text.ends_with("Goodbye\n"));
    }

    #[test]
    fn schema_error_is_reported_explicitly() {
        let dir = data_dir();
        fs::write(
            dir.path().join("washington.csv"),
            "Start Time,End Time,Start Station,End Station,User Type\n",
        )
        .unwrap();
        let input = ScriptedInput::lines(&["washington", "all", "all", "no"]);
        let (result, _, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert!(text.contains("Unexpected data layout"));
        assert!(text.contains("missing required column 'Trip Duration'"));
    }

    #[test]
    fn empty_selection_reports_and_skips_the_page_offer() {
        let dir = data_dir();
        let input = ScriptedInput::lines(&["washington", "january", "all", "no"]);
        let (result, input, text) = run(dir.path(), input);

        assert!(result.is_ok());
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("0 of 2 trips match"));
        assert!(text.contains("Most common month of travel is n/a"));
        assert!(text.contains("No trips match the filters."));
        assert!(!text.contains("Do you want to display next"));
        assert!(text.ends_with("Goodbye\n"));
    }
}
