use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TRIPS_PER_CITY: usize = 2_000;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Index into `weights`, chosen proportionally to its entries.
    fn weighted(&mut self, weights: &[u64]) -> usize {
        let mut pick = self.below(weights.iter().sum());
        for (i, &w) in weights.iter().enumerate() {
            if pick < w {
                return i;
            }
            pick -= w;
        }
        weights.len() - 1
    }
}

struct CitySpec {
    file_name: &'static str,
    stations: &'static [&'static str],
    with_index: bool,
    with_demographics: bool,
    fractional_durations: bool,
}

const CITIES: [CitySpec; 3] = [
    CitySpec {
        file_name: "chicago.csv",
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Theater on the Lake",
        ],
        with_index: true,
        with_demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        file_name: "new_york_city.csv",
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
        ],
        with_index: true,
        with_demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        file_name: "washington.csv",
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
        ],
        with_index: false,
        with_demographics: false,
        fractional_durations: true,
    },
];

// Busier in late spring and at commute hours.
const MONTH_WEIGHTS: [u64; 6] = [6, 7, 10, 13, 16, 18];
const HOUR_WEIGHTS: [u64; 24] = [
    1, 1, 1, 1, 1, 2, 5, 9, 14, 8, 6, 6, 7, 7, 6, 7, 10, 16, 12, 8, 5, 4, 3, 2,
];

fn random_start(rng: &mut SimpleRng) -> Result<NaiveDateTime> {
    let month = rng.weighted(&MONTH_WEIGHTS) as u32 + 1;
    let day = rng.below(28) as u32 + 1;
    let hour = rng.weighted(&HOUR_WEIGHTS) as u32;
    NaiveDate::from_ymd_opt(2017, month, day)
        .and_then(|d| d.and_hms_opt(hour, rng.below(60) as u32, rng.below(60) as u32))
        .context("generated an impossible date")
}

fn write_city(dir: &Path, city: &CitySpec, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(city.file_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = Vec::new();
    if city.with_index {
        header.push("");
    }
    header.extend([
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ]);
    if city.with_demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    for row_id in 0..TRIPS_PER_CITY {
        let start = random_start(rng)?;
        let millis = 120_000 + rng.below(2_400_000) as i64;
        let end = start + Duration::milliseconds(millis);
        let duration = if city.fractional_durations {
            format!("{:.3}", millis as f64 / 1000.0)
        } else {
            (millis / 1000).to_string()
        };

        let from = city.stations[rng.weighted(&[8, 5, 3, 2, 1])];
        let to = city.stations[rng.below(city.stations.len() as u64) as usize];
        let user_type = if rng.below(4) == 0 { "Customer" } else { "Subscriber" };

        let mut record = Vec::new();
        if city.with_index {
            record.push(row_id.to_string());
        }
        record.extend([
            start.format(TIMESTAMP_FORMAT).to_string(),
            end.format(TIMESTAMP_FORMAT).to_string(),
            duration,
            from.to_string(),
            to.to_string(),
            user_type.to_string(),
        ]);
        if city.with_demographics {
            // Customers often leave demographics blank; those rows get dropped on load.
            let blank = user_type == "Customer" && rng.below(3) == 0;
            let gender = match (blank, rng.below(3)) {
                (true, _) => "",
                (false, 0) => "Female",
                (false, _) => "Male",
            };
            let year = if blank {
                String::new()
            } else {
                format!("{}.0", 1950 + rng.below(50))
            };
            record.extend([gender.to_string(), year]);
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    println!("Wrote {TRIPS_PER_CITY} trips to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    for city in &CITIES {
        write_city(&dir, city, &mut rng)?;
    }
    Ok(())
}
