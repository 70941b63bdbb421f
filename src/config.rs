use std::path::PathBuf;

use log::warn;

use crate::data::pager::DEFAULT_PAGE_SIZE;

/// Directory holding the city CSV files.
pub const DATA_DIR_VAR: &str = "BIKESHARE_DATA_DIR";
/// Rows per page of raw data.
pub const PAGE_SIZE_VAR: &str = "BIKESHARE_PAGE_SIZE";

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(DATA_DIR_VAR).ok(),
            std::env::var(PAGE_SIZE_VAR).ok(),
        )
    }

    fn from_vars(data_dir: Option<String>, page_size: Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = page_size {
            match raw.trim().parse::<i64>() {
                Ok(n) if n > 0 => config.page_size = n as usize,
                _ => warn!(
                    "ignoring {PAGE_SIZE_VAR}={raw:?}, using {DEFAULT_PAGE_SIZE} rows per page"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_vars(None, None), Config::default());
        assert_eq!(Config::default().page_size, 5);
    }

    #[test]
    fn reads_directory_and_page_size() {
        let config = Config::from_vars(Some("/srv/bikeshare".into()), Some(" 12 ".into()));
        assert_eq!(config.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn non_positive_page_size_falls_back() {
        for raw in ["0", "-3", "many"] {
            let config = Config::from_vars(None, Some(raw.into()));
            assert_eq!(config.page_size, DEFAULT_PAGE_SIZE, "{raw}");
        }
    }
}
