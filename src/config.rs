use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::CsvDirectory;
use crate::data::model::{ACADEMIC_YEARS, CLASSES, LATEST_YEAR};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "HEI_DASHBOARD_CONFIG";
/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "HEI_DATA_DIR";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "hei-dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Directory holding the two CSV files.
    pub data_dir: PathBuf,
    pub institutions_file: String,
    pub entries_file: String,
    /// Class preselected on the ranking page.
    pub default_class: String,
    /// Academic year preselected on the ranking page.
    pub default_year: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            institutions_file: "hei_data.csv".to_string(),
            entries_file: "entry_data.csv".to_string(),
            default_class: CLASSES[0].to_string(),
            default_year: LATEST_YEAR.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the JSON config file, then `HEI_DATA_DIR`.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()));
        Self::load_from(path.as_deref(), std::env::var_os(DATA_DIR_ENV))
    }

    /// Resolve a config from an optional file and an optional `data_dir`
    /// override, the override winning over the file.
    pub fn load_from(config_path: Option<&Path>, data_dir: Option<OsString>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config.validated())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid dashboard config")?;
        Ok(config)
    }

    /// Replace unknown preselections with the built-in defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !CLASSES.contains(&self.default_class.as_str()) {
            log::warn!("Unknown default class '{}', using '{}'", self.default_class, defaults.default_class);
            self.default_class = defaults.default_class;
        }
        if !ACADEMIC_YEARS.contains(&self.default_year.as_str()) {
            log::warn!("Unknown default year '{}', using '{}'", self.default_year, defaults.default_year);
            self.default_year = defaults.default_year;
        }
        self
    }

    pub fn source(&self) -> CsvDirectory {
        CsvDirectory {
            dir: self.data_dir.clone(),
            institutions_file: self.institutions_file.clone(),
            entries_file: self.entries_file.clone(),
        }
    }
}
