// src/config/settings.rs
use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use anyhow::{Result, Context};
use config::{Config, Environment, File};

pub const DEFAULT_DATASET: &str = "gdp_with_continent_filled.csv";
const ENV_PREFIX: &str = "GDP_ATLAS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub dataset: PathBuf,
    pub columns: ColumnNames,
    pub chart: ChartSettings,
    pub years: YearBounds,
}

/// Header names of the metadata columns in the source table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub country: String,
    pub code: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub label_max_len: usize,
    pub pie_threshold: f64,
}

// Overrides for the year range accepted by the query form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct YearBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            columns: ColumnNames::default(),
            chart: ChartSettings::default(),
            years: YearBounds::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            country: "Country Name".to_string(),
            code: "Country Code".to_string(),
            region: "Continent".to_string(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            label_max_len: 15,
            pie_threshold: 0.01,
        }
    }
}

// Nested keys use a double underscore, e.g. GDP_ATLAS_COLUMNS__REGION
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Layered load: user config dir, then `gdp_atlas.*` in the working
    /// directory, then `GDP_ATLAS_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(dir) = dirs::config_dir() {
            let user_settings = dir.join("gdp-atlas").join("settings");
            builder = builder.add_source(
                File::with_name(&user_settings.to_string_lossy()).required(false)
            );
        }

        builder = builder
            .add_source(File::with_name("gdp_atlas").required(false))
            .add_source(environment);

        let settings: Settings = builder.build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        log::debug!("Settings: {:?}", settings);
        Ok(settings)
    }

    pub fn with_dataset(mut self, dataset: Option<PathBuf>) -> Self {
        if let Some(path) = dataset {
            self.dataset = path;
        }
        self
    }
}
