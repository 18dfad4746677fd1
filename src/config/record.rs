// src/config/record.rs
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_CODE: &str = "N/A";
pub const UNKNOWN_REGION: &str = "Unknown";

/// One country row of the source table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GdpRecord {
    pub country: String,
    pub code: String,
    pub region: String,
    // Only years with a non-blank cell are present
    pub gdp_by_year: BTreeMap<i32, f64>,
}

impl GdpRecord {
    pub fn new(country: String, code: String, region: String) -> Self {
        Self {
            country,
            code,
            region,
            gdp_by_year: BTreeMap::new(),
        }
    }

    pub fn gdp(&self, year: i32) -> Option<f64> {
        self.gdp_by_year.get(&year).copied()
    }

    pub fn matches_country(&self, name: &str) -> bool {
        self.country.trim().to_lowercase() == name.trim().to_lowercase()
    }
}
