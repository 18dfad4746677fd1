// src/file/batch.rs
use super::FileHandler;
use crate::config::{AnalysisRequest, ChartKind, CountryTrendQuery, Operation, RegionQuery};
use crate::error::ValidationError;
use anyhow::{Result, Context};
use ron::extensions::Extensions;
use serde::{Serialize, Deserialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A batch document as written by the user, before validation.
///
/// ```ron
/// (
///     dataset: "gdp_with_continent_filled.csv",
///     analyses: [
///         (type: "region", region: "Asia", year: 2020, operation: "sum", graph: "pie"),
///         (type: "country_trend", country: "Pakistan", start_year: 2010, end_year: 2020),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchFile {
    pub dataset: Option<PathBuf>,
    pub analyses: Vec<BatchEntry>,
}

// Every field is optional here so that missing ones can be reported by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub region: Option<String>,
    pub year: Option<i32>,
    pub operation: Option<String>,
    pub country: Option<String>,
    #[serde(alias = "startYear")]
    pub start_year: Option<i32>,
    #[serde(alias = "endYear")]
    pub end_year: Option<i32>,
    pub graph: Option<String>,
}

/// A validated request together with the chart it should be drawn as.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub request: AnalysisRequest,
    pub chart: ChartKind,
}

impl BatchFile {
    /// Validate every entry; the first problem rejects the whole document.
    pub fn validate(&self) -> Result<Vec<BatchItem>, ValidationError> {
        if self.analyses.is_empty() {
            return Err(ValidationError::Empty);
        }

        self.analyses.iter()
            .enumerate()
            .map(|(i, entry)| entry.validate(i + 1))
            .collect()
    }
}

impl BatchEntry {
    fn validate(&self, index: usize) -> Result<BatchItem, ValidationError> {
        let kind = required_text(&self.kind, index, "type")?;

        let request = match kind.to_lowercase().as_str() {
            "region" => {
                let region = required_text(&self.region, index, "region")?;
                let year = required_year(self.year, index, "year")?;
                let operation = required_text(&self.operation, index, "operation")?
                    .parse::<Operation>()
                    .map_err(|e| ValidationError::InvalidField {
                        index,
                        field: "operation",
                        reason: e.to_string(),
                    })?;

                AnalysisRequest::Region(RegionQuery {
                    region: region.to_string(),
                    year,
                    operation,
                })
            }
            "country_trend" => {
                let country = required_text(&self.country, index, "country")?;
                let start_year = required_year(self.start_year, index, "start_year")?;
                let end_year = required_year(self.end_year, index, "end_year")?;
                let query = CountryTrendQuery::new(country, start_year, end_year)
                    .map_err(|e| ValidationError::InvalidField {
                        index,
                        field: "end_year",
                        reason: e.to_string(),
                    })?;

                AnalysisRequest::CountryTrend(query)
            }
            _ => {
                return Err(ValidationError::UnknownType {
                    index,
                    kind: kind.to_string(),
                })
            }
        };

        let chart = match self.graph.as_deref() {
            Some(graph) => graph.parse::<ChartKind>()
                .map_err(|e| ValidationError::InvalidField {
                    index,
                    field: "graph",
                    reason: e.to_string(),
                })?,
            None => request.default_chart(),
        };

        Ok(BatchItem { request, chart })
    }
}

fn required_text<'a>(value: &'a Option<String>, index: usize, field: &'static str) -> Result<&'a str, ValidationError> {
    value.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField { index, field })
}

fn required_year(value: Option<i32>, index: usize, field: &'static str) -> Result<i32, ValidationError> {
    let year = value.ok_or(ValidationError::MissingField { index, field })?;
    if !(1000..=9999).contains(&year) {
        return Err(ValidationError::InvalidField {
            index,
            field,
            reason: format!("{} is not a four-digit year", year),
        });
    }
    Ok(year)
}

/// Parse a batch document. Optional fields may be written without `Some(..)`.
pub fn parse_batch(content: &str) -> Result<BatchFile, ValidationError> {
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(content)
        .map_err(|e| ValidationError::Malformed(e.to_string()))
}

#[derive(Debug)]
pub struct BatchFileHandler;

impl BatchFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<BatchFile> for BatchFileHandler {
    type Error = anyhow::Error;

    fn load(&self, path: &Path) -> Result<BatchFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;

        parse_batch(&content)
            .with_context(|| format!("Failed to parse batch file: {}", path.display()))
    }
}
