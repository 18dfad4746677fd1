// src/config/request.rs
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operation {
    Average,
    Sum,
    Max,
    Min,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Average,
        Operation::Sum,
        Operation::Max,
        Operation::Min,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Average => "average",
            Operation::Sum => "sum",
            Operation::Max => "max",
            Operation::Min => "min",
        }
    }

    // Used in result titles, e.g. "Average GDP of Asia in 2020"
    pub fn title(&self) -> &'static str {
        match self {
            Operation::Average => "Average",
            Operation::Sum => "Sum",
            Operation::Max => "Max",
            Operation::Min => "Min",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "average" => Ok(Operation::Average),
            "sum" => Ok(Operation::Sum),
            "max" => Ok(Operation::Max),
            "min" => Ok(Operation::Min),
            _ => Err(AnalysisError::InvalidOperation(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Line];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "line" => Ok(ChartKind::Line),
            _ => Err(AnalysisError::InvalidChart(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionQuery {
    pub region: String,
    pub year: i32,
    pub operation: Operation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryTrendQuery {
    pub country: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl CountryTrendQuery {
    pub fn new(country: impl Into<String>, start_year: i32, end_year: i32) -> Result<Self, AnalysisError> {
        if start_year > end_year {
            return Err(AnalysisError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }
        Ok(Self {
            country: country.into(),
            start_year,
            end_year,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnalysisRequest {
    Region(RegionQuery),
    CountryTrend(CountryTrendQuery),
}

impl AnalysisRequest {
    /// Chart used when the caller does not ask for one.
    pub fn default_chart(&self) -> ChartKind {
        match self {
            AnalysisRequest::Region(_) => ChartKind::Bar,
            AnalysisRequest::CountryTrend(_) => ChartKind::Line,
        }
    }
}
