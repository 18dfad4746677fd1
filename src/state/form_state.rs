// src/state/form_state.rs
use crate::config::{AnalysisRequest, ChartKind, CountryTrendQuery, Operation, RegionQuery};
use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryKind {
    Region,
    CountryTrend,
}

impl QueryKind {
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Region => "Region",
            QueryKind::CountryTrend => "Country Trend",
        }
    }
}

/// Raw text of the dashboard query form.
#[derive(Debug, Clone)]
pub struct QueryForm {
    pub kind: QueryKind,
    pub region: String,
    pub country: String,
    // Year for region queries, start year for trends
    pub year: String,
    pub end_year: String,
    pub operation: String,
    pub chart: ChartKind,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            kind: QueryKind::Region,
            region: String::new(),
            country: String::new(),
            year: String::new(),
            end_year: String::new(),
            operation: Operation::Average.to_string(),
            chart: ChartKind::Bar,
        }
    }
}

impl QueryForm {
    pub fn build_request(&self, bounds: (i32, i32)) -> Result<AnalysisRequest, FormError> {
        match self.kind {
            QueryKind::Region => {
                let region = self.region.trim();
                if region.is_empty() {
                    return Err(FormError::MissingRegion);
                }
                let year = parse_year(&self.year, "Year", bounds)?;
                let operation = self.operation.parse::<Operation>()?;

                Ok(AnalysisRequest::Region(RegionQuery {
                    region: region.to_string(),
                    year,
                    operation,
                }))
            }
            QueryKind::CountryTrend => {
                let country = self.country.trim();
                if country.is_empty() {
                    return Err(FormError::MissingCountry);
                }
                let start_year = parse_year(&self.year, "Start Year", bounds)?;
                // End year is optional and defaults to the start year
                let end_year = if self.end_year.trim().is_empty() {
                    start_year
                } else {
                    parse_year(&self.end_year, "End Year", bounds)?
                };

                Ok(AnalysisRequest::CountryTrend(CountryTrendQuery::new(country, start_year, end_year)?))
            }
        }
    }
}

fn parse_year(text: &str, field: &'static str, (min, max): (i32, i32)) -> Result<i32, FormError> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormError::NotANumber { field });
    }

    let year = text.parse::<i32>().map_err(|_| FormError::NotANumber { field })?;
    if year < min || year > max {
        return Err(FormError::OutOfRange { field, min, max });
    }
    Ok(year)
}
