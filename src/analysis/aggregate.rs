// src/analysis/aggregate.rs

use serde::{Serialize, Deserialize};
use statrs::statistics::Statistics;
use crate::config::{AnalysisRequest, CountryTrendQuery, Operation, RecordStore, RegionQuery};
use crate::error::AnalysisError;

/// Parallel label/value lists, in the order they should be plotted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series<L> {
    pub labels: Vec<L>,
    pub values: Vec<f64>,
}

impl<L> Series<L> {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, label: L, value: f64) {
        self.labels.push(label);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> + '_ {
        self.labels.iter().zip(self.values.iter().copied())
    }
}

impl<L> Default for Series<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionResult {
    pub title: String,
    pub region: String,
    pub year: i32,
    pub operation: Operation,
    pub value: f64,
    pub series: Series<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendResult {
    pub title: String,
    pub country: String,
    pub start_year: i32,
    pub end_year: i32,
    pub series: Series<i32>,
    pub average: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnalysisResult {
    Region(RegionResult),
    Trend(TrendResult),
}

impl AnalysisResult {
    pub fn title(&self) -> &str {
        match self {
            AnalysisResult::Region(r) => &r.title,
            AnalysisResult::Trend(t) => &t.title,
        }
    }

    /// True when no value contributed to the result.
    pub fn is_empty(&self) -> bool {
        match self {
            AnalysisResult::Region(r) => r.series.is_empty(),
            AnalysisResult::Trend(t) => t.series.is_empty(),
        }
    }
}

/// Reduce a list of values. Every operation yields 0.0 for an empty list.
pub fn reduce(values: &[f64], operation: Operation) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    match operation {
        Operation::Average => Statistics::mean(values.iter()),
        Operation::Sum => values.iter().sum(),
        Operation::Max => Statistics::max(values.iter()),
        Operation::Min => Statistics::min(values.iter()),
    }
}

pub fn evaluate_region(store: &RecordStore, query: &RegionQuery) -> RegionResult {
    let mut series = Series::new();
    for record in store.in_region(&query.region) {
        if let Some(value) = record.gdp(query.year) {
            series.push(record.country.clone(), value);
        }
    }

    let value = reduce(&series.values, query.operation);
    log::debug!(
        "Region query {}/{}/{}: {} values -> {}",
        query.region, query.year, query.operation, series.len(), value
    );

    RegionResult {
        title: format!("{} GDP of {} in {}", query.operation.title(), query.region, query.year),
        region: query.region.clone(),
        year: query.year,
        operation: query.operation,
        value,
        series,
    }
}

/// `None` when no record matches the country name.
pub fn evaluate_trend(store: &RecordStore, query: &CountryTrendQuery) -> Option<TrendResult> {
    let record = store.find_country(&query.country)?;

    let mut series = Series::new();
    for year in query.start_year..=query.end_year {
        if let Some(value) = record.gdp(year) {
            series.push(year, value);
        }
    }

    let average = reduce(&series.values, Operation::Average);
    let total = reduce(&series.values, Operation::Sum);
    log::debug!(
        "Trend query {} {}-{}: {} years",
        record.country, query.start_year, query.end_year, series.len()
    );

    Some(TrendResult {
        title: format!("GDP Trend of {} ({}-{})", record.country, query.start_year, query.end_year),
        country: record.country.clone(),
        start_year: query.start_year,
        end_year: query.end_year,
        series,
        average,
        total,
    })
}

pub fn evaluate(store: &RecordStore, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
    match request {
        AnalysisRequest::Region(query) => Ok(AnalysisResult::Region(evaluate_region(store, query))),
        AnalysisRequest::CountryTrend(query) => evaluate_trend(store, query)
            .map(AnalysisResult::Trend)
            .ok_or_else(|| AnalysisError::CountryNotFound(query.country.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GdpRecord;

    fn record(country: &str, region: &str, gdp: &[(i32, f64)]) -> GdpRecord {
        let mut r = GdpRecord::new(country.into(), "N/A".into(), region.into());
        r.gdp_by_year.extend(gdp.iter().copied());
        r
    }

    fn store() -> RecordStore {
        RecordStore::new(
            vec![
                record("Japan", "Asia", &[(1962, 60.0), (1963, 70.0)]),
                record("France", "Europe", &[(1962, 75.0)]),
                record("Nepal", "Asia", &[(1963, 1.0)]),
                record("Pakistan", "Asia", &[(1962, 4.5), (2018, 10.0), (2020, 30.0), (2021, 35.0)]),
                record("India", "Asia", &[(1962, 42.0)]),
            ],
            vec![1962, 1963, 2018, 2019, 2020, 2021],
        )
    }

    fn region(region: &str, year: i32, operation: Operation) -> RegionQuery {
        RegionQuery {
            region: region.into(),
            year,
            operation,
        }
    }

    #[test]
    fn test_reduce_operations() {
        let values = [10.0, 20.0, 30.0];
        assert!((reduce(&values, Operation::Average) - 20.0).abs() < 1e-9);
        assert_eq!(reduce(&values, Operation::Sum), 60.0);
        assert_eq!(reduce(&values, Operation::Max), 30.0);
        assert_eq!(reduce(&values, Operation::Min), 10.0);
    }

    #[test]
    fn test_reduce_empty_is_zero() {
        for op in Operation::ALL {
            assert_eq!(reduce(&[], op), 0.0);
        }
    }

    #[test]
    fn test_region_values_in_store_order() {
        let result = evaluate_region(&store(), &region("Asia", 1962, Operation::Sum));
        assert_eq!(result.series.labels, vec!["Japan", "Pakistan", "India"]);
        assert_eq!(result.series.values, vec![60.0, 4.5, 42.0]);
        assert_eq!(result.value, 106.5);
        assert_eq!(result.title, "Sum GDP of Asia in 1962");
    }

    #[test]
    fn test_region_excludes_missing_years() {
        let result = evaluate_region(&store(), &region("Asia", 1963, Operation::Min));
        assert_eq!(result.series.labels, vec!["Japan", "Nepal"]);
        assert_eq!(result.value, 1.0);
    }

    #[test]
    fn test_region_match_is_case_sensitive() {
        let result = evaluate_region(&store(), &region("asia", 1962, Operation::Sum));
        assert!(result.series.is_empty());
    }

    #[test]
    fn test_empty_region_is_zero_not_error() {
        let result = evaluate(&store(), &AnalysisRequest::Region(region("Oceania", 1962, Operation::Max))).unwrap();
        assert!(result.is_empty());
        match result {
            AnalysisResult::Region(r) => {
                assert_eq!(r.value, 0.0);
                assert!(r.series.labels.is_empty());
                assert!(r.series.values.is_empty());
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_trend_skips_missing_years_in_order() {
        let query = CountryTrendQuery::new("Pakistan", 2018, 2021).unwrap();
        let result = evaluate_trend(&store(), &query).unwrap();
        assert_eq!(result.series.labels, vec![2018, 2020, 2021]);
        assert_eq!(result.series.values, vec![10.0, 30.0, 35.0]);
        assert_eq!(result.total, 75.0);
        assert!((result.average - 25.0).abs() < 1e-9);
        assert_eq!(result.title, "GDP Trend of Pakistan (2018-2021)");
    }

    #[test]
    fn test_trend_single_year_and_no_data() {
        let query = CountryTrendQuery::new("Pakistan", 2020, 2020).unwrap();
        let result = evaluate_trend(&store(), &query).unwrap();
        assert_eq!(result.series.labels, vec![2020]);

        let query = CountryTrendQuery::new("Pakistan", 1990, 1995).unwrap();
        let result = evaluate_trend(&store(), &query).unwrap();
        assert!(result.series.is_empty());
        assert_eq!(result.average, 0.0);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_trend_country_match_is_case_insensitive() {
        let query = CountryTrendQuery::new("pakistan", 2018, 2018).unwrap();
        let result = evaluate_trend(&store(), &query).unwrap();
        assert_eq!(result.country, "Pakistan");
        assert_eq!(result.series.values, vec![10.0]);
    }

    #[test]
    fn test_unknown_country_is_not_found() {
        let query = CountryTrendQuery::new("Atlantis", 2018, 2021).unwrap();
        assert!(evaluate_trend(&store(), &query).is_none());
        assert_eq!(
            evaluate(&store(), &AnalysisRequest::CountryTrend(query)),
            Err(AnalysisError::CountryNotFound("Atlantis".to_string()))
        );
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let store = store();
        let requests = [
            AnalysisRequest::Region(region("Asia", 1962, Operation::Average)),
            AnalysisRequest::CountryTrend(CountryTrendQuery::new("Japan", 1960, 1970).unwrap()),
        ];
        for request in &requests {
            let first = evaluate(&store, request).unwrap();
            let second = evaluate(&store, request).unwrap();
            assert_eq!(first, second);
        }
    }
}
