// src/analysis/chart.rs

use chrono::{DateTime, Local};
use crate::config::ChartKind;
use super::aggregate::AnalysisResult;

/// A result handed to the presentation layer, with the chart it was asked for.
#[derive(Debug, Clone)]
pub struct Chart {
    pub kind: ChartKind,
    pub result: AnalysisResult,
    pub created: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub full_label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
}

impl Chart {
    pub fn new(result: AnalysisResult, kind: ChartKind) -> Self {
        Self {
            kind,
            result,
            created: Local::now(),
        }
    }

    pub fn title(&self) -> &str {
        self.result.title()
    }

    /// Plot points with long country names shortened. Years are left alone.
    pub fn points(&self, label_max_len: usize) -> Vec<ChartPoint> {
        match &self.result {
            AnalysisResult::Region(r) => r.series.iter()
                .map(|(name, value)| ChartPoint {
                    label: shorten_label(name, label_max_len),
                    full_label: name.clone(),
                    value,
                })
                .collect(),
            AnalysisResult::Trend(t) => t.series.iter()
                .map(|(year, value)| ChartPoint {
                    label: year.to_string(),
                    full_label: year.to_string(),
                    value,
                })
                .collect(),
        }
    }
}

pub fn shorten_label(label: &str, max_len: usize) -> String {
    if label.chars().count() > max_len {
        let head: String = label.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Merge every point below `threshold` of the total into a single "Others" slice.
pub fn pie_slices(points: &[ChartPoint], threshold: f64) -> Vec<PieSlice> {
    let total: f64 = points.iter().map(|p| p.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let cutoff = threshold * total;
    let mut slices: Vec<PieSlice> = points.iter()
        .filter(|p| p.value >= cutoff)
        .map(|p| PieSlice {
            label: p.label.clone(),
            value: p.value,
            fraction: p.value / total,
        })
        .collect();

    let others: f64 = points.iter()
        .filter(|p| p.value < cutoff)
        .map(|p| p.value)
        .sum();
    if others > 0.0 {
        slices.push(PieSlice {
            label: "Others".to_string(),
            value: others,
            fraction: others / total,
        });
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::{RegionResult, Series, TrendResult};
    use crate::config::Operation;

    fn point(label: &str, value: f64) -> ChartPoint {
        ChartPoint {
            label: label.into(),
            full_label: label.into(),
            value,
        }
    }

    #[test]
    fn test_shorten_label() {
        assert_eq!(shorten_label("Chile", 15), "Chile");
        assert_eq!(shorten_label("Bosnia and Herzegovina", 15), "Bosnia and Herz...");
        assert_eq!(shorten_label("Côte d'Ivoire", 4), "Côte...");
    }

    #[test]
    fn test_region_points_shorten_names() {
        let mut series = Series::new();
        series.push("Central African Republic".to_string(), 2.0);
        let chart = Chart::new(
            AnalysisResult::Region(RegionResult {
                title: "t".into(),
                region: "Africa".into(),
                year: 2000,
                operation: Operation::Sum,
                value: 2.0,
                series,
            }),
            ChartKind::Bar,
        );

        let points = chart.points(15);
        assert_eq!(points[0].label, "Central African...");
        assert_eq!(points[0].full_label, "Central African Republic");
    }

    #[test]
    fn test_trend_points_keep_years() {
        let mut series = Series::new();
        series.push(2018, 1.0);
        series.push(2020, 2.0);
        let chart = Chart::new(
            AnalysisResult::Trend(TrendResult {
                title: "t".into(),
                country: "Chile".into(),
                start_year: 2018,
                end_year: 2020,
                series,
                average: 1.5,
                total: 3.0,
            }),
            ChartKind::Line,
        );

        let labels: Vec<String> = chart.points(2).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["2018", "2020"]);
    }

    #[test]
    fn test_pie_merges_small_slices() {
        let points = vec![point("A", 500.0), point("B", 495.0), point("C", 3.0), point("D", 2.0)];
        let slices = pie_slices(&points, 0.01);

        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "Others"]);
        assert_eq!(slices[2].value, 5.0);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_without_small_slices_or_total() {
        let slices = pie_slices(&[point("A", 1.0), point("B", 1.0)], 0.01);
        assert_eq!(slices.len(), 2);

        assert!(pie_slices(&[], 0.01).is_empty());
        assert!(pie_slices(&[point("A", 0.0)], 0.01).is_empty());
    }
}
