// src/config/store.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use super::GdpRecord;

/// Counters collected while parsing the source table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub skipped_rows: usize,
    pub coerced_cells: usize,
}

/// Read-only, in-memory view of one loaded dataset.
///
/// Built once per load and never mutated afterwards; every query borrows it.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    source: Option<PathBuf>,
    records: Vec<GdpRecord>,
    year_columns: Vec<i32>,
    summary: LoadSummary,
}

impl RecordStore {
    pub fn new(records: Vec<GdpRecord>, mut year_columns: Vec<i32>) -> Self {
        year_columns.sort_unstable();
        year_columns.dedup();
        Self {
            source: None,
            records,
            year_columns,
            summary: LoadSummary::default(),
        }
    }

    pub fn with_source(mut self, source: &Path, summary: LoadSummary) -> Self {
        self.source = Some(source.to_path_buf());
        self.summary = summary;
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn records(&self) -> &[GdpRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Year columns found in the header, ascending.
    pub fn year_columns(&self) -> &[i32] {
        &self.year_columns
    }

    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.year_columns.first()?, *self.year_columns.last()?))
    }

    /// Records of one region in source order. Exact, case-sensitive match.
    pub fn in_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a GdpRecord> + 'a {
        self.records.iter().filter(move |r| r.region == region)
    }

    pub fn find_country(&self, name: &str) -> Option<&GdpRecord> {
        self.records.iter().find(|r| r.matches_country(name))
    }

    /// Sorted distinct region names.
    pub fn regions(&self) -> Vec<&str> {
        self.countries_per_region().into_keys().collect()
    }

    pub fn countries_per_region(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.region.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
