// src/state/mod.rs
use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};

use crate::analysis::{self, Chart};
use crate::config::{RecordStore, Settings};
use crate::error::{FormError, LoadError};
use crate::file::FileManager;

pub mod form_state;

pub use form_state::{QueryForm, QueryKind};

// Year range accepted by the form when neither settings nor dataset provide one
pub const FALLBACK_MIN_YEAR: i32 = 1960;
pub const FALLBACK_MAX_YEAR: i32 = 2024;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Dataset,
    Analysis,
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub file_manager: FileManager,

    // Dataset, read-only once loaded
    pub store: Option<RecordStore>,
    pub loaded_at: Option<DateTime<Local>>,

    // Query form and generated charts
    pub form: QueryForm,
    pub charts: Vec<Chart>,
    pub selected_chart: Option<usize>,

    // Minimal UI state
    pub current_screen: Screen,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            file_manager: FileManager::new(settings.columns.clone()),
            settings,
            store: None,
            loaded_at: None,
            form: QueryForm::default(),
            charts: Vec::new(),
            selected_chart: None,
            current_screen: Screen::Dataset,
            error_message: None,
        }
    }

    pub fn load_dataset(&mut self, path: &Path) -> Result<(), LoadError> {
        let store = self.file_manager.load_dataset(path)?;
        self.settings.dataset = path.to_path_buf();
        self.set_store(store);
        Ok(())
    }

    pub fn reload_dataset(&mut self) -> Result<(), LoadError> {
        let path: PathBuf = self.settings.dataset.clone();
        self.load_dataset(&path)
    }

    pub fn set_store(&mut self, store: RecordStore) {
        // Keep the selected region only if the new dataset still has it
        let regions = store.regions();
        if !regions.contains(&self.form.region.as_str()) {
            self.form.region = regions.first().map(|r| r.to_string()).unwrap_or_default();
        }

        self.store = Some(store);
        self.loaded_at = Some(Local::now());
    }

    /// Inclusive year range accepted by the query form.
    pub fn year_bounds(&self) -> (i32, i32) {
        let span = self.store.as_ref().and_then(|s| s.year_span());
        let min = self.settings.years.min
            .or(span.map(|(min, _)| min))
            .unwrap_or(FALLBACK_MIN_YEAR);
        let max = self.settings.years.max
            .or(span.map(|(_, max)| max))
            .unwrap_or(FALLBACK_MAX_YEAR);
        (min, max)
    }

    /// Validate the form, run the query and select the new chart.
    pub fn submit_query(&mut self) -> Result<(), FormError> {
        let store = self.store.as_ref().ok_or(FormError::NoDataset)?;
        let request = self.form.build_request(self.year_bounds())?;
        let result = analysis::evaluate(store, &request)?;

        log::info!("Generated '{}' as {} chart", result.title(), self.form.chart);
        self.push_chart(Chart::new(result, self.form.chart));
        Ok(())
    }

    pub fn push_chart(&mut self, chart: Chart) {
        self.charts.push(chart);
        self.selected_chart = Some(self.charts.len() - 1);
    }

    pub fn remove_chart(&mut self, index: usize) {
        if index >= self.charts.len() {
            return;
        }
        self.charts.remove(index);
        self.selected_chart = match self.selected_chart {
            _ if self.charts.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) => Some(selected.min(self.charts.len() - 1)),
            None => None,
        };
    }

    pub fn selected_chart(&self) -> Option<&Chart> {
        self.selected_chart.and_then(|idx| self.charts.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::config::{ChartKind, GdpRecord};
    use crate::error::AnalysisError;

    fn store() -> RecordStore {
        let mut japan = GdpRecord::new("Japan".into(), "JPN".into(), "Asia".into());
        japan.gdp_by_year.insert(2000, 10.0);
        let mut chile = GdpRecord::new("Chile".into(), "CHL".into(), "South America".into());
        chile.gdp_by_year.insert(2001, 3.0);
        RecordStore::new(vec![japan, chile], vec![2000, 2001])
    }

    fn state() -> AppState {
        let mut state = AppState::new(Settings::default());
        state.set_store(store());
        state
    }

    #[test]
    fn test_store_selects_first_region() {
        let state = state();
        assert_eq!(state.form.region, "Asia");
        assert!(state.loaded_at.is_some());
    }

    #[test]
    fn test_year_bounds_follow_dataset_then_settings() {
        assert_eq!(AppState::new(Settings::default()).year_bounds(), (1960, 2024));

        let mut state = state();
        assert_eq!(state.year_bounds(), (2000, 2001));

        state.settings.years.max = Some(2030);
        assert_eq!(state.year_bounds(), (2000, 2030));
    }

    #[test]
    fn test_submit_region_query() {
        let mut state = state();
        state.form.year = "2000".into();
        state.form.operation = "max".into();
        state.submit_query().unwrap();

        let chart = state.selected_chart().unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        match &chart.result {
            AnalysisResult::Region(r) => assert_eq!(r.value, 10.0),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_submit_unknown_country() {
        let mut state = state();
        state.form.kind = QueryKind::CountryTrend;
        state.form.country = "Atlantis".into();
        state.form.year = "2000".into();

        assert_eq!(
            state.submit_query(),
            Err(FormError::Analysis(AnalysisError::CountryNotFound("Atlantis".into())))
        );
        assert!(state.charts.is_empty());
    }

    #[test]
    fn test_submit_without_dataset() {
        let mut state = AppState::new(Settings::default());
        assert_eq!(state.submit_query(), Err(FormError::NoDataset));
    }

    #[test]
    fn test_remove_chart_keeps_selection_valid() {
        let mut state = state();
        state.form.year = "2000".into();
        for _ in 0..3 {
            state.submit_query().unwrap();
        }
        state.selected_chart = Some(2);
        state.remove_chart(0);
        assert_eq!(state.selected_chart, Some(1));
        state.remove_chart(1);
        assert_eq!(state.selected_chart, Some(0));
        state.remove_chart(0);
        assert_eq!(state.selected_chart, None);
    }

    #[test]
    fn test_load_missing_dataset_keeps_state() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        let err = state.load_dataset(&dir.path().join("gone.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(state.store.as_ref().map(|s| s.len()), Some(2));
    }
}
