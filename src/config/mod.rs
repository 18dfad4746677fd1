// src/config/mod.rs
pub mod record;
pub mod request;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use record::GdpRecord;
pub use request::{AnalysisRequest, ChartKind, CountryTrendQuery, Operation, RegionQuery};
pub use settings::{ColumnNames, Settings};
pub use store::{LoadSummary, RecordStore};
