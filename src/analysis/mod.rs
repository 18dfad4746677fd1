// src/analysis/mod.rs
pub mod aggregate;
pub mod chart;

// Re-export commonly used types
pub use aggregate::{evaluate, AnalysisResult};
pub use chart::Chart;
