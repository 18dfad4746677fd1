// src/ui/mod.rs
pub mod analysis;
pub mod chart;
pub mod dataset;
