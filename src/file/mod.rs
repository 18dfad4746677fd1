// src/file/mod.rs
use anyhow::Result;
use std::path::Path;
use crate::config::{ColumnNames, RecordStore};
use crate::error::LoadError;

pub mod batch;
pub mod dataset;

pub use batch::{BatchFile, BatchItem};

// Core trait for file operations
pub trait FileHandler<T> {
    type Error;

    fn load(&self, path: &Path) -> Result<T, Self::Error>;
}

#[derive(Debug)]
pub struct FileManager {
    dataset_handler: dataset::DatasetFileHandler,
    batch_handler: batch::BatchFileHandler,
}

impl FileManager {
    pub fn new(columns: ColumnNames) -> Self {
        Self {
            dataset_handler: dataset::DatasetFileHandler::new(columns),
            batch_handler: batch::BatchFileHandler::new(),
        }
    }

    pub fn load_dataset(&self, path: &Path) -> Result<RecordStore, LoadError> {
        self.dataset_handler.load(path)
    }

    pub fn load_batch(&self, path: &Path) -> Result<BatchFile> {
        self.batch_handler.load(path)
    }
}
