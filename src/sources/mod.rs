// Rate sources - where the raw Selic series comes from

pub mod bcb;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::series::RawRateRecord;

pub use bcb::{BcbClient, DEFAULT_BCB_URL};

/// Supplier of raw daily rate rows for a date range.
///
/// Dates are passed already formatted as `dd/mm/yyyy`.
pub trait RateSource {
    fn fetch(&self, start_param: &str, end_param: &str) -> Result<Vec<RawRateRecord>>;
}

/// Reads a saved BCB JSON response from disk.
///
/// The whole file is returned regardless of the requested range, the same
/// way the API may return rows outside it.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for FileSource {
    fn fetch(&self, start_param: &str, end_param: &str) -> Result<Vec<RawRateRecord>> {
        info!(
            "Reading Selic rates {} to {} from {}",
            start_param,
            end_param,
            self.path.display()
        );
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read rates file {}", self.path.display()))?;
        bcb::parse_response(&content)
    }
}

/// Fixed in-memory rows, for tests and callers that already hold the data
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<RawRateRecord>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRateRecord>) -> Self {
        Self { rows }
    }
}

impl RateSource for StaticSource {
    fn fetch(&self, _start_param: &str, _end_param: &str) -> Result<Vec<RawRateRecord>> {
        Ok(self.rows.clone())
    }
}
