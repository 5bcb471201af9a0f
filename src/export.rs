//! CSV persistence of the calculation output
//!
//! Files are never overwritten: if the target already exists the write is
//! skipped and logged.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::reports::SummaryRow;
use crate::series::RateRecord;

pub const SOLUTION_FILENAME: &str = "solution.csv";
pub const RAW_FILENAME: &str = "df_raw.csv";

/// Outcome of a single CSV write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

impl SaveOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Written(p) | SaveOutcome::Skipped(p) => p,
        }
    }
}

/// Raw series row, as persisted (rate already a fraction)
#[derive(Debug, Serialize)]
struct RawRow {
    data: chrono::NaiveDate,
    valor: rust_decimal::Decimal,
}

/// Serialize `rows` to `path` unless the file already exists.
///
/// The file is created with `create_new`, so the existence check and the
/// creation are a single step and a file appearing in between is kept.
pub fn save_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<SaveOutcome> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("File {} already exists, ignoring", path.display());
            return Ok(SaveOutcome::Skipped(path.to_path_buf()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create CSV file {}", path.display()))
        }
    };

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file {}", path.display()))?;

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    info!("Path to csv output: {}", absolute.display());
    Ok(SaveOutcome::Written(absolute))
}

/// Write the reshaped series and the raw rate series into `output_dir`.
pub fn save_outputs(
    rows: &[SummaryRow],
    raw: &[RateRecord],
    output_dir: &Path,
) -> Result<Vec<SaveOutcome>> {
    let raw_rows: Vec<RawRow> = raw
        .iter()
        .map(|r| RawRow {
            data: r.date,
            valor: r.rate,
        })
        .collect();

    Ok(vec![
        save_csv(rows, &output_dir.join(SOLUTION_FILENAME))?,
        save_csv(&raw_rows, &output_dir.join(RAW_FILENAME))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn rows() -> Vec<SummaryRow> {
        vec![SummaryRow {
            date: NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
            capital: dec!(1010),
            amount_earned: dec!(10),
        }]
    }

    fn raw() -> Vec<RateRecord> {
        vec![RateRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
            rate: dec!(0.0001),
        }]
    }

    #[test]
    fn test_save_outputs_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let outcomes = save_outputs(&rows(), &raw(), dir.path()).unwrap();
        assert!(matches!(outcomes[0], SaveOutcome::Written(_)));
        assert!(matches!(outcomes[1], SaveOutcome::Written(_)));

        let solution = std::fs::read_to_string(dir.path().join(SOLUTION_FILENAME)).unwrap();
        assert_eq!(solution, "Date,Capital,Amount earned\n2021-01-04,1010,10\n");

        let raw = std::fs::read_to_string(dir.path().join(RAW_FILENAME)).unwrap();
        assert_eq!(raw, "data,valor\n2021-01-04,0.0001\n");
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SOLUTION_FILENAME);
        std::fs::write(&path, "keep me").unwrap();

        let outcome = save_csv(&rows(), &path).unwrap();
        assert_eq!(outcome, SaveOutcome::Skipped(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_second_save_is_skipped_and_keeps_first_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(RAW_FILENAME);

        let first = save_csv(&rows(), &path).unwrap();
        assert!(matches!(first, SaveOutcome::Written(_)));
        let written = std::fs::read_to_string(&path).unwrap();

        let other = vec![SummaryRow {
            date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            capital: dec!(1),
            amount_earned: dec!(0),
        }];
        let second = save_csv(&other, &path).unwrap();
        assert_eq!(second, SaveOutcome::Skipped(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_dangling_symlink_is_not_followed() {
        #[cfg(unix)]
        {
            let dir = TempDir::new().unwrap();
            let target = dir.path().join("elsewhere.csv");
            let link = dir.path().join(SOLUTION_FILENAME);
            std::os::unix::fs::symlink(&target, &link).unwrap();

            let outcome = save_csv(&rows(), &link).unwrap();
            assert_eq!(outcome, SaveOutcome::Skipped(link.clone()));
            assert!(!target.exists());
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join(SOLUTION_FILENAME);
        let err = save_csv(&rows(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to create CSV file"));
    }
}
