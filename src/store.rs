use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use log::info;
use thiserror::Error;

use crate::model::TrafficRecord;

/// Store-level failure. Unlike gate errors these are fatal for the merge call:
/// the in-memory batch is lost and the caller decides whether to retrigger.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("existing store failed to parse: {0}")]
    MalformedStore(String),
}

/// Sole writer of the durable record store.
///
/// The store is a single CSV file rewritten on every merge under a
/// keep-today-only retention policy: rows from earlier calendar days are
/// dropped (an external archival job snapshots them beforehand), rows from
/// today are preserved, and the new batch is appended. One exclusive lock
/// covers the whole read-merge-rewrite sequence, so concurrent cycles in the
/// same process never interleave.
pub struct PersistenceMerger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PersistenceMerger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Merges a batch into the store and returns the number of new rows
    /// written. An empty batch leaves the store untouched.
    pub fn merge(&self, batch: &[TrafficRecord], today: NaiveDate) -> Result<usize, StoreError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut rows = if self.path.exists() {
            let existing = read_rows(&self.path)?;
            let before = existing.len();
            let kept: Vec<TrafficRecord> = existing.into_iter().filter(|row| row.timestamp.date() == today).collect();
            if kept.len() < before {
                info!("retention dropped {} rows from earlier days", before - kept.len());
            }
            kept
        } else {
            Vec::new()
        };

        rows.extend_from_slice(batch);
        write_rows(&self.path, &rows)?;

        Ok(batch.len())
    }

    pub fn read_all(&self) -> Result<Vec<TrafficRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_rows(&self.path)
    }

    /// The `n` newest rows, most recent first.
    pub fn read_recent(&self, n: usize) -> Result<Vec<TrafficRecord>, StoreError> {
        let mut rows = self.read_all()?;
        rows.sort_by_key(|row| row.timestamp);
        rows.reverse();
        rows.truncate(n);
        Ok(rows)
    }

    /// Raw store bytes, for the download endpoint of the excluded web layer.
    pub fn raw_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(fs::read(&self.path)?)
    }

    pub fn statistics(&self) -> Result<Option<StoreStatistics>, StoreError> {
        let rows = self.read_all()?;
        Ok(StoreStatistics::from_records(&rows))
    }
}

fn read_rows(path: &Path) -> Result<Vec<TrafficRecord>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<TrafficRecord>() {
        rows.push(row.map_err(csv_error)?);
    }
    Ok(rows)
}

// full rewrite via a sibling temp file, swapped in at the end
fn write_rows(path: &Path, rows: &[TrafficRecord]) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");

    let mut writer = csv::Writer::from_path(&tmp_path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn csv_error(err: csv::Error) -> StoreError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => StoreError::Io(io_err),
            other => StoreError::MalformedStore(format!("{:?}", other)),
        }
    } else {
        StoreError::MalformedStore(err.to_string())
    }
}

/// Aggregate view over the store, served to the excluded dashboard layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatistics {
    pub total_records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub unique_routes: usize,
    pub traffic_distribution: BTreeMap<String, usize>,
    pub avg_delay_by_hour: BTreeMap<u32, f64>,
}

impl StoreStatistics {
    pub fn from_records(rows: &[TrafficRecord]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let mut routes = std::collections::HashSet::new();
        let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut delay_sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

        for row in rows {
            routes.insert(row.route_name.as_str());
            *distribution.entry(row.traffic_status.to_string()).or_default() += 1;
            let entry = delay_sums.entry(row.hour).or_default();
            entry.0 += row.delay_minutes;
            entry.1 += 1;
        }

        let avg_delay_by_hour = delay_sums
            .into_iter()
            .map(|(hour, (sum, count))| (hour, (sum / count as f64 * 100.0).round() / 100.0))
            .collect();

        Some(Self {
            total_records: rows.len(),
            first_date: rows.iter().map(|row| row.timestamp.date()).min()?,
            last_date: rows.iter().map(|row| row.timestamp.date()).max()?,
            unique_routes: routes.len(),
            traffic_distribution: distribution,
            avg_delay_by_hour,
        })
    }
}
