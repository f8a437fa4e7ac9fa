//! Ledger persistence as a flat CSV file (`Product,Stock,Sold,Date`).
//!
//! Every append rewrites the whole file. There is no locking against other
//! processes writing the same path.

use crate::models::{Ledger, SalesRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::Trim;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

pub const HEADER: [&str; 4] = ["Product", "Stock", "Sold", "Date"];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ledger file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger file is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Ok(None): no file at the path.
    pub async fn read(&self) -> Result<Option<Ledger>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_ledger(&bytes).map(Some)
    }

    pub async fn load(&self) -> Ledger {
        match self.read().await {
            Ok(Some(ledger)) => {
                info!(records = ledger.len(), path = %self.path.display(), "ledger loaded");
                ledger
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no ledger file, starting empty");
                Ledger::new()
            }
            Err(err) => {
                error!(path = %self.path.display(), "ignoring unreadable ledger file: {err}");
                Ledger::new()
            }
        }
    }

    /// Appends `record` and writes the full ledger. The new ledger is only
    /// returned once the write has succeeded.
    pub async fn append(&self, ledger: &Ledger, record: SalesRecord) -> Result<Ledger, StoreError> {
        let updated = ledger.appended(record);
        self.persist(&updated).await?;
        Ok(updated)
    }

    pub async fn persist(&self, ledger: &Ledger) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let payload = encode_ledger(ledger)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Stock")]
    stock: String,
    #[serde(rename = "Sold")]
    sold: String,
    #[serde(rename = "Date")]
    date: String,
}

impl RawRow {
    fn validate(self) -> Result<SalesRecord, String> {
        if self.product.is_empty() {
            return Err("Product is empty".to_string());
        }
        let stock =
            parse_count(&self.stock).ok_or_else(|| format!("bad Stock {:?}", self.stock))?;
        let sold = parse_count(&self.sold).ok_or_else(|| format!("bad Sold {:?}", self.sold))?;
        let date = parse_date(&self.date).ok_or_else(|| format!("bad Date {:?}", self.date))?;
        Ok(SalesRecord {
            product: self.product,
            stock,
            sold,
            date,
        })
    }
}

pub fn decode_ledger(bytes: &[u8]) -> Result<Ledger, StoreError> {
    let mut reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |pos| pos.line());
        let raw: RawRow = row.deserialize(Some(&headers))?;
        let record = raw
            .validate()
            .map_err(|reason| StoreError::InvalidRecord { line, reason })?;
        records.push(record);
    }
    Ok(Ledger::from(records))
}

pub fn encode_ledger(ledger: &Ledger) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if ledger.is_empty() {
        writer.write_record(HEADER)?;
    }
    for record in ledger.records() {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::Io(std::io::Error::new(err.error().kind(), err.to_string())))
}

/// Integer counts; whole-valued floats such as `3.0` are accepted too.
fn parse_count(value: &str) -> Option<u64> {
    if let Ok(count) = value.parse::<u64>() {
        return Some(count);
    }
    let float = value.parse::<f64>().ok()?;
    (float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64)
        .then_some(float as u64)
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(stamp.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|stamp| stamp.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> LedgerStore {
        LedgerStore::new(dir.path().join("sales.csv"))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.read().await.unwrap().is_none());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_but_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Product,Stock,Sold,Date\nA,ten,3,2024-01-01\n")
            .await
            .unwrap();

        match store.read().await {
            Err(StoreError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid record, got {other:?}"),
        }
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn missing_column_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Product,Stock,Date\nA,1,2024-01-01\n")
            .await
            .unwrap();
        assert!(store.read().await.is_err());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn empty_and_header_only_files_are_empty_ledgers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "").await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(Ledger::new()));

        fs::write(store.path(), "Product,Stock,Sold,Date\n").await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(Ledger::new()));
    }

    #[tokio::test]
    async fn append_persists_and_reloads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let first = SalesRecord::new("Widget", 10, 3, day(2024, 1, 1));
        let second = SalesRecord::new("Gadget, large", 5, 5, day(2024, 1, 2));

        let ledger = store.load().await;
        let ledger = store.append(&ledger, first.clone()).await.unwrap();
        let ledger = store.append(&ledger, second.clone()).await.unwrap();

        let reloaded = store.load().await;
        assert_eq!(reloaded, ledger);
        assert_eq!(reloaded.records(), &[first, second]);
    }

    #[tokio::test]
    async fn append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("nested/deeper/sales.csv"));
        let record = SalesRecord::new("A", 1, 1, day(2024, 3, 1));
        store.append(&Ledger::new(), record).await.unwrap();
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_write_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target path is a directory, so the write cannot succeed.
        let store = LedgerStore::new(dir.path());
        let record = SalesRecord::new("A", 1, 1, day(2024, 3, 1));
        assert!(matches!(
            store.append(&Ledger::new(), record).await,
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn written_file_has_canonical_layout() {
        let ledger = Ledger::from(vec![SalesRecord::new("A", 10, 3, day(2024, 1, 1))]);
        let text = String::from_utf8(encode_ledger(&ledger).unwrap()).unwrap();
        assert_eq!(text, "Product,Stock,Sold,Date\nA,10,3,2024-01-01\n");

        let empty = String::from_utf8(encode_ledger(&Ledger::new()).unwrap()).unwrap();
        assert_eq!(empty, "Product,Stock,Sold,Date\n");
    }

    #[test]
    fn date_spellings_normalize_to_one_day() {
        let expected = Some(day(2024, 1, 2));
        assert_eq!(parse_date("2024-01-02"), expected);
        assert_eq!(parse_date("2024/01/02"), expected);
        assert_eq!(parse_date("2024-01-02 00:00:00"), expected);
        assert_eq!(parse_date("2024-01-02T13:45:00"), expected);
        assert_eq!(parse_date("2024-01-02T13:45:00+02:00"), expected);
        assert_eq!(parse_date("02.01.2024"), None);
    }

    #[test]
    fn decode_trims_fields_and_accepts_whole_floats() {
        let csv = b"Product, Stock, Sold, Date\n Widget , 4.0 , 2 , 2024-01-01 00:00:00\n";
        let ledger = decode_ledger(csv).unwrap();
        assert_eq!(
            ledger.records(),
            &[SalesRecord::new("Widget", 4, 2, day(2024, 1, 1))]
        );
    }

    #[test]
    fn decode_rejects_negative_and_empty_product() {
        assert!(decode_ledger(b"Product,Stock,Sold,Date\nA,-1,0,2024-01-01\n").is_err());
        assert!(decode_ledger(b"Product,Stock,Sold,Date\n,1,0,2024-01-01\n").is_err());
    }
}
