use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Stock")]
    pub stock: u64,
    #[serde(rename = "Sold")]
    pub sold: u64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl SalesRecord {
    pub fn new(product: impl Into<String>, stock: u64, sold: u64, date: NaiveDate) -> Self {
        Self {
            product: product.into(),
            stock,
            sold,
            date,
        }
    }
}

/// Sales records in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<SalesRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn appended(&self, record: SalesRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }
}

impl From<Vec<SalesRecord>> for Ledger {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<SalesRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub stocked: u64,
    pub sold: u64,
    /// Not clamped: over-selling shows up as a negative value.
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTotal {
    pub product: String,
    pub sold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieMode {
    Top,
    Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub product: String,
    pub sold: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieView {
    pub mode: PieMode,
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: Option<String>,
    pub totals: Option<Totals>,
    pub daily_sales: Vec<DailySales>,
    pub table_rows: Vec<SalesRecord>,
    pub pie: PieView,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub product: String,
    pub stock: i64,
    pub sold: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub record: SalesRecord,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<String>,
}
