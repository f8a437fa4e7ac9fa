//! Read-only queries over a ledger snapshot. Nothing here fails: empty or
//! unmatched input gives empty output.

use crate::models::{DailySales, Ledger, ProductTotal, SalesRecord, Totals};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Product(String),
}

impl ProductFilter {
    /// An absent or blank name means every product.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(name) if !name.is_empty() => Self::Product(name.to_string()),
            _ => Self::All,
        }
    }

    pub fn product(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Product(name) => Some(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Share {
    Top(Vec<ProductTotal>),
    Selection(Vec<ProductTotal>),
}

impl Share {
    pub fn totals(&self) -> &[ProductTotal] {
        match self {
            Self::Top(totals) | Self::Selection(totals) => totals,
        }
    }
}

/// `None` when there are no records, which is distinct from all-zero totals.
pub fn totals(ledger: &Ledger) -> Option<Totals> {
    if ledger.is_empty() {
        return None;
    }
    let mut stocked = 0u64;
    let mut sold = 0u64;
    for record in ledger.records() {
        stocked = stocked.saturating_add(record.stock);
        sold = sold.saturating_add(record.sold);
    }
    Some(Totals {
        stocked,
        sold,
        remaining: signed(stocked) - signed(sold),
    })
}

pub fn filter_by_product(ledger: &Ledger, filter: &ProductFilter) -> Ledger {
    match filter {
        ProductFilter::All => ledger.clone(),
        ProductFilter::Product(name) => ledger
            .records()
            .iter()
            .filter(|record| record.product == *name)
            .cloned()
            .collect(),
    }
}

pub fn daily_sales(ledger: &Ledger) -> Vec<DailySales> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in ledger.records() {
        let sold = by_date.entry(record.date).or_default();
        *sold = sold.saturating_add(record.sold);
    }
    by_date
        .into_iter()
        .map(|(date, sold)| DailySales { date, sold })
        .collect()
}

/// Sold totals per product, in the order each product first appears.
pub fn product_totals(ledger: &Ledger) -> Vec<ProductTotal> {
    sum_by_product(ledger.records().iter())
}

// Ties keep first-seen ledger order, not alphabetical order: with [B:5, A:5]
// B ranks first, and that order also decides who makes the cut at `n`.
pub fn top_n(ledger: &Ledger, n: usize) -> Vec<ProductTotal> {
    let mut ranked = product_totals(ledger);
    ranked.sort_by(|a, b| b.sold.cmp(&a.sold));
    ranked.truncate(n);
    ranked
}

pub fn distinct_products(ledger: &Ledger) -> Vec<String> {
    ledger
        .records()
        .iter()
        .map(|record| record.product.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn selection_share(ledger: &Ledger, selected: &BTreeSet<String>) -> Share {
    if selected.is_empty() {
        return Share::Top(top_n(ledger, DEFAULT_TOP_N));
    }
    Share::Selection(sum_by_product(
        ledger
            .records()
            .iter()
            .filter(|record| selected.contains(&record.product)),
    ))
}

fn sum_by_product<'a>(records: impl Iterator<Item = &'a SalesRecord>) -> Vec<ProductTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ProductTotal> = Vec::new();
    for record in records {
        let slot = *index.entry(record.product.as_str()).or_insert_with(|| {
            totals.push(ProductTotal {
                product: record.product.clone(),
                sold: 0,
            });
            totals.len() - 1
        });
        totals[slot].sold = totals[slot].sold.saturating_add(record.sold);
    }
    totals
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
