//! The operations the page needs, as functions over an explicit ledger value.

use crate::aggregation::{self, ProductFilter, Share};
use crate::errors::AppError;
use crate::models::{
    DashboardView, EntryRequest, Ledger, PieMode, PieSlice, PieView, ProductTotal, SalesRecord,
};
use crate::storage::LedgerStore;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{error, info};

pub const TOP_TITLE: &str = "Top 10 Products by Sales";

pub fn form_options(ledger: &Ledger) -> Vec<String> {
    aggregation::distinct_products(ledger)
}

/// Validates `entry`, appends it and persists. On error the caller keeps the
/// old ledger.
pub async fn submit_entry(
    store: &LedgerStore,
    ledger: &Ledger,
    entry: EntryRequest,
    today: NaiveDate,
) -> Result<(Ledger, SalesRecord), AppError> {
    let record = validate_entry(entry, today)?;
    let updated = store.append(ledger, record.clone()).await.map_err(|err| {
        error!(product = %record.product, "failed to persist entry: {err}");
        AppError::from(err)
    })?;
    info!(product = %record.product, date = %record.date, records = updated.len(), "entry added");
    Ok((updated, record))
}

pub fn validate_entry(entry: EntryRequest, today: NaiveDate) -> Result<SalesRecord, AppError> {
    let product = entry.product.trim();
    if product.is_empty() {
        return Err(AppError::validation("product name is required"));
    }
    let stock = u64::try_from(entry.stock)
        .map_err(|_| AppError::validation("stock must be zero or more"))?;
    let sold = u64::try_from(entry.sold)
        .map_err(|_| AppError::validation("sold must be zero or more"))?;
    Ok(SalesRecord {
        product: product.to_string(),
        stock,
        sold,
        date: entry.date.unwrap_or(today),
    })
}

pub fn success_message(record: &SalesRecord) -> String {
    format!("Added {} record!", record.product)
}

pub fn dashboard_view(
    ledger: &Ledger,
    filter: &ProductFilter,
    selection: &BTreeSet<String>,
) -> DashboardView {
    let filtered = aggregation::filter_by_product(ledger, filter);
    DashboardView {
        filter: filter.product().map(str::to_string),
        totals: aggregation::totals(ledger),
        daily_sales: aggregation::daily_sales(&filtered),
        table_rows: filtered.records().to_vec(),
        pie: pie_view(aggregation::selection_share(ledger, selection), selection),
        products: form_options(ledger),
    }
}

fn pie_view(share: Share, selection: &BTreeSet<String>) -> PieView {
    let (mode, title, totals) = match share {
        Share::Top(totals) => (PieMode::Top, TOP_TITLE.to_string(), totals),
        Share::Selection(totals) => {
            let title = match selection.iter().next() {
                Some(only) if selection.len() == 1 => format!("Sales Share: {only}"),
                _ => "Sales Comparison".to_string(),
            };
            (PieMode::Selection, title, totals)
        }
    };
    PieView {
        mode,
        title,
        slices: slices(totals),
    }
}

fn slices(totals: Vec<ProductTotal>) -> Vec<PieSlice> {
    let sum: u64 = totals.iter().map(|t| t.sold).fold(0, u64::saturating_add);
    totals
        .into_iter()
        .map(|t| PieSlice {
            percent: if sum == 0 {
                0.0
            } else {
                t.sold as f64 * 100.0 / sum as f64
            },
            product: t.product,
            sold: t.sold,
        })
        .collect()
}
