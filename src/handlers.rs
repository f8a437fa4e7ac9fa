use crate::aggregation::ProductFilter;
use crate::dashboard::{dashboard_view, form_options, submit_entry, success_message};
use crate::errors::AppError;
use crate::models::{DashboardView, EntryRequest, EntryResponse, ProductsResponse};
use crate::state::AppState;
use crate::storage::parse_date;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub product: String,
    pub stock: i64,
    pub sold: i64,
    #[serde(default)]
    pub date: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ledger = state.ledger.lock().await;
    Html(render_index(&form_options(&ledger)))
}

pub async fn get_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let ledger = state.ledger.lock().await;
    Json(ProductsResponse {
        products: form_options(&ledger),
    })
}

/// `?product=<name>` narrows the chart and table; repeated `select=<name>`
/// keys make up the pie selection.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<DashboardView> {
    let mut filter = ProductFilter::All;
    let mut selection = BTreeSet::new();
    for (key, value) in params {
        match key.as_str() {
            "product" => filter = ProductFilter::from_param(Some(value.as_str())),
            "select" if !value.is_empty() => {
                selection.insert(value);
            }
            _ => {}
        }
    }

    let ledger = state.ledger.lock().await;
    Json(dashboard_view(&ledger, &filter, &selection))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), AppError> {
    let response = apply_entry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn entry_form(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    let date = match form.date.trim() {
        "" => None,
        raw => Some(parse_date(raw).ok_or_else(|| AppError::validation("date is not valid"))?),
    };
    let request = EntryRequest {
        product: form.product,
        stock: form.stock,
        sold: form.sold,
        date,
    };
    apply_entry(&state, request).await?;
    Ok(Redirect::to("/"))
}

async fn apply_entry(state: &AppState, request: EntryRequest) -> Result<EntryResponse, AppError> {
    let mut ledger = state.ledger.lock().await;
    let (updated, record) = submit_entry(&state.store, &ledger, request, today()).await?;
    *ledger = updated;

    Ok(EntryResponse {
        message: success_message(&record),
        record,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
