//! The paginated, searchable list of transactions.

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    dataset::DatasetSource,
    month::filter_by_month,
    pagination::{Page, PageRequest, PaginationConfig, paginate},
    record::TransactionRecord,
    search::search_transactions,
};

const PRODUCT_TRANSACTION_ERROR_MESSAGE: &str = "Error fetching data from S3";

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ProductTransactionState {
    /// Where the transactions come from.
    pub dataset: DatasetSource,
    /// The page defaults.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ProductTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query string of the transaction listing.
///
/// Values are kept as strings so that malformed numbers give an empty page
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransactionQuery {
    /// Only list transactions sold in this month, e.g. "03".
    pub month: Option<String>,
    /// Only list transactions whose title, description or price match.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The number of transactions per page.
    pub per_page: Option<String>,
}

/// One page of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransactionPage {
    /// The transactions on this page.
    pub transactions: Vec<TransactionRecord>,
    /// The number of transactions matching the filters.
    pub total_transactions: usize,
    /// The number of pages, `null` if the page size is invalid.
    pub total_pages: Option<u64>,
    /// The requested page, `null` if it is not a number.
    pub current_page: Option<u64>,
}

impl From<Page<TransactionRecord>> for ProductTransactionPage {
    fn from(page: Page<TransactionRecord>) -> Self {
        Self {
            transactions: page.items,
            total_transactions: page.total_count,
            total_pages: page.total_pages,
            current_page: page.current_page,
        }
    }
}

/// Apply the month filter, then the search, then pagination to `records`.
///
/// An empty or missing month or search skips that step.
pub(crate) fn list_transactions(
    records: Vec<TransactionRecord>,
    query: &ProductTransactionQuery,
    pagination_config: &PaginationConfig,
) -> Page<TransactionRecord> {
    let records = match query.month.as_deref() {
        Some(month) if !month.is_empty() => filter_by_month(records, month),
        _ => records,
    };

    let records = search_transactions(records, query.search.as_deref().unwrap_or_default());

    let request = PageRequest::from_query(
        query.page.as_deref(),
        query.per_page.as_deref(),
        pagination_config,
    );

    paginate(records, request)
}

/// Fetch the dataset and list the matching page of transactions.
///
/// # Errors
/// Returns an error if the dataset cannot be fetched.
pub(crate) async fn transactions_page(
    state: &ProductTransactionState,
    query: &ProductTransactionQuery,
) -> Result<Page<TransactionRecord>, Error> {
    let records = state.dataset.fetch().await?;

    Ok(list_transactions(records, query, &state.pagination_config))
}

/// List transactions filtered by month and search text, one page at a time.
pub async fn get_product_transactions(
    State(state): State<ProductTransactionState>,
    Query(query): Query<ProductTransactionQuery>,
) -> Response {
    match transactions_page(&state, &query).await {
        Ok(page) => Json(ProductTransactionPage::from(page)).into_response(),
        Err(error) => error.into_json_response(PRODUCT_TRANSACTION_ERROR_MESSAGE),
    }
}
