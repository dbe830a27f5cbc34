//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The query type used by the handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    category::calculate_category_counts,
    dashboard::{
        charts::{
            DashboardChart, ECHARTS_SCRIPT_URL, category_chart, charts_script, charts_view,
            price_range_chart,
        },
        tables::{pagination_view, statistics_panel, transactions_table},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, error_view, link,
    },
    month::{MONTHS, filter_by_month, month_number},
    pagination::{Page, create_pagination_indicators},
    price_range::calculate_price_ranges,
    product_transaction::{ProductTransactionQuery, ProductTransactionState, list_transactions},
    record::TransactionRecord,
    statistics::{Statistics, calculate_statistics},
};

/// The month shown when the query does not pick one.
const DEFAULT_MONTH: &str = "03";

/// Shown in headings when the month is not one of "01" to "12".
const UNKNOWN_MONTH_NAME: &str = "Unknown month";

/// The query string of the dashboard page.
///
/// Values are kept as strings so that a malformed page number shows an empty
/// table instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The two-digit month to show, e.g. "03".
    pub month: Option<String>,
    /// Only list transactions whose title, description or price match.
    pub search: Option<String>,
    /// The 1-based page of the transactions table.
    pub page: Option<String>,
}

impl DashboardQuery {
    fn month(&self) -> &str {
        match self.month.as_deref() {
            Some(month) if !month.is_empty() => month,
            _ => DEFAULT_MONTH,
        }
    }

    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// The query string of a link to another dashboard page.
#[derive(Serialize)]
struct DashboardLink<'a> {
    month: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u64>,
}

impl DashboardLink<'_> {
    fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("could not encode dashboard link: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }
}

fn dashboard_url(month: &str, search: &str, page: u64) -> String {
    DashboardLink {
        month,
        search: Some(search).filter(|search| !search.is_empty()),
        page: Some(page),
    }
    .to_url()
}

/// The link that shows the whole month again.
fn clear_search_url(month: &str) -> String {
    DashboardLink {
        month,
        search: None,
        page: None,
    }
    .to_url()
}

/// The English name of a two-digit month, e.g. "March" for "03".
fn month_name(month: &str) -> Option<String> {
    MONTHS
        .iter()
        .find(|candidate| month_number(**candidate) == month)
        .map(|candidate| candidate.to_string())
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    month: String,
    search: String,
    page: Page<TransactionRecord>,
    statistics: Statistics,
    charts: [DashboardChart; 2],
}

/// Compute the table page, statistics and charts for the month in `query`.
///
/// The search only narrows the table. The statistics and charts always cover
/// the whole month.
fn build_dashboard_data(
    records: Vec<TransactionRecord>,
    query: &DashboardQuery,
    state: &ProductTransactionState,
) -> DashboardData {
    let month = query.month().to_owned();
    let month_records = filter_by_month(records, &month);
    let name = month_name(&month).unwrap_or_else(|| UNKNOWN_MONTH_NAME.to_owned());

    let statistics = calculate_statistics(&month_records);
    let charts = [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(&name, &calculate_price_ranges(&month_records)).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&name, &calculate_category_counts(&month_records)).to_string(),
        },
    ];

    let listing_query = ProductTransactionQuery {
        month: None,
        search: query.search.clone(),
        page: query.page.clone(),
        per_page: None,
    };
    let page = list_transactions(month_records, &listing_query, &state.pagination_config);

    DashboardData {
        month,
        search: query.search().to_owned(),
        page,
        statistics,
        charts,
    }
}

/// Display the transactions, statistics and charts for one month.
pub async fn get_dashboard_page(
    State(state): State<ProductTransactionState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let records = match state.dataset.fetch().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not fetch the dashboard data: {error}");
            return dashboard_error_view().into_response();
        }
    };

    let data = build_dashboard_data(records, &query, &state);

    dashboard_view(&data, state.pagination_config.max_pages).into_response()
}

fn dashboard_error_view() -> (StatusCode, Markup) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view(
            "Error",
            "500",
            "Could not load the transactions.",
            "Check the server logs and try again later.",
        ),
    )
}

fn filter_form(month: &str, search: &str) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex flex-col md:flex-row md:items-end gap-4 w-full mb-4"
        {
            div class="md:w-1/3"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search transaction" }
                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Title, description or price"
                    value=(search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="md:w-1/4"
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for candidate in MONTHS {
                        @let value = month_number(candidate);
                        option value=(value) selected[value == month] { (candidate) }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
            }
        }
    }
}

fn dashboard_view(data: &DashboardData, max_pages: u64) -> Markup {
    let name = month_name(&data.month).unwrap_or_else(|| UNKNOWN_MONTH_NAME.to_owned());
    let indicators = match (data.page.current_page, data.page.total_pages) {
        (Some(current_page), Some(total_pages)) if current_page > 0 && total_pages > 0 => {
            create_pagination_indicators(current_page, total_pages, max_pages)
        }
        _ => Vec::new(),
    };

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-4" { "Transaction Dashboard" }

                (filter_form(&data.month, &data.search))

                @if !data.search.is_empty() {
                    p class="mb-2"
                    {
                        (data.page.total_count) " transactions match \"" (data.search) "\". "
                        (link(&clear_search_url(&data.month), "Clear search"))
                    }
                }

                (transactions_table(&data.page.items))

                @if !indicators.is_empty() {
                    (pagination_view(&indicators, |page| dashboard_url(&data.month, &data.search, page)))
                }

                (statistics_panel(&name, &data.statistics))

                (charts_view(&data.charts))
            }
        }
    };

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}
