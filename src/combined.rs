//! Statistics, price ranges and categories for a month in one response.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{CategoryCount, calculate_category_counts},
    dataset::DatasetSource,
    json_message,
    month::{MonthQuery, filter_by_month},
    price_range::{BarChartData, calculate_price_ranges},
    statistics::{Statistics, calculate_statistics},
};

const COMBINED_ERROR_MESSAGE: &str = "Server error";

/// A category slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartSlice {
    /// The category label.
    pub name: String,
    /// The number of records with this category.
    pub count: u64,
}

impl From<CategoryCount> for PieChartSlice {
    fn from(value: CategoryCount) -> Self {
        Self {
            name: value.category,
            count: value.count,
        }
    }
}

/// The categories of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartData {
    /// One slice per category, in first-seen order.
    pub categories: Vec<PieChartSlice>,
}

/// Everything the dashboard charts need for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The sales totals.
    pub statistics: Statistics,
    /// The price histogram.
    pub bar_chart_data: BarChartData,
    /// The category distribution.
    pub pie_chart_data: PieChartData,
}

/// Fetch the dataset once and build all three views for `month`.
///
/// All three views are computed from the same snapshot.
///
/// # Errors
/// Returns [Error::MissingMonth] if `month` is missing or empty, or an error
/// if the dataset cannot be fetched.
pub(crate) async fn combined_data_for_month(
    dataset: &DatasetSource,
    query: &MonthQuery,
) -> Result<CombinedData, Error> {
    let month = query.required_month()?;
    let records = filter_by_month(dataset.fetch().await?, month);

    Ok(CombinedData {
        statistics: calculate_statistics(&records),
        bar_chart_data: BarChartData {
            month: month.to_owned(),
            price_ranges: calculate_price_ranges(&records),
        },
        pie_chart_data: PieChartData {
            categories: calculate_category_counts(&records)
                .into_iter()
                .map(PieChartSlice::from)
                .collect(),
        },
    })
}

/// Get the statistics, bar chart and pie chart data for a month.
///
/// Every failure, including a missing month, is reported as a server error.
pub async fn get_combined_data(
    State(dataset): State<DatasetSource>,
    Query(query): Query<MonthQuery>,
) -> Response {
    match combined_data_for_month(&dataset, &query).await {
        Ok(combined) => Json(combined).into_response(),
        Err(error) => {
            tracing::error!("Error fetching combined data: {error}");
            json_message(StatusCode::INTERNAL_SERVER_ERROR, COMBINED_ERROR_MESSAGE)
        }
    }
}
