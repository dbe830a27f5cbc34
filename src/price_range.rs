//! The price histogram shown in the bar chart.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    dataset::DatasetSource,
    month::{MonthQuery, filter_by_month},
    record::TransactionRecord,
};

const BAR_CHART_ERROR_MESSAGE: &str = "Error fetching bar chart data";

/// The inclusive upper bound and label of each price bucket, in ascending
/// order. The last bucket has no upper bound.
const PRICE_BUCKETS: [(f64, &str); 10] = [
    (100.0, "0 - 100"),
    (200.0, "101 - 200"),
    (300.0, "201 - 300"),
    (400.0, "301 - 400"),
    (500.0, "401 - 500"),
    (600.0, "501 - 600"),
    (700.0, "601 - 700"),
    (800.0, "701 - 800"),
    (900.0, "801 - 900"),
    (f64::INFINITY, "901 - above"),
];

/// The number of records whose price falls in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// The bucket label, e.g. "301 - 400".
    pub range: String,
    /// The number of records in the bucket.
    pub count: u64,
}

/// The data behind the price range bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartData {
    /// The month the histogram was computed for.
    pub month: String,
    /// The ten price buckets in ascending order.
    pub price_ranges: Vec<PriceRange>,
}

/// Count the records in each of the ten fixed price buckets.
///
/// A price lands in the first bucket whose upper bound it does not exceed, so
/// 100.5 is counted in "101 - 200". Records without a valid, non-zero price
/// are not counted.
pub fn calculate_price_ranges(records: &[TransactionRecord]) -> Vec<PriceRange> {
    let mut counts = [0u64; PRICE_BUCKETS.len()];

    for price in records.iter().filter_map(TransactionRecord::price_amount) {
        if let Some(bucket) = PRICE_BUCKETS
            .iter()
            .position(|(upper_bound, _)| price <= *upper_bound)
        {
            counts[bucket] += 1;
        }
    }

    PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((_, label), count)| PriceRange {
            range: (*label).to_owned(),
            count,
        })
        .collect()
}

/// Fetch the dataset and build the price histogram for `month`.
///
/// # Errors
/// Returns an error if the dataset cannot be fetched.
pub(crate) async fn bar_chart_for_month(
    dataset: &DatasetSource,
    month: &str,
) -> Result<BarChartData, Error> {
    let records = filter_by_month(dataset.fetch().await?, month);

    Ok(BarChartData {
        month: month.to_owned(),
        price_ranges: calculate_price_ranges(&records),
    })
}

/// Get the number of items sold in each price range for a month.
pub async fn get_bar_chart(
    State(dataset): State<DatasetSource>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = match query.required_month() {
        Ok(month) => bar_chart_for_month(&dataset, month).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(bar_chart) => Json(bar_chart).into_response(),
        Err(error) => error.into_json_response(BAR_CHART_ERROR_MESSAGE),
    }
}
