//! The category distribution shown in the pie chart.

use std::{borrow::Cow, collections::HashMap};

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

const PIE_CHART_ERROR_MESSAGE: &str = "Error fetching pie chart data";

/// The number of records in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// The number of records with this category.
    pub count: u64,
}

/// Count the records in each category, in the order categories first appear.
///
/// Records without a category, or with an empty one, are skipped.
pub fn calculate_category_counts(records: &[TransactionRecord]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut positions: HashMap<Cow<'_, str>, usize> = HashMap::new();

    for category in records.iter().filter_map(TransactionRecord::category_name) {
        match positions.get(category.as_ref()) {
            Some(&position) => counts[position].count += 1,
            None => {
                counts.push(CategoryCount {
                    category: category.to_string(),
                    count: 1,
                });
                positions.insert(category, counts.len() - 1);
            }
        }
    }

    counts
}

/// Fetch the dataset and count the categories sold in `month`.
///
/// # Errors
/// Returns an error if the dataset cannot be fetched.
pub(crate) async fn pie_chart_for_month(
    dataset: &DatasetSource,
    month: &str,
) -> Result<Vec<CategoryCount>, Error> {
    let records = filter_by_month(dataset.fetch().await?, month);

    Ok(calculate_category_counts(&records))
}

/// Get the number of items sold in each category for a month.
pub async fn get_pie_chart(
    State(dataset): State<DatasetSource>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = match query.required_month() {
        Ok(month) => pie_chart_for_month(&dataset, month).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response(PIE_CHART_ERROR_MESSAGE),
    }
}
