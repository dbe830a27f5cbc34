//! Sales statistics for a single month.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    Error,
    dataset::DatasetSource,
    month::{MonthQuery, filter_by_month},
    record::TransactionRecord,
};

/// The message sent to the client when the statistics cannot be computed.
const STATISTICS_ERROR_MESSAGE: &str = "Error fetching data for statistics";

/// The sales totals for one month.
///
/// Note that the two item counts measure different things:
/// `total_sold_items` sums the units sold, while `total_not_sold_items` counts
/// the records that were not sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of all valid, non-zero prices.
    #[serde(serialize_with = "serialize_number")]
    pub total_sale_amount: f64,
    /// The sum of the sold quantities.
    #[serde(serialize_with = "serialize_number")]
    pub total_sold_items: f64,
    /// The number of records that were not sold.
    pub total_not_sold_items: u64,
}

/// The largest magnitude below which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Serialize whole numbers as JSON integers, e.g. `2` instead of `2.0`.
fn serialize_number<S>(number: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*number as i64)
    } else {
        serializer.serialize_f64(*number)
    }
}

/// Reduce `records` to their sales totals.
///
/// `records` should already be filtered to a single month.
pub fn calculate_statistics(records: &[TransactionRecord]) -> Statistics {
    let mut statistics = Statistics::default();

    for record in records {
        if let Some(price) = record.price_amount() {
            statistics.total_sale_amount += price;
        }

        match record.sold_quantity() {
            Some(quantity) => statistics.total_sold_items += quantity,
            None => statistics.total_not_sold_items += 1,
        }
    }

    statistics
}

/// Fetch the dataset and compute the statistics for `month`.
///
/// # Errors
/// Returns an error if the dataset cannot be fetched.
pub(crate) async fn statistics_for_month(
    dataset: &DatasetSource,
    month: &str,
) -> Result<Statistics, Error> {
    let records = filter_by_month(dataset.fetch().await?, month);

    Ok(calculate_statistics(&records))
}

/// Get the total sale amount and sold/not sold item counts for a month.
pub async fn get_statistics(
    State(dataset): State<DatasetSource>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = match query.required_month() {
        Ok(month) => statistics_for_month(&dataset, month).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(statistics) => Json(statistics).into_response(),
        Err(error) => error.into_json_response(STATISTICS_ERROR_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::record::TransactionRecord;

    use super::{Statistics, calculate_statistics};

    fn record(price: Option<Value>, sold: Option<Value>) -> TransactionRecord {
        TransactionRecord {
            price,
            sold,
            ..Default::default()
        }
    }

    #[test]
    fn sums_prices_and_sold_quantities() {
        let records = vec![
            record(Some(json!(100)), Some(json!(2))),
            record(Some(json!("bad")), Some(json!(0))),
            record(Some(json!(50)), None),
        ];

        let got = calculate_statistics(&records);

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 150.0,
                total_sold_items: 2.0,
                total_not_sold_items: 2,
            }
        );
    }

    #[test]
    fn boolean_sold_flag_counts_one_unit() {
        let records = vec![
            record(Some(json!(10.5)), Some(json!(true))),
            record(Some(json!(20)), Some(json!(true))),
            record(Some(json!(30)), Some(json!(false))),
        ];

        let got = calculate_statistics(&records);

        assert_eq!(got.total_sale_amount, 60.5);
        assert_eq!(got.total_sold_items, 2.0);
        assert_eq!(got.total_not_sold_items, 1);
    }

    #[test]
    fn sold_items_sum_quantities_not_records() {
        let records = vec![
            record(None, Some(json!(5))),
            record(None, Some(json!("3"))),
        ];

        let got = calculate_statistics(&records);

        assert_eq!(got.total_sold_items, 8.0);
        assert_eq!(got.total_not_sold_items, 0);
    }

    #[test]
    fn empty_input_gives_zeroes() {
        assert_eq!(calculate_statistics(&[]), Statistics::default());
    }

    #[test]
    fn whole_totals_serialize_as_integers() {
        let statistics = Statistics {
            total_sale_amount: 0.0,
            total_sold_items: 2.0,
            total_not_sold_items: 0,
        };

        assert_eq!(
            serde_json::to_string(&statistics).unwrap(),
            r#"{"totalSaleAmount":0,"totalSoldItems":2,"totalNotSoldItems":0}"#
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let statistics = Statistics {
            total_sale_amount: 1.5,
            total_sold_items: 2.0,
            total_not_sold_items: 3,
        };

        assert_eq!(
            serde_json::to_value(statistics).unwrap(),
            json!({
                "totalSaleAmount": 1.5,
                "totalSoldItems": 2,
                "totalNotSoldItems": 3
            })
        );
    }
}
