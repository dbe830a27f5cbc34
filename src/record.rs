//! The transaction records served by the upstream dataset.
//!
//! The upstream JSON is loosely typed: every field may be missing, and `price`
//! and `sold` may be numbers, numeric strings, booleans or garbage. Records are
//! therefore deserialized leniently and coerced at each aggregation boundary.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::{Date, Month};

/// A single product transaction from the upstream dataset.
///
/// Every field keeps the upstream JSON value as is, including explicit nulls,
/// so that listing responses echo the upstream record unchanged. The typed
/// accessors coerce the values when they are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// The upstream identifier, usually an integer.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    /// The product title.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,
    /// The product description.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Value>,
    /// The sale price.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Value>,
    /// The product category.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Value>,
    /// The number of units sold, or a boolean sold flag.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub sold: Option<Value>,
    /// The sale date, `YYYY-MM-DD` optionally followed by a time.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_sale: Option<Value>,
    /// A URL to the product image.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Value>,
    /// Any other upstream fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionRecord {
    /// The price if it is numeric and non-zero.
    ///
    /// Zero, missing and non-numeric prices are all treated as "no price".
    pub fn price_amount(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(numeric_value)
            .filter(|price| *price != 0.0)
    }

    /// The number of units sold if the record counts as sold.
    ///
    /// A boolean `true` counts as one unit. Zero, `false`, missing and
    /// non-numeric values mean the record was not sold.
    pub fn sold_quantity(&self) -> Option<f64> {
        match self.sold.as_ref()? {
            Value::Bool(true) => Some(1.0),
            value => numeric_value(value).filter(|quantity| *quantity != 0.0),
        }
    }

    /// The price rendered as text for substring search.
    ///
    /// Falsy prices (missing, null, zero, empty string, false) render as an
    /// empty string.
    pub fn price_text(&self) -> String {
        match &self.price {
            None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(price) if price == 0.0 => String::new(),
                Some(price) => format_number(price),
                None => number.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }

    /// The title as text.
    pub fn title_text(&self) -> Option<Cow<'_, str>> {
        text_value(self.title.as_ref())
    }

    /// The description as text.
    pub fn description_text(&self) -> Option<Cow<'_, str>> {
        text_value(self.description.as_ref())
    }

    /// The image URL as text.
    pub fn image_url(&self) -> Option<Cow<'_, str>> {
        text_value(self.image.as_ref())
    }

    /// The date of sale, if it starts with a valid `YYYY-MM-DD` date.
    pub fn sale_date(&self) -> Option<Date> {
        parse_sale_date(&text_value(self.date_of_sale.as_ref())?)
    }

    /// The category if it is present and non-empty.
    pub fn category_name(&self) -> Option<Cow<'_, str>> {
        text_value(self.category.as_ref()).filter(|category| !category.is_empty())
    }
}

/// Read a text field, stringifying numbers and booleans.
///
/// `null`, arrays and objects are treated as a missing value.
fn text_value(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Interpret a loosely typed JSON value as a finite number.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// Format a number without a trailing `.0` for whole values.
pub(crate) fn format_number(number: f64) -> String {
    // f64's Display already omits the fractional part of whole numbers.
    format!("{number}")
}

/// Parse the `YYYY-MM-DD` prefix of a date string.
///
/// Anything after the day (e.g. `T20:29:54+05:30`) is ignored.
pub(crate) fn parse_sale_date(text: &str) -> Option<Date> {
    let date_part = text.split(['T', ' ']).next()?;
    let mut parts = date_part.splitn(3, '-');

    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u8>().ok()?;
    let day = parts.next()?.parse::<u8>().ok()?;
    let month = Month::try_from(month).ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

/// Deserialize a field that is present in the upstream record, keeping an
/// explicit `null` as `Some(Value::Null)`.
///
/// Missing fields fall back to `None` through `#[serde(default)]`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
