//! Free text search over titles, descriptions and prices.

use std::borrow::Cow;

use crate::record::TransactionRecord;

/// Keep the records whose title, description or price contains `search`.
///
/// Titles and descriptions are matched case-insensitively. Prices are matched
/// against their text form, so "99" finds a price of 199. An empty `search`
/// keeps every record.
pub fn search_transactions(
    records: Vec<TransactionRecord>,
    search: &str,
) -> Vec<TransactionRecord> {
    if search.is_empty() {
        return records;
    }

    let needle = search.to_lowercase();

    records
        .into_iter()
        .filter(|record| matches_search(record, search, &needle))
        .collect()
}

fn matches_search(record: &TransactionRecord, search: &str, lowercase_search: &str) -> bool {
    let contains = |field: Option<Cow<'_, str>>| {
        field
            .unwrap_or_default()
            .to_lowercase()
            .contains(lowercase_search)
    };

    contains(record.title_text())
        || contains(record.description_text())
        || record.price_text().contains(search)
}
