//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The HTML dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The paginated, searchable list of transactions.
pub const PRODUCT_TRANSACTIONS: &str = "/api/product-transaction";
/// The sales statistics for a month.
pub const STATISTICS: &str = "/api/statistics";
/// The price range histogram for a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The category breakdown for a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The statistics, histogram and category breakdown for a month in one response.
pub const COMBINED_DATA: &str = "/api/combined-data";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);

        assert_endpoint_is_valid_uri(endpoints::PRODUCT_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_DATA);
    }
}
