//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Redirect, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    category::get_pie_chart,
    combined::get_combined_data,
    dashboard::get_dashboard_page,
    endpoints, json_message,
    price_range::get_bar_chart,
    product_transaction::get_product_transactions,
    statistics::get_statistics,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::PRODUCT_TRANSACTIONS,
            get(get_product_transactions),
        )
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED_DATA, get(get_combined_data));

    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page));

    api_routes
        .merge(view_routes)
        .fallback(get_404_not_found)
        // The API is consumed by browser frontends served from other origins.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_404_not_found() -> Response {
    json_message(StatusCode::NOT_FOUND, "Not found")
}


#[cfg(test)]
mod api_route_tests {
    use std::path::PathBuf;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router, dataset::DatasetSource, endpoints,
        pagination::PaginationConfig, test_utils::sample_dataset,
    };

    fn get_test_server() -> TestServer {
        get_test_server_with(sample_dataset())
    }

    fn get_test_server_with(dataset: DatasetSource) -> TestServer {
        let state = AppState::new(dataset, PaginationConfig::default());

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn broken_dataset() -> DatasetSource {
        DatasetSource::File(PathBuf::from("/this/file/does/not/exist.json"))
    }

    fn ids(body: &Value) -> Vec<i64> {
        body["transactions"]
            .as_array()
            .expect("transactions is not an array")
            .iter()
            .map(|transaction| transaction["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn lists_transactions_for_month_with_defaults() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PRODUCT_TRANSACTIONS)
            .add_query_param("month", "03")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(ids(&body), [1, 2, 3, 4]);
        assert_eq!(body["totalTransactions"], json!(4));
        assert_eq!(body["totalPages"], json!(1));
        assert_eq!(body["currentPage"], json!(1));
    }

    #[tokio::test]
    async fn listing_echoes_upstream_fields() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PRODUCT_TRANSACTIONS)
            .add_query_param("search", "bracelet")
            .await;

        let body = response.json::<Value>();
        assert_eq!(
            body["transactions"][0],
            json!({
                "id": 3,
                "title": "Solid Gold Bracelet",
                "price": 1999,
                "description": "Dragon station chain",
                "category": "jewelery",
                "image": "https://example.com/3.jpg",
                "sold": true,
                "dateOfSale": "2022-03-11T20:29:54+05:30"
            })
        );
    }

    #[tokio::test]
    async fn listing_searches_and_pages() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PRODUCT_TRANSACTIONS)
            .add_query_param("search", "99")
            .add_query_param("page", "2")
            .add_query_param("perPage", "1")
            .await;

        let body = response.json::<Value>();
        assert_eq!(ids(&body), [5]);
        assert_eq!(body["totalTransactions"], json!(2));
        assert_eq!(body["totalPages"], json!(2));
        assert_eq!(body["currentPage"], json!(2));
    }

    #[tokio::test]
    async fn listing_tolerates_non_numeric_page() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PRODUCT_TRANSACTIONS)
            .add_query_param("page", "abc")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["transactions"], json!([]));
        assert_eq!(body["currentPage"], Value::Null);
    }

    #[tokio::test]
    async fn statistics_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "03")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let total_sale_amount = body["totalSaleAmount"].as_f64().unwrap();
        assert!((total_sale_amount - 2373.45).abs() < 1e-9);
        assert_eq!(body["totalSoldItems"], json!(2));
        assert_eq!(body["totalNotSoldItems"], json!(2));
    }

    #[tokio::test]
    async fn bar_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "03")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["month"], json!("03"));
        let counts: Vec<u64> = body["priceRanges"]
            .as_array()
            .unwrap()
            .iter()
            .map(|range| range["count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, [1, 0, 0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[tokio::test]
    async fn pie_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PIE_CHART)
            .add_query_param("month", "03")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!([
                {"category": "men's clothing", "count": 2},
                {"category": "jewelery", "count": 1}
            ])
        );
    }

    #[tokio::test]
    async fn month_is_required_by_single_month_views() {
        let server = get_test_server();

        for endpoint in [endpoints::STATISTICS, endpoints::BAR_CHART, endpoints::PIE_CHART] {
            let response = server.get(endpoint).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<Value>(),
                json!({"message": "Month parameter is required"}),
                "{endpoint}"
            );

            let response = server.get(endpoint).add_query_param("month", "").await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn combined_data_matches_individual_views() {
        let server = get_test_server();

        let combined = server
            .get(endpoints::COMBINED_DATA)
            .add_query_param("month", "03")
            .await
            .json::<Value>();
        let statistics = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "03")
            .await
            .json::<Value>();
        let bar_chart = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "03")
            .await
            .json::<Value>();

        assert_eq!(combined["statistics"], statistics);
        assert_eq!(combined["barChartData"], bar_chart);
        assert_eq!(
            combined["pieChartData"],
            json!({
                "categories": [
                    {"name": "men's clothing", "count": 2},
                    {"name": "jewelery", "count": 1}
                ]
            })
        );
    }

    #[tokio::test]
    async fn combined_data_without_month_is_a_server_error() {
        let server = get_test_server();

        let response = server.get(endpoints::COMBINED_DATA).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>(), json!({"message": "Server error"}));
    }

    #[tokio::test]
    async fn dataset_failures_use_endpoint_messages() {
        let server = get_test_server_with(broken_dataset());
        let cases = [
            (endpoints::PRODUCT_TRANSACTIONS, "Error fetching data from S3"),
            (endpoints::STATISTICS, "Error fetching data for statistics"),
            (endpoints::BAR_CHART, "Error fetching bar chart data"),
            (endpoints::PIE_CHART, "Error fetching pie chart data"),
            (endpoints::COMBINED_DATA, "Server error"),
        ];

        for (endpoint, message) in cases {
            let response = server.get(endpoint).add_query_param("month", "03").await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response.json::<Value>(), json!({"message": message}));
        }
    }

    #[tokio::test]
    async fn api_allows_cross_origin_requests() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "03")
            .add_header("origin", "http://localhost:5173")
            .await;

        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({"message": "Not found"}));
    }
}
