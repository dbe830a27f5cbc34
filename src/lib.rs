//! Sales Dashboard is a small web app for exploring a dataset of product
//! transactions.
//!
//! This library provides a JSON API that derives monthly views (a paginated
//! listing, sales statistics, a price histogram and a category breakdown) from
//! an upstream JSON dataset, and an HTML dashboard built on the same views.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod category;
mod combined;
mod dashboard;
mod dataset;
mod endpoints;
mod html;
mod logging;
mod month;
mod pagination;
mod price_range;
mod product_transaction;
mod record;
mod routing;
mod search;
mod statistics;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dataset::{DEFAULT_DATASET_URL, DatasetSource};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use record::TransactionRecord;
pub use routing::build_router;

/// The message sent to the client when a required month is not given.
pub(crate) const MISSING_MONTH_MESSAGE: &str = "Month parameter is required";

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An endpoint that reports on a single month was called without one.
    #[error("the month parameter is missing or empty")]
    MissingMonth,

    /// The upstream dataset could not be requested, or the upstream server
    /// responded with an error status.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not fetch the dataset: {0}")]
    DatasetRequest(String),

    /// The upstream dataset is not a JSON array of transaction records.
    #[error("could not decode the dataset: {0}")]
    DatasetDecode(String),

    /// The local dataset file could not be read.
    #[error("could not read the dataset file: {0}")]
    DatasetRead(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::DatasetDecode(value.to_string())
        } else {
            Error::DatasetRequest(value.to_string())
        }
    }
}

impl Error {
    /// Convert the error into a JSON `{"message": ...}` response.
    ///
    /// A missing month is a client error with a fixed message. Every other
    /// error is logged and reported as an internal server error with
    /// `failure_message`, so that no internal details reach the client.
    pub(crate) fn into_json_response(self, failure_message: &str) -> Response {
        match self {
            Error::MissingMonth => json_message(StatusCode::BAD_REQUEST, MISSING_MONTH_MESSAGE),
            error => {
                tracing::error!("{failure_message}: {error}");
                json_message(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
            }
        }
    }
}

/// The body of every error response from the JSON API.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorMessage<'a> {
    message: &'a str,
}

/// Create a JSON response with `status` and a body of `{"message": message}`.
pub(crate) fn json_message(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorMessage { message })).into_response()
}
