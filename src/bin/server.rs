use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, DEFAULT_DATASET_URL, DatasetSource, PaginationConfig, build_router,
    graceful_shutdown, logging_middleware,
};

/// The web server for the sales dashboard and its JSON API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The URL of the JSON array of product transactions.
    #[arg(long, env = "DATASET_URL", default_value = DEFAULT_DATASET_URL)]
    dataset_url: String,

    /// Read the transactions from this JSON file instead of the dataset URL.
    #[arg(long)]
    dataset_file: Option<PathBuf>,

    /// The number of transactions per page when a request does not specify one.
    #[arg(long, default_value_t = 10)]
    page_size: u64,

    /// File path to write the debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_file);

    let dataset = match args.dataset_file {
        Some(path) => DatasetSource::File(path),
        None => DatasetSource::remote(args.dataset_url),
    };
    tracing::info!("Serving transactions from {}", dataset.describe());

    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..PaginationConfig::default()
    };
    let app_state = AppState::new(dataset, pagination_config);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on http://{}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        std::process::exit(1);
    }
}

fn setup_logging(log_file_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    let stdout_filter = EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(stdout_filter))
        .with(debug_log.with_filter(filter::LevelFilter::DEBUG))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers
        // log their own errors, so disable that.
        .on_failure(());

    router.layer(tracing_layer)
}
