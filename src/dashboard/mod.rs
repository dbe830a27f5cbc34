//! Dashboard module
//!
//! Provides an overview page showing the transactions, sales statistics and
//! charts for one month.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
