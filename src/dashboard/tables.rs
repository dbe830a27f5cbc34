//! Table views for dashboard data display.
//!
//! Provides the transactions table, the monthly statistics panel and the page
//! links below the table.

use maud::{Markup, html};
use time::Date;

use crate::{
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    pagination::PaginationIndicator,
    record::{TransactionRecord, format_number},
    statistics::Statistics,
};

const TABLE_HEADER_CELL_STYLE: &str = "px-6 py-3";
const TABLE_IMAGE_STYLE: &str = "w-12 h-12 object-contain";
const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded-sm text-blue-600 hover:underline";
const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 rounded-sm font-bold text-black dark:text-white";

/// Format a sale date the way the dashboard shows it, e.g. "27/03/2022".
fn format_sale_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

fn id_text(record: &TransactionRecord) -> String {
    match &record.id {
        Some(serde_json::Value::String(id)) => id.clone(),
        Some(serde_json::Value::Number(id)) => id
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| id.to_string()),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(id) => id.to_string(),
    }
}

fn sale_status(record: &TransactionRecord) -> &'static str {
    if record.sold_quantity().is_some() {
        "Sold"
    } else {
        "Not Sold"
    }
}

/// Renders the table of transactions on the current page.
pub(super) fn transactions_table(transactions: &[TransactionRecord]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table
                id="transactions-table"
                class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Id" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Sale" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Date of Sale" }
                        th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Image" }
                    }
                }

                tbody
                {
                    @for record in transactions {
                        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (id_text(record)) }
                            td class=(TABLE_CELL_STYLE) { (record.title_text().unwrap_or_default()) }
                            td class=(TABLE_CELL_STYLE) { (record.description_text().unwrap_or_default()) }
                            td class=(TABLE_CELL_STYLE) { (record.price_text()) }
                            td class=(TABLE_CELL_STYLE) { (record.category_name().unwrap_or_default()) }
                            td class=(TABLE_CELL_STYLE) { (sale_status(record)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if let Some(date) = record.sale_date() {
                                    time datetime=(date.to_string()) { (format_sale_date(date)) }
                                }
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if let Some(image) = record.image_url() {
                                    img
                                        src=(image.as_ref())
                                        alt=(record.title_text().as_deref().unwrap_or("Product image"))
                                        class=(TABLE_IMAGE_STYLE);
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="8"
                                data-empty-state="true"
                                class="px-6 py-4 text-center"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the sales totals for the selected month.
pub(super) fn statistics_panel(month_name: &str, statistics: &Statistics) -> Markup {
    html! {
        section id="statistics" class="w-full mb-4"
        {
            h3 class="text-xl font-semibold mb-4" { "Statistics - " (month_name) }

            div class="overflow-x-auto rounded-lg shadow max-w-md"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    tbody
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class=(TABLE_CELL_STYLE) { "Total sale" }
                            td class={(TABLE_CELL_STYLE) " text-right"} data-statistic="total-sale-amount"
                            {
                                (format_currency(statistics.total_sale_amount))
                            }
                        }
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class=(TABLE_CELL_STYLE) { "Total sold items" }
                            td class={(TABLE_CELL_STYLE) " text-right"} data-statistic="total-sold-items"
                            {
                                (format_number(statistics.total_sold_items))
                            }
                        }
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class=(TABLE_CELL_STYLE) { "Total not sold items" }
                            td class={(TABLE_CELL_STYLE) " text-right"} data-statistic="total-not-sold-items"
                            {
                                (statistics.total_not_sold_items)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the page links below the transactions table.
///
/// `page_url` builds the link for a page number.
pub(super) fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    html! {
        nav class="pagination flex justify-center my-4"
        {
            ul class="pagination flex items-center gap-x-2 p-0 m-0"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) role="button" class=(PAGE_LINK_STYLE) { "Previous" }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-2" { "..." }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) role="button" class=(PAGE_LINK_STYLE) { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
