//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for one month:
//! - **Price Range Chart**: Bar chart of how many transactions fall in each price bucket
//! - **Category Chart**: Pie chart of how many transactions fall in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{category::CategoryCount, html::HeadElement, price_range::PriceRange};

/// Where the ECharts library is loaded from.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Make chart options safe to embed in an inline `<script>` element.
///
/// `<` only appears inside JSON strings, where `\u003c` decodes to the same
/// character, so upstream text cannot close the script element.
fn escape_script_json(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances that resize with the
/// window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id,
                escape_script_json(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn price_range_chart(month_name: &str, price_ranges: &[PriceRange]) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = price_ranges
        .iter()
        .map(|price_range| (price_range.range.clone(), price_range.count as f64))
        .unzip();

    Chart::new()
        .title(
            Title::new()
                .text("Price Range")
                .subtext(format!("Transactions in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name("Items").data(values))
}

pub(super) fn category_chart(month_name: &str, categories: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (category.count as f64, category.category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Categories")
                .subtext(format!("Transactions in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("left").top("15%"))
        .series(
            Pie::new()
                .name("Items")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
