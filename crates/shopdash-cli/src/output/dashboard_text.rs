use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, array_field, format_rate, format_yen, i64_field, key_value_rows, render_table,
    short_timestamp, signed_rate, str_field, yen_field,
};

const NO_TOP_PRODUCT: &str = "none";
const UNKNOWN_SALESPERSON: &str = "-";

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let period = str_field(data, "period");
    let mut lines = vec![format!(
        "Dashboard: {} ({}, reference month {})",
        str_field(data, "tab"),
        period,
        str_field(data, "reference_month"),
    )];
    lines.push(format!("  Window:  {}", window_text(data.get("window"))));
    lines.push(String::new());

    match data.get("sales").filter(|value| !value.is_null()) {
        Some(report) => lines.extend(sales_block(report)),
        None => lines.push("No sales recorded yet. Add one with `shopdash sale add`.".to_string()),
    }
    lines.push(String::new());

    lines.push("Profit".to_string());
    match data.get("profit").filter(|value| !value.is_null()) {
        Some(profit) => lines.extend(key_value_rows(
            &[
                ("Sales:", yen_field(profit, "total_sales")),
                ("Purchases:", yen_field(profit, "total_purchases")),
                ("Profit:", yen_field(profit, "profit")),
                (
                    "Profit rate:",
                    format_rate(profit.get("profit_rate").unwrap_or(&Value::Null)),
                ),
            ],
            2,
        )),
        None => lines.push("  Needs both sales and purchases.".to_string()),
    }

    let recent = array_field(data, "recent_sales");
    if !recent.is_empty() {
        lines.push(String::new());
        lines.push("Recent sales".to_string());
        lines.extend(recent_sales_table(recent));
    }

    Ok(lines.join("\n"))
}

fn window_text(window: Option<&Value>) -> String {
    match window.filter(|value| !value.is_null()) {
        Some(value) => {
            let start = str_field(value, "start");
            let end = str_field(value, "end");
            if start == end {
                start.to_string()
            } else {
                format!("{start} to {end}")
            }
        }
        None => "empty (the current week is outside the reference month)".to_string(),
    }
}

fn sales_block(report: &Value) -> Vec<String> {
    let summary = report.get("summary").unwrap_or(&Value::Null);
    let null = Value::Null;
    let top = match report.get("top_product").filter(|value| !value.is_null()) {
        Some(product) => format!(
            "{} ({})",
            str_field(product, "name"),
            yen_field(product, "amount")
        ),
        None => NO_TOP_PRODUCT.to_string(),
    };
    let average = summary
        .get("average_purchase")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .round() as i64;
    let comparison_label = format!("{}:", str_field(summary, "comparison_label"));

    let mut lines = vec![capitalize(str_field(summary, "period_label"))];
    lines.extend(key_value_rows(
        &[
            ("Total:", yen_field(summary, "total_amount")),
            ("Sales:", i64_field(summary, "sales_count").to_string()),
            ("Average:", format_yen(average)),
            ("Target:", yen_field(summary, "target_amount")),
            (
                "Achievement:",
                format_rate(summary.get("achievement_rate").unwrap_or(&null)),
            ),
            (
                comparison_label.as_str(),
                signed_rate(summary.get("comparison_rate").unwrap_or(&null)),
            ),
            ("Top product:", top),
        ],
        2,
    ));
    lines
}

fn recent_sales_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Product",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Salesperson",
            align: Align::Left,
        },
    ];
    let cells = rows
        .iter()
        .map(|sale| {
            vec![
                short_timestamp(str_field(sale, "date")),
                str_field(sale, "product_name").to_string(),
                yen_field(sale, "amount"),
                sale.get("salesperson_name")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_SALESPERSON)
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table(&columns, &cells)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
