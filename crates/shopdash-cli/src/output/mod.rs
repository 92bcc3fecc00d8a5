mod chart_text;
mod dashboard_text;
mod error_text;
mod format;
mod json;
mod mode;
mod records_text;
mod transfer_text;

use std::io;

use shopdash_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_cli};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let command = success.command.as_str();
    let data = &success.data;
    match command {
        "dashboard" => dashboard_text::render_dashboard(data),
        "chart daily" => chart_text::render_daily(data),
        "chart categories" => chart_text::render_categories(data),
        "chart comparison" => chart_text::render_comparison(data),
        "sale add" => records_text::render_sale(command, data),
        "sale list" => records_text::render_sale_list(data),
        "purchase add" => records_text::render_purchase(command, data),
        "purchase list" => records_text::render_purchase_list(data),
        "product add" | "product update" => records_text::render_product(command, data),
        "product list" => records_text::render_product_list(data),
        "salesperson add" | "salesperson update" => {
            records_text::render_salesperson(command, data)
        }
        "salesperson list" => records_text::render_salesperson_list(data),
        "sale remove" | "purchase remove" | "product remove" | "salesperson remove" => {
            records_text::render_removed(data)
        }
        "target show" | "target set" => records_text::render_targets(command, data),
        "export" => transfer_text::render_export(data),
        "import" => transfer_text::render_import(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
