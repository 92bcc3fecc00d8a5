use std::path::Path;

use chrono::Datelike;

use crate::commands::common::{resolve_list_month, resolve_month, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryChartData, ComparisonChartData, DailyChartData};
use crate::dates::format_month;
use crate::engine::charts::{ComparisonView, category_breakdown, daily_series, year_over_year};
use crate::engine::total_amount;
use crate::records::sales;
use crate::store::Store;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Daily,
    Categories,
    Comparison,
}

impl ChartKind {
    fn parse(value: &str) -> ClientResult<Self> {
        match value.trim() {
            "daily" => Ok(Self::Daily),
            "categories" => Ok(Self::Categories),
            "comparison" => Ok(Self::Comparison),
            other => Err(ClientError::invalid_argument_for_command(
                &format!("Unknown chart `{other}`. Use daily, categories, or comparison."),
                Some("chart"),
            )),
        }
    }
}

#[derive(Debug, Default)]
pub struct ChartOptions<'a> {
    pub kind: String,
    pub month: Option<String>,
    /// Categories only: every sale instead of one month.
    pub all: bool,
    pub now: Option<String>,
    pub view: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn run_with_options(options: ChartOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let kind = ChartKind::parse(&options.kind)?;
    let now = resolve_now(options.now.as_deref(), "chart")?;
    let reference_month = resolve_month(options.month.as_deref(), now, "chart")?;

    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;

    match kind {
        ChartKind::Daily => {
            let month_sales = sales::list_for_month(&connection, store.db_path(), reference_month)?;
            success(
                "chart daily",
                DailyChartData {
                    reference_month: format_month(reference_month),
                    total_amount: total_amount(&month_sales),
                    points: daily_series(&month_sales, reference_month),
                },
            )
        }
        ChartKind::Categories => {
            let scope = resolve_list_month(
                options.month.as_deref(),
                options.all,
                options.now.as_deref(),
                "chart",
            )?;
            let scoped_sales = match scope {
                Some(month) => sales::list_for_month(&connection, store.db_path(), month)?,
                None => sales::list(&connection, store.db_path())?,
            };
            success(
                "chart categories",
                CategoryChartData {
                    reference_month: scope.map(format_month),
                    total_amount: total_amount(&scoped_sales),
                    shares: category_breakdown(&scoped_sales),
                },
            )
        }
        ChartKind::Comparison => {
            let view = parse_view(options.view.as_deref())?;
            let all_sales = sales::list(&connection, store.db_path())?;
            let today = now.date();
            success(
                "chart comparison",
                ComparisonChartData {
                    view: match view {
                        ComparisonView::Monthly => "monthly".to_string(),
                        ComparisonView::Yearly => "yearly".to_string(),
                    },
                    current_year: today.year(),
                    previous_year: today.year() - 1,
                    months: year_over_year(&all_sales, today, view),
                },
            )
        }
    }
}

fn parse_view(raw: Option<&str>) -> ClientResult<ComparisonView> {
    match raw.map(str::trim) {
        None | Some("monthly") => Ok(ComparisonView::Monthly),
        Some("yearly") => Ok(ComparisonView::Yearly),
        Some(other) => Err(ClientError::invalid_argument_for_command(
            &format!("Unknown comparison view `{other}`. Use monthly or yearly."),
            Some("chart"),
        )),
    }
}
