use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{resolve_month, resolve_now, resolve_week_start};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashboardData;
use crate::dates::format_month;
use crate::engine::charts::{RECENT_SALES_LIMIT, recent_sales};
use crate::engine::{Period, build_profit_report, build_sales_report, period_window};
use crate::records::{purchases, sales, settings};
use crate::store::Store;

pub const DEFAULT_TAB: &str = "overview";

#[derive(Debug, Default)]
pub struct DashboardOptions<'a> {
    pub tab: Option<String>,
    pub month: Option<String>,
    pub now: Option<String>,
    pub week_start: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn run_with_options(options: DashboardOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let tab = options.tab.unwrap_or_else(|| DEFAULT_TAB.to_string());
    let period = Period::from_tab(tab.trim())?;
    let now = resolve_now(options.now.as_deref(), "dashboard")?;
    let reference_month = resolve_month(options.month.as_deref(), now, "dashboard")?;
    let week_start = resolve_week_start(options.week_start.as_deref())?;

    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let all_sales = sales::list(&connection, store.db_path())?;
    let all_purchases = purchases::list(&connection, store.db_path())?;
    let targets = settings::load_sales_targets(&connection, store.db_path())?;

    let sales_report = if all_sales.is_empty() {
        None
    } else {
        Some(build_sales_report(
            &all_sales,
            reference_month,
            period,
            &targets,
            now,
            week_start,
        ))
    };
    let profit = if all_sales.is_empty() || all_purchases.is_empty() {
        None
    } else {
        Some(build_profit_report(
            &all_sales,
            &all_purchases,
            reference_month,
            period,
            now,
            week_start,
        ))
    };
    let recent = recent_sales(&all_sales, RECENT_SALES_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    let data = DashboardData {
        tab: tab.trim().to_string(),
        period,
        reference_month: format_month(reference_month),
        now,
        week_start,
        window: period_window(period, reference_month, now, week_start),
        sales: sales_report,
        profit,
        recent_sales: recent,
    };

    success("dashboard", data)
}
