use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::engine::calendar::WeekStart;
use crate::engine::filter::{filter_by_window, period_window};
use crate::engine::period::Period;
use crate::engine::{DatedAmount, total_amount};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub total_sales: i64,
    pub total_purchases: i64,
    pub profit: i64,
    pub profit_rate: f64,
}

/// Profit over sales and purchases already filtered to the same window.
/// The rate is 0 when there are no sales, even if purchases produced a loss.
pub fn summarize_profit<S: DatedAmount, P: DatedAmount>(
    sales: &[S],
    purchases: &[P],
) -> ProfitSummary {
    let total_sales = total_amount(sales);
    let total_purchases = total_amount(purchases);
    let profit = total_sales - total_purchases;
    let profit_rate = if total_sales > 0 {
        (profit as f64 / total_sales as f64) * 100.0
    } else {
        0.0
    };

    ProfitSummary {
        total_sales,
        total_purchases,
        profit,
        profit_rate,
    }
}

pub fn build_profit_report<S: DatedAmount, P: DatedAmount>(
    sales: &[S],
    purchases: &[P],
    reference_month: NaiveDate,
    period: Period,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> ProfitSummary {
    let window = period_window(period, reference_month, now, week_start);
    summarize_profit(
        &filter_by_window(sales, window),
        &filter_by_window(purchases, window),
    )
}
