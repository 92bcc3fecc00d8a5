use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::engine::calendar::{WeekStart, add_months_clamped, month_bounds, shift_days, year_bounds};
use crate::engine::filter::{PeriodWindow, filter_by_window, period_window};
use crate::engine::labels::labels_for;
use crate::engine::period::{Period, SalesTargets};
use crate::engine::top_product::{TopProduct, top_selling_product};
use crate::engine::{DatedAmount, ProductSale, total_amount};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub period: Period,
    pub total_amount: i64,
    pub sales_count: i64,
    pub average_purchase: f64,
    pub target_amount: i64,
    /// Not guarded against a zero target: yields infinity (or NaN for 0/0).
    pub achievement_rate: f64,
    pub period_label: &'static str,
    pub comparison_label: &'static str,
    pub comparison_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub reference_month: NaiveDate,
    pub window: Option<PeriodWindow>,
    pub summary: SalesSummary,
    pub top_product: Option<TopProduct>,
}

/// Aggregates sales that were already filtered to `period`'s window.
pub fn summarize_sales<T: DatedAmount>(
    sales: &[T],
    period: Period,
    targets: &SalesTargets,
) -> SalesSummary {
    let total_amount = total_amount(sales);
    let sales_count = sales.len() as i64;
    let average_purchase = if sales_count > 0 {
        total_amount as f64 / sales_count as f64
    } else {
        0.0
    };
    let target_amount = targets.for_period(period);
    let achievement_rate = (total_amount as f64 / target_amount as f64) * 100.0;
    let labels = labels_for(period);

    SalesSummary {
        period,
        total_amount,
        sales_count,
        average_purchase,
        target_amount,
        achievement_rate,
        period_label: labels.period,
        comparison_label: labels.comparison,
        comparison_rate: None,
    }
}

/// The window of the same length immediately before `window`.
pub fn previous_window(window: PeriodWindow, period: Period) -> PeriodWindow {
    match period {
        Period::Daily => PeriodWindow {
            start: shift_days(window.start, -1),
            end: shift_days(window.end, -1),
        },
        Period::Weekly => PeriodWindow {
            start: shift_days(window.start, -7),
            end: shift_days(window.end, -7),
        },
        Period::Monthly => {
            let (start, end) = month_bounds(add_months_clamped(window.start, -1));
            PeriodWindow { start, end }
        }
        Period::Yearly => {
            let anchor = NaiveDate::from_ymd_opt(window.start.year() - 1, 1, 1)
                .unwrap_or(window.start);
            let (start, end) = year_bounds(anchor);
            PeriodWindow { start, end }
        }
    }
}

/// Percentage change of the window's total against the preceding window.
/// `None` when the preceding window has no sales.
pub fn compare_with_previous<T: DatedAmount>(
    sales: &[T],
    window: PeriodWindow,
    period: Period,
) -> Option<f64> {
    let current = total_amount(&filter_by_window(sales, Some(window)));
    let previous = total_amount(&filter_by_window(
        sales,
        Some(previous_window(window, period)),
    ));
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64 * 100.0)
}

pub fn build_sales_report<T: ProductSale>(
    sales: &[T],
    reference_month: NaiveDate,
    period: Period,
    targets: &SalesTargets,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> SalesReport {
    let window = period_window(period, reference_month, now, week_start);
    let filtered = filter_by_window(sales, window);
    let mut summary = summarize_sales(&filtered, period, targets);
    summary.comparison_rate = window.and_then(|value| compare_with_previous(sales, value, period));

    SalesReport {
        reference_month,
        window,
        summary,
        top_product: top_selling_product(&filtered),
    }
}
