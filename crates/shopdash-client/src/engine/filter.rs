use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::engine::DatedAmount;
use crate::engine::calendar::{
    WeekStart, last_day_of_month, month_bounds, same_month, week_containing, year_bounds,
};
use crate::engine::period::Period;

/// Inclusive range of calendar days selected by a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    fn intersect(self, other: PeriodWindow) -> Option<PeriodWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(PeriodWindow { start, end })
    }
}

/// Calendar window for `period` anchored at `reference_month`.
///
/// Daily: today when the reference month is the current month, otherwise the
/// last day of the reference month. Weekly: the week containing `now`,
/// restricted to the reference month, so other months usually come out empty.
/// Monthly and yearly follow the reference month's calendar month and year.
pub fn period_window(
    period: Period,
    reference_month: NaiveDate,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> Option<PeriodWindow> {
    let today = now.date();
    match period {
        Period::Daily => {
            if same_month(reference_month, today) {
                Some(PeriodWindow::single_day(today))
            } else {
                Some(PeriodWindow::single_day(last_day_of_month(reference_month)))
            }
        }
        Period::Weekly => {
            let (week_first, week_last) = week_containing(today, week_start);
            let (month_first, month_last) = month_bounds(reference_month);
            PeriodWindow {
                start: week_first,
                end: week_last,
            }
            .intersect(PeriodWindow {
                start: month_first,
                end: month_last,
            })
        }
        Period::Monthly => {
            let (start, end) = month_bounds(reference_month);
            Some(PeriodWindow { start, end })
        }
        Period::Yearly => {
            let (start, end) = year_bounds(reference_month);
            Some(PeriodWindow { start, end })
        }
    }
}

pub fn filter_by_window<T: DatedAmount>(records: &[T], window: Option<PeriodWindow>) -> Vec<&T> {
    let Some(window) = window else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|record| window.contains(record.date().date()))
        .collect()
}

pub fn filter_by_period<T: DatedAmount>(
    records: &[T],
    reference_month: NaiveDate,
    period: Period,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> Vec<&T> {
    let window = period_window(period, reference_month, now, week_start);
    tracing::debug!(
        period = period.as_str(),
        reference_year = reference_month.year(),
        reference_month = reference_month.month(),
        ?window,
        "resolved period window"
    );
    filter_by_window(records, window)
}

#[cfg(test)]
mod tests {
    use super::{PeriodWindow, filter_by_period, period_window};
    use crate::engine::calendar::WeekStart;
    use crate::engine::period::Period;
    use crate::engine::testkit::{at, day, line};
    use crate::engine::total_amount;

    #[test]
    fn daily_in_current_month_keeps_only_today() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![
            line(at(2024, 3, 15, 9, 0), 1200),
            line(at(2024, 3, 14, 23, 59), 800),
            line(at(2024, 3, 15, 0, 0), 300),
            line(at(2024, 3, 15, 23, 59), 50),
        ];

        let filtered = filter_by_period(&sales, day(2024, 3, 1), Period::Daily, now, WeekStart::Sunday);
        assert_eq!(filtered.len(), 3);
        assert_eq!(total_amount(&filtered), 1550);
        assert!(filtered.iter().all(|sale| sale.amount != 800));
    }

    #[test]
    fn daily_in_past_month_uses_last_day_of_that_month() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![
            line(at(2023, 1, 15, 10, 0), 5000),
            line(at(2023, 1, 31, 8, 30), 700),
            line(at(2023, 1, 31, 21, 0), 300),
            line(at(2024, 1, 31, 12, 0), 999),
        ];

        let filtered =
            filter_by_period(&sales, day(2023, 1, 20), Period::Daily, now, WeekStart::Sunday);
        assert_eq!(filtered.len(), 2);
        assert_eq!(total_amount(&filtered), 1000);
    }

    #[test]
    fn daily_ignores_today_when_viewing_another_month() {
        let now = at(2024, 3, 15, 15, 0);
        let window = period_window(Period::Daily, day(2024, 2, 1), now, WeekStart::Sunday);
        assert_eq!(window, Some(PeriodWindow::single_day(day(2024, 2, 29))));
    }

    #[test]
    fn weekly_uses_the_week_of_now_inside_the_reference_month() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![
            line(at(2024, 3, 10, 10, 0), 100),
            line(at(2024, 3, 16, 10, 0), 200),
            line(at(2024, 3, 9, 10, 0), 400),
            line(at(2024, 3, 17, 10, 0), 800),
        ];

        let filtered =
            filter_by_period(&sales, day(2024, 3, 1), Period::Weekly, now, WeekStart::Sunday);
        assert_eq!(total_amount(&filtered), 300);

        let monday_weeks =
            filter_by_period(&sales, day(2024, 3, 1), Period::Weekly, now, WeekStart::Monday);
        assert_eq!(total_amount(&monday_weeks), 1000);
    }

    #[test]
    fn weekly_for_another_month_is_empty() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![line(at(2024, 2, 14, 10, 0), 100)];
        let window = period_window(Period::Weekly, day(2024, 2, 1), now, WeekStart::Sunday);
        assert!(window.is_none());
        let filtered =
            filter_by_period(&sales, day(2024, 2, 1), Period::Weekly, now, WeekStart::Sunday);
        assert!(filtered.is_empty());
    }

    #[test]
    fn weekly_window_is_clipped_at_month_boundary() {
        let now = at(2024, 3, 1, 12, 0);
        let window = period_window(Period::Weekly, day(2024, 3, 1), now, WeekStart::Sunday);
        assert_eq!(
            window,
            Some(PeriodWindow {
                start: day(2024, 3, 1),
                end: day(2024, 3, 2),
            })
        );
    }

    #[test]
    fn monthly_keeps_reference_month_only() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![
            line(at(2024, 3, 5, 0, 0), 1000),
            line(at(2024, 3, 20, 0, 0), 2000),
            line(at(2024, 4, 1, 0, 0), 5000),
        ];

        let filtered =
            filter_by_period(&sales, day(2024, 3, 1), Period::Monthly, now, WeekStart::Sunday);
        assert_eq!(filtered.len(), 2);
        assert_eq!(total_amount(&filtered), 3000);
    }

    #[test]
    fn yearly_keeps_reference_year_only() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![
            line(at(2023, 1, 1, 0, 0), 10),
            line(at(2023, 12, 31, 23, 59), 20),
            line(at(2024, 1, 1, 0, 0), 40),
        ];

        let filtered =
            filter_by_period(&sales, day(2023, 6, 1), Period::Yearly, now, WeekStart::Sunday);
        assert_eq!(total_amount(&filtered), 30);
    }

    #[test]
    fn filtering_does_not_touch_the_input() {
        let now = at(2024, 3, 15, 15, 0);
        let sales = vec![line(at(2024, 3, 5, 0, 0), 1000), line(at(2024, 4, 5, 0, 0), 1)];
        let before = sales.clone();
        let _ = filter_by_period(&sales, day(2024, 3, 1), Period::Monthly, now, WeekStart::Sunday);
        assert_eq!(sales, before);
    }
}
