use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::engine::calendar::{add_months_clamped, first_of_month, month_bounds, shift_days};
use crate::engine::{DatedAmount, ProductSale};

pub const LABEL_MAX_CHARS: usize = 15;
pub const RECENT_SALES_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub label: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthComparison {
    pub month: u32,
    pub current_year: i32,
    pub current_total: i64,
    pub previous_total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonView {
    Monthly,
    Yearly,
}

impl ComparisonView {
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 3,
            Self::Yearly => 12,
        }
    }
}

/// Sales per calendar day of the reference month, zero-filled.
pub fn daily_series<T: DatedAmount>(sales: &[T], reference_month: NaiveDate) -> Vec<DailyPoint> {
    let (first, last) = month_bounds(reference_month);
    let mut totals: HashMap<NaiveDate, i64> = HashMap::new();
    for sale in sales {
        let date = sale.date().date();
        if first <= date && date <= last {
            *totals.entry(date).or_insert(0) += sale.amount();
        }
    }

    let mut points = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        points.push(DailyPoint {
            date: cursor,
            label: format!("{}/{}", cursor.month(), cursor.day()),
            total: totals.get(&cursor).copied().unwrap_or(0),
        });
        let next = shift_days(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }
    points
}

/// Totals per category, largest first. Equal totals keep first-seen order.
pub fn category_breakdown<T: ProductSale>(sales: &[T]) -> Vec<CategoryShare> {
    let mut order: Vec<(String, i64)> = Vec::new();
    let mut index_by_category: HashMap<String, usize> = HashMap::new();
    for sale in sales {
        let category = sale.category();
        match index_by_category.get(category) {
            Some(index) => order[*index].1 += sale.amount(),
            None => {
                index_by_category.insert(category.to_string(), order.len());
                order.push((category.to_string(), sale.amount()));
            }
        }
    }

    let grand_total: i64 = order.iter().map(|(_, total)| total).sum();
    let mut shares = order
        .into_iter()
        .map(|(category, total)| CategoryShare {
            percentage: percentage_of(total, grand_total),
            category,
            total,
        })
        .collect::<Vec<CategoryShare>>();
    shares.sort_by(|left, right| right.total.cmp(&left.total));
    shares
}

/// Month-of-year totals for this year and last year over the most recent
/// months ending at `today`, oldest month first.
pub fn year_over_year<T: DatedAmount>(
    sales: &[T],
    today: NaiveDate,
    view: ComparisonView,
) -> Vec<MonthComparison> {
    let current_year = today.year();
    let anchor = first_of_month(today);
    let mut rows = (0..view.months())
        .map(|offset| {
            let month = add_months_clamped(anchor, -(offset as i32)).month();
            MonthComparison {
                month,
                current_year,
                current_total: 0,
                previous_total: 0,
            }
        })
        .collect::<Vec<MonthComparison>>();

    for sale in sales {
        let date = sale.date().date();
        let Some(row) = rows.iter_mut().find(|row| row.month == date.month()) else {
            continue;
        };
        if date.year() == current_year {
            row.current_total += sale.amount();
        } else if date.year() == current_year - 1 {
            row.previous_total += sale.amount();
        }
    }

    rows.reverse();
    rows
}

/// Newest sales first.
pub fn recent_sales<T: DatedAmount>(sales: &[T], limit: usize) -> Vec<&T> {
    let mut ordered = sales.iter().collect::<Vec<&T>>();
    ordered.sort_by(|left, right| right.date().cmp(&left.date()));
    ordered.truncate(limit);
    ordered
}

pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let head = name.chars().take(max_chars).collect::<String>();
    format!("{head}...")
}

fn percentage_of(part: i64, whole: i64) -> i64 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::{
        ComparisonView, category_breakdown, daily_series, recent_sales, truncate_label,
        year_over_year,
    };
    use crate::engine::testkit::{at, day, line, product_line};

    #[test]
    fn daily_series_covers_every_day_of_the_month() {
        let sales = vec![
            line(at(2024, 2, 3, 9, 0), 100),
            line(at(2024, 2, 3, 18, 0), 50),
            line(at(2024, 2, 29, 12, 0), 70),
            line(at(2024, 3, 1, 12, 0), 999),
        ];
        let points = daily_series(&sales, day(2024, 2, 14));
        assert_eq!(points.len(), 29);
        assert_eq!(points[2].label, "2/3");
        assert_eq!(points[2].total, 150);
        assert_eq!(points[28].total, 70);
        assert_eq!(points.iter().map(|point| point.total).sum::<i64>(), 220);
    }

    #[test]
    fn categories_are_sorted_with_rounded_percentages() {
        let sales = vec![
            product_line("Oil", "CBD", at(2024, 3, 1, 9, 0), 100),
            product_line("Sleep", "CBN", at(2024, 3, 1, 9, 0), 200),
            product_line("Focus", "CBG", at(2024, 3, 1, 9, 0), 0),
        ];
        let shares = category_breakdown(&sales);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].category, "CBN");
        assert_eq!(shares[0].percentage, 67);
        assert_eq!(shares[1].category, "CBD");
        assert_eq!(shares[1].percentage, 33);
        assert_eq!(shares[2].percentage, 0);
    }

    #[test]
    fn year_over_year_splits_current_and_previous_year() {
        let sales = vec![
            line(at(2024, 3, 2, 9, 0), 1_000),
            line(at(2023, 3, 2, 9, 0), 400),
            line(at(2024, 1, 20, 9, 0), 300),
            line(at(2022, 3, 2, 9, 0), 50_000),
            line(at(2024, 7, 2, 9, 0), 8_000),
        ];
        let rows = year_over_year(&sales, day(2024, 3, 15), ComparisonView::Monthly);
        assert_eq!(rows.iter().map(|row| row.month).collect::<Vec<u32>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].current_total, 300);
        assert_eq!(rows[2].current_total, 1_000);
        assert_eq!(rows[2].previous_total, 400);

        let yearly = year_over_year(&sales, day(2024, 3, 15), ComparisonView::Yearly);
        assert_eq!(yearly.len(), 12);
        assert_eq!(yearly[0].month, 4);
    }

    #[test]
    fn year_over_year_keeps_calendar_order_across_new_year() {
        let sales = vec![line(at(2023, 12, 10, 9, 0), 700), line(at(2024, 1, 5, 9, 0), 200)];
        let rows = year_over_year(&sales, day(2024, 1, 15), ComparisonView::Monthly);
        assert_eq!(rows.iter().map(|row| row.month).collect::<Vec<u32>>(), vec![11, 12, 1]);
        assert_eq!(rows[1].previous_total, 700);
        assert_eq!(rows[2].current_total, 200);
    }

    #[test]
    fn recent_sales_are_newest_first() {
        let sales = vec![
            line(at(2024, 3, 1, 9, 0), 1),
            line(at(2024, 3, 3, 9, 0), 3),
            line(at(2024, 3, 2, 9, 0), 2),
        ];
        let recent = recent_sales(&sales, 2);
        assert_eq!(recent.iter().map(|sale| sale.amount).collect::<Vec<i64>>(), vec![3, 2]);
    }

    #[test]
    fn long_labels_are_truncated_by_characters() {
        assert_eq!(truncate_label("CBD Oil", 15), "CBD Oil");
        assert_eq!(truncate_label("フルスペクトラムCBDオイル30ml", 8), "フルスペクトラム...");
    }
}
