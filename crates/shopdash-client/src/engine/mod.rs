//! Period-based aggregation over sales and purchase records.
//!
//! Everything in this module is a pure function of its inputs. The current
//! time is always passed in as `now`; nothing here reads a clock, touches the
//! store, or mutates the records it is handed.

pub mod calendar;
pub mod charts;
pub mod filter;
pub mod labels;
pub mod period;
pub mod profit;
pub mod sales;
pub mod top_product;

use chrono::NaiveDateTime;

pub use calendar::WeekStart;
pub use filter::{PeriodWindow, filter_by_period, period_window};
pub use period::{Period, SalesTargets};
pub use profit::{ProfitSummary, build_profit_report, summarize_profit};
pub use sales::{SalesReport, SalesSummary, build_sales_report, compare_with_previous, summarize_sales};
pub use top_product::{TopProduct, top_selling_product};

/// A record that carries a local calendar timestamp and a yen amount.
pub trait DatedAmount {
    fn date(&self) -> NaiveDateTime;
    fn amount(&self) -> i64;
}

/// A sale line as seen by the product and category aggregations.
pub trait ProductSale: DatedAmount {
    fn product_name(&self) -> &str;
    fn category(&self) -> &str;
}

impl<T: DatedAmount + ?Sized> DatedAmount for &T {
    fn date(&self) -> NaiveDateTime {
        (**self).date()
    }

    fn amount(&self) -> i64 {
        (**self).amount()
    }
}

impl<T: ProductSale + ?Sized> ProductSale for &T {
    fn product_name(&self) -> &str {
        (**self).product_name()
    }

    fn category(&self) -> &str {
        (**self).category()
    }
}

pub fn total_amount<T: DatedAmount>(records: &[T]) -> i64 {
    records.iter().map(DatedAmount::amount).sum()
}

#[cfg(test)]
pub(crate) mod testkit {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{DatedAmount, ProductSale};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Line {
        pub date: NaiveDateTime,
        pub amount: i64,
        pub product: String,
        pub category: String,
    }

    impl DatedAmount for Line {
        fn date(&self) -> NaiveDateTime {
            self.date
        }

        fn amount(&self) -> i64 {
            self.amount
        }
    }

    impl ProductSale for Line {
        fn product_name(&self) -> &str {
            &self.product
        }

        fn category(&self) -> &str {
            &self.category
        }
    }

    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap_or_default()
    }

    pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    pub fn line(date: NaiveDateTime, amount: i64) -> Line {
        Line {
            date,
            amount,
            product: "CBD Oil 10%".to_string(),
            category: "CBD".to_string(),
        }
    }

    pub fn product_line(product: &str, category: &str, date: NaiveDateTime, amount: i64) -> Line {
        Line {
            date,
            amount,
            product: product.to_string(),
            category: category.to_string(),
        }
    }
}
