use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// First day of the week used by weekly windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        }
    }

    const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sunday" => Ok(Self::Sunday),
            "monday" => Ok(Self::Monday),
            other => Err(ClientError::invalid_argument(&format!(
                "Unknown week start `{other}`. Use sunday or monday."
            ))),
        }
    }
}

/// Inclusive first and last day of the week that contains `date`.
pub fn week_containing(date: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let week = date.week(week_start.weekday());
    (week.first_day(), week.last_day())
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month());
    date.with_day(day).unwrap_or(date)
}

pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (first_of_month(date), last_day_of_month(date))
}

pub fn year_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    (start, end)
}

pub fn same_month(left: NaiveDate, right: NaiveDate) -> bool {
    left.year() == right.year() && left.month() == right.month()
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days < 0 {
        date.checked_sub_days(magnitude)
    } else {
        date.checked_add_days(magnitude)
    };
    shifted.unwrap_or(date)
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    NaiveDate::from_ymd_opt(year, month_u32, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
