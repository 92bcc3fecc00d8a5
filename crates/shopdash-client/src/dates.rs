use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::engine::calendar::first_of_month;
use crate::{ClientError, ClientResult};

pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const CSV_DATE_FORMAT: &str = "%Y/%m/%d";

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a `YYYY-MM` argument into the first day of that month.
pub fn parse_month(value: &str, command: &str) -> ClientResult<NaiveDate> {
    let trimmed = value.trim();
    let invalid = || {
        ClientError::invalid_argument_for_command(
            &format!("`{trimmed}` is not a month. Use YYYY-MM, for example 2024-03."),
            Some(command),
        )
    };

    let Some((year_part, month_part)) = trimmed.split_once('-') else {
        return Err(invalid());
    };
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if year_part.len() != 4
        || month_part.len() != 2
        || !all_digits(year_part)
        || !all_digits(month_part)
    {
        return Err(invalid());
    }
    let year = year_part.parse::<i32>().map_err(|_| invalid())?;
    let month = month_part.parse::<u32>().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

pub fn format_month(date: NaiveDate) -> String {
    first_of_month(date).format("%Y-%m").to_string()
}

/// Accepts a bare date (midnight) or a date with a minute or second time.
pub fn parse_timestamp(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDateTime> {
    let trimmed = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    Err(ClientError::invalid_argument_for_command(
        &format!("`{field_name}` must be YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS] with a real calendar date."),
        Some(command),
    ))
}

pub fn format_store_timestamp(value: NaiveDateTime) -> String {
    value.format(STORE_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_store_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORE_TIMESTAMP_FORMAT).ok()
}

pub fn parse_csv_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(value.trim(), CSV_DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

pub fn format_csv_date(value: NaiveDateTime) -> String {
    value.format(CSV_DATE_FORMAT).to_string()
}

/// Wall-clock audit stamp for `created_at` and `updated_at` columns.
pub fn audit_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
