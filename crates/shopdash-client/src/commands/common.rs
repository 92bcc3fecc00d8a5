use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::dates::{parse_month, parse_timestamp};
use crate::engine::WeekStart;
use crate::engine::calendar::first_of_month;
use crate::{ClientError, ClientResult};

/// The explicit `--now` value, or the local wall clock.
pub(crate) fn resolve_now(raw: Option<&str>, command: &str) -> ClientResult<NaiveDateTime> {
    match raw {
        Some(value) => parse_timestamp(value, "now", command),
        None => Ok(Local::now().naive_local()),
    }
}

/// The `--month` value, defaulting to the month that contains `now`.
pub(crate) fn resolve_month(
    raw: Option<&str>,
    now: NaiveDateTime,
    command: &str,
) -> ClientResult<NaiveDate> {
    match raw {
        Some(value) => parse_month(value, command),
        None => Ok(first_of_month(now.date())),
    }
}

/// The month a record list covers: `None` for `--all`, otherwise `--month`
/// or the month of `now`.
pub(crate) fn resolve_list_month(
    raw_month: Option<&str>,
    all: bool,
    raw_now: Option<&str>,
    command: &str,
) -> ClientResult<Option<NaiveDate>> {
    if all {
        if raw_month.is_some() {
            return Err(ClientError::invalid_argument_for_command(
                "Use either `--month` or `--all`, not both.",
                Some(command),
            ));
        }
        return Ok(None);
    }
    let now = resolve_now(raw_now, command)?;
    resolve_month(raw_month, now, command).map(Some)
}

pub(crate) fn resolve_week_start(raw: Option<&str>) -> ClientResult<WeekStart> {
    match raw {
        Some(value) => value.trim().parse(),
        None => Ok(WeekStart::default()),
    }
}
