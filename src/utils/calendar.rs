use chrono::{DateTime, Datelike, Months, NaiveDate, Weekday};

use crate::error::{DateField, SkipReason};

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; only the calendar date is kept.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Resolves an optional raw date field, keeping "absent" and "unparseable" apart.
pub fn resolve_date_field(value: Option<&str>, field: DateField) -> Result<NaiveDate, SkipReason> {
    match value.map(str::trim) {
        None | Some("") => Err(SkipReason::MissingDate(field)),
        Some(raw) => parse_calendar_date(raw).ok_or_else(|| SkipReason::MalformedDate {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Resolves both ends of a record's span; the range is inclusive.
pub fn resolve_span(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), SkipReason> {
    let start = resolve_date_field(start, DateField::Start)?;
    let end = resolve_date_field(end, DateField::End)?;
    if end < start {
        return Err(SkipReason::EndBeforeStart);
    }
    Ok((start, end))
}

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every Monday-to-Friday date in `[start, end]`, in ascending order.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| is_working_day(*date))
        .collect()
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Shifts by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn end_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}
