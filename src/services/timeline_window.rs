use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::models::forecast::{TimelineBounds, TimelineZoom};
use crate::models::production::ProductionUnit;
use crate::utils::calendar::{
    end_of_year, first_day_of_month, last_day_of_month, resolve_span, shift_months,
};

/// Months of history shown before the current month.
const LEAD_IN_MONTHS: i32 = 1;
/// Padding around historical units when the window is re-centred on them.
const HISTORICAL_PADDING_MONTHS: i32 = 1;

pub fn compute_bounds(zoom: TimelineZoom, candidate_units: &[ProductionUnit]) -> TimelineBounds {
    compute_bounds_at(zoom, candidate_units, Utc::now().date_naive())
}

/// Picks the visible window for `zoom` relative to `today`.
///
/// When every dated candidate finished before `today`, the window brackets those units
/// instead, so an all-past selection does not render as an empty future.
pub fn compute_bounds_at(
    zoom: TimelineZoom,
    candidate_units: &[ProductionUnit],
    today: NaiveDate,
) -> TimelineBounds {
    if let Some(bounds) = historical_bounds(candidate_units, today) {
        debug!(
            target: "app::forecast::timeline",
            start = %bounds.start,
            end = %bounds.end,
            "all candidate units are in the past; anchoring window on them"
        );
        return bounds;
    }

    default_bounds(zoom, today)
}

fn default_bounds(zoom: TimelineZoom, today: NaiveDate) -> TimelineBounds {
    let start = first_day_of_month(shift_months(today, -LEAD_IN_MONTHS));
    let end = match zoom {
        TimelineZoom::ThreeMonths => Some(last_day_of_month(shift_months(today, 2))),
        TimelineZoom::SixMonths => Some(last_day_of_month(shift_months(today, 5))),
        TimelineZoom::OneYear => end_of_year(today.year()),
        TimelineZoom::TwoYears => end_of_year(today.year() + 1),
    }
    .unwrap_or_else(|| last_day_of_month(today));

    TimelineBounds { start, end }
}

/// Units without usable dates neither force nor block the historical window.
fn historical_bounds(units: &[ProductionUnit], today: NaiveDate) -> Option<TimelineBounds> {
    let spans: Vec<(NaiveDate, NaiveDate)> = units
        .iter()
        .filter_map(|unit| resolve_span(unit.start_date.as_deref(), unit.end_date.as_deref()).ok())
        .collect();

    if spans.is_empty() || spans.iter().any(|(_, end)| *end >= today) {
        return None;
    }

    let earliest = spans.iter().map(|(start, _)| *start).min()?;
    let latest = spans.iter().map(|(_, end)| *end).max()?;

    Some(TimelineBounds {
        start: first_day_of_month(shift_months(earliest, -HISTORICAL_PADDING_MONTHS)),
        end: last_day_of_month(shift_months(latest, HISTORICAL_PADDING_MONTHS)),
    })
}
