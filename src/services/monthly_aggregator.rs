use chrono::NaiveDate;

use crate::models::department::DepartmentValues;
use crate::models::forecast::{MonthlyDataPoint, TimelineBounds};
use crate::services::daily_metrics::DailyMetrics;
use crate::utils::calendar::{first_day_of_month, is_working_day, last_day_of_month, shift_months};

/// Folds daily need and booked series into chronological monthly averages per working day.
///
/// Each month averages over the working days inside `bounds` that carry a need or booked
/// entry, so a unit spanning half a month averages to its own daily rate. Months with working
/// days but no entries yield zeros; months without working days inside `bounds` are left out.
pub fn fold(
    daily_need: &DailyMetrics,
    daily_booked: &DailyMetrics,
    bounds: TimelineBounds,
) -> Vec<MonthlyDataPoint> {
    if bounds.end < bounds.start {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut month = first_day_of_month(bounds.start);

    while month <= bounds.end {
        let from = month.max(bounds.start);
        let to = last_day_of_month(month).min(bounds.end);

        if let Some(point) = fold_month(daily_need, daily_booked, month, from, to) {
            points.push(point);
        }

        let next = shift_months(month, 1);
        if next <= month {
            break;
        }
        month = next;
    }

    points
}

fn fold_month(
    daily_need: &DailyMetrics,
    daily_booked: &DailyMetrics,
    month: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<MonthlyDataPoint> {
    let mut needed = DepartmentValues::default();
    let mut booked = DepartmentValues::default();
    let mut visible_days = 0u32;
    let mut working_days = 0u32;

    for day in from
        .iter_days()
        .take_while(|day| *day <= to)
        .filter(|day| is_working_day(*day))
    {
        visible_days += 1;
        let need = daily_need.get(day);
        let booking = daily_booked.get(day);
        if need.is_none() && booking.is_none() {
            continue;
        }

        working_days += 1;
        if let Some(values) = need {
            needed.merge(values);
        }
        if let Some(values) = booking {
            booked.merge(values);
        }
    }

    if visible_days == 0 {
        return None;
    }
    if working_days == 0 {
        return Some(MonthlyDataPoint {
            month,
            needed,
            booked,
            working_days,
        });
    }

    let divisor = working_days as f64;
    Some(MonthlyDataPoint {
        month,
        needed: needed.map(|_, total| total / divisor),
        booked: booked.map(|_, total| total / divisor),
        working_days,
    })
}
