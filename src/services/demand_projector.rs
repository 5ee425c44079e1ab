use tracing::{debug, info};

use crate::error::SkipReason;
use crate::models::curve::DepartmentCurveSettings;
use crate::models::department::Department;
use crate::models::production::ProductionUnit;
use crate::services::curve_model;
use crate::services::daily_metrics::DailyMetrics;
use crate::utils::calendar::{resolve_span, working_days};

/// Spreads one unit's effort over its working days following each department's curve.
///
/// An unprojectable unit yields an empty series; use [`try_project_daily_need`] to see why.
pub fn project_daily_need(
    unit: &ProductionUnit,
    curves: &DepartmentCurveSettings,
) -> DailyMetrics {
    match try_project_daily_need(unit, curves) {
        Ok(metrics) => metrics,
        Err(reason) => {
            log_skipped_unit(unit, &reason);
            DailyMetrics::new()
        }
    }
}

pub fn try_project_daily_need(
    unit: &ProductionUnit,
    curves: &DepartmentCurveSettings,
) -> Result<DailyMetrics, SkipReason> {
    let (start, end) = resolve_span(unit.start_date.as_deref(), unit.end_date.as_deref())?;
    let days = working_days(start, end);
    if days.is_empty() {
        return Err(SkipReason::NoWorkingDays);
    }

    let total_days = days.len();
    let scale = curve_model::scale_factor();
    let mut metrics = DailyMetrics::new();

    for department in Department::ALL {
        let effort = unit.effort.get(department);
        if !effort.is_finite() || effort <= 0.0 {
            continue;
        }

        let curve = curves.curve(department);
        let avg_daily = effort / total_days as f64;

        for (index, day) in days.iter().enumerate() {
            let position = day_position(index, total_days);
            let need = avg_daily * curve_model::interpolate(&curve, position) * scale;
            metrics.add(*day, department, need);
        }
    }

    debug!(
        target: "app::forecast::demand",
        unit_id = %unit.id,
        working_days = total_days,
        "projected unit demand"
    );

    Ok(metrics)
}

/// Where working day `index` of `total` sits on the unit's normalized timeline.
fn day_position(index: usize, total: usize) -> f64 {
    if total <= 1 {
        0.0
    } else {
        index as f64 / (total - 1) as f64
    }
}

fn log_skipped_unit(unit: &ProductionUnit, reason: &SkipReason) {
    if reason.is_malformed() {
        info!(
            target: "app::forecast::demand",
            unit_id = %unit.id,
            %reason,
            "skipping unit with malformed dates"
        );
    } else {
        debug!(
            target: "app::forecast::demand",
            unit_id = %unit.id,
            %reason,
            "unit cannot be projected"
        );
    }
}
