use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::models::forecast::{ForecastDiagnostics, ForecastRequest, ForecastResponse};
use crate::models::production::ProductionUnit;
use crate::services::booking_aggregator::aggregate_booked_series;
use crate::services::curve_model::sanitize_curves;
use crate::services::daily_metrics::DailyMetrics;
use crate::services::demand_projector::try_project_daily_need;
use crate::services::monthly_aggregator;
use crate::services::peak_analyzer::compute_peaks;
use crate::services::timeline_window::compute_bounds_at;

/// Runs the full forecast against today's date.
pub fn run_forecast(request: &ForecastRequest) -> ForecastResponse {
    run_forecast_at(request, Utc::now().date_naive())
}

/// Projects need, aggregates bookings, picks the window, folds by month and finds peaks.
///
/// Bad records only reduce the result; they are counted in the response diagnostics.
pub fn run_forecast_at(request: &ForecastRequest, today: NaiveDate) -> ForecastResponse {
    let filters = &request.filters;
    let units: Vec<ProductionUnit> = request
        .units
        .iter()
        .filter(|unit| filters.accepts_unit(unit))
        .cloned()
        .collect();

    let curves = sanitize_curves(&request.curves);
    let mut diagnostics = ForecastDiagnostics::default();
    let mut daily_need = DailyMetrics::new();

    for unit in &units {
        match try_project_daily_need(unit, &curves) {
            Ok(metrics) => {
                daily_need.merge(&metrics);
                diagnostics.projected_units += 1;
            }
            Err(reason) => {
                debug!(
                    target: "app::forecast",
                    unit_id = %unit.id,
                    %reason,
                    malformed = reason.is_malformed(),
                    "unit contributes no demand"
                );
                diagnostics.skipped_units += 1;
            }
        }
    }

    let booked = aggregate_booked_series(&request.commitments, filters);
    diagnostics.aggregated_commitments = booked.aggregated;
    diagnostics.skipped_commitments = booked.skipped;

    let bounds = compute_bounds_at(request.zoom, &units, today);
    let series = monthly_aggregator::fold(&daily_need, &booked.daily, bounds);
    let peaks = compute_peaks(&series, filters.show_remaining);

    info!(
        target: "app::forecast",
        zoom = %request.zoom,
        start = %bounds.start,
        end = %bounds.end,
        months = series.len(),
        projected_units = diagnostics.projected_units,
        skipped_units = diagnostics.skipped_units,
        aggregated_commitments = diagnostics.aggregated_commitments,
        skipped_commitments = diagnostics.skipped_commitments,
        "forecast computed"
    );

    ForecastResponse {
        bounds,
        series,
        peaks,
        diagnostics,
    }
}
