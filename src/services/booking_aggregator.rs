use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::SkipReason;
use crate::models::department::Department;
use crate::models::forecast::ForecastFilters;
use crate::models::production::Commitment;
use crate::services::daily_metrics::DailyMetrics;
use crate::utils::calendar::{resolve_span, working_days};

/// Result of folding a batch of commitments into per-day booked FTE.
#[derive(Debug, Clone, Default)]
pub struct BookedSeries {
    pub daily: DailyMetrics,
    pub aggregated: usize,
    pub skipped: usize,
}

/// Sums allocations per working day and department for commitments that pass the filters.
///
/// Overlapping bookings add up; overbooking shows as values above headcount.
pub fn aggregate_daily_booked(commitments: &[Commitment], filters: &ForecastFilters) -> DailyMetrics {
    aggregate_booked_series(commitments, filters).daily
}

pub fn aggregate_booked_series(commitments: &[Commitment], filters: &ForecastFilters) -> BookedSeries {
    let mut series = BookedSeries::default();

    for commitment in commitments.iter().filter(|c| filters.accepts_commitment(c)) {
        match commitment_days(commitment) {
            Ok((department, allocation, days)) => {
                for day in days {
                    series.daily.add(day, department, allocation);
                }
                series.aggregated += 1;
            }
            Err(reason) => {
                if reason.is_malformed() {
                    info!(
                        target: "app::forecast::bookings",
                        commitment_id = %commitment.id,
                        worker_id = %commitment.worker_id,
                        %reason,
                        "skipping malformed commitment"
                    );
                } else {
                    debug!(
                        target: "app::forecast::bookings",
                        commitment_id = %commitment.id,
                        %reason,
                        "commitment contributes no working days"
                    );
                }
                series.skipped += 1;
            }
        }
    }

    series
}

fn commitment_days(
    commitment: &Commitment,
) -> Result<(Department, f64, Vec<NaiveDate>), SkipReason> {
    let department = Department::try_from(commitment.department.as_str())
        .map_err(|_| SkipReason::UnknownDepartment(commitment.department.clone()))?;

    if !commitment.allocation.is_finite() || commitment.allocation <= 0.0 {
        return Err(SkipReason::InvalidAllocation);
    }
    let allocation = commitment.allocation.min(1.0);

    let (start, end) = resolve_span(
        commitment.start_date.as_deref(),
        commitment.end_date.as_deref(),
    )?;
    let days = working_days(start, end);
    if days.is_empty() {
        return Err(SkipReason::NoWorkingDays);
    }

    Ok((department, allocation, days))
}
