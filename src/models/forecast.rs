use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::curve::DepartmentCurveSettings;
use crate::models::department::{Department, DepartmentValues, Peaks};
use crate::models::production::{Commitment, ProductionUnit};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimelineZoom {
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl TimelineZoom {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineZoom::ThreeMonths => "3m",
            TimelineZoom::SixMonths => "6m",
            TimelineZoom::OneYear => "1y",
            TimelineZoom::TwoYears => "2y",
        }
    }
}

impl Default for TimelineZoom {
    fn default() -> Self {
        TimelineZoom::OneYear
    }
}

impl fmt::Display for TimelineZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimelineZoom {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "3m" => Ok(TimelineZoom::ThreeMonths),
            "6m" => Ok(TimelineZoom::SixMonths),
            "1y" => Ok(TimelineZoom::OneYear),
            "2y" => Ok(TimelineZoom::TwoYears),
            other => Err(format!("unsupported timeline zoom: {other}")),
        }
    }
}

/// Caller-selected view filters. Empty sets and `None` mean "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastFilters {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub statuses: BTreeSet<String>,
    #[serde(default)]
    pub regions: BTreeSet<String>,
    #[serde(default)]
    pub show_remaining: bool,
}

impl ForecastFilters {
    pub fn accepts_unit(&self, unit: &ProductionUnit) -> bool {
        if let Some(project_id) = self.project_id.as_deref() {
            if unit.project_id != project_id {
                return false;
            }
        }

        if let Some(unit_id) = self.unit_id.as_deref() {
            if unit.id != unit_id {
                return false;
            }
        }

        if self.statuses.is_empty() {
            return true;
        }

        unit.status
            .as_deref()
            .map(|status| {
                self.statuses
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(status.trim()))
            })
            .unwrap_or(false)
    }

    pub fn accepts_commitment(&self, commitment: &Commitment) -> bool {
        if let Some(project_id) = self.project_id.as_deref() {
            if commitment.project_id != project_id {
                return false;
            }
        }

        self.regions.is_empty()
            || self
                .regions
                .iter()
                .any(|region| region.eq_ignore_ascii_case(commitment.region.trim()))
    }
}

/// Inclusive date window shown on the timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One calendar month, averaged per working day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDataPoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub needed: DepartmentValues,
    pub booked: DepartmentValues,
    /// Working days in the window that carried need or booked entries; the averaging divisor.
    pub working_days: u32,
}

impl MonthlyDataPoint {
    /// Need not yet covered by bookings, floored at zero.
    pub fn remaining(&self, department: Department) -> f64 {
        (self.needed.get(department) - self.booked.get(department)).max(0.0)
    }

    /// Booked minus needed: negative is a shortfall, positive a surplus.
    pub fn balance(&self, department: Department) -> f64 {
        self.booked.get(department) - self.needed.get(department)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDiagnostics {
    pub projected_units: usize,
    pub skipped_units: usize,
    pub aggregated_commitments: usize,
    pub skipped_commitments: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default)]
    pub units: Vec<ProductionUnit>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub curves: DepartmentCurveSettings,
    #[serde(default)]
    pub filters: ForecastFilters,
    #[serde(default)]
    pub zoom: TimelineZoom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub bounds: TimelineBounds,
    pub series: Vec<MonthlyDataPoint>,
    pub peaks: Peaks,
    pub diagnostics: ForecastDiagnostics,
}
