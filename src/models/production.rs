use serde::{Deserialize, Serialize};

use crate::models::department::DepartmentValues;

/// An episode as delivered by the production tracker.
///
/// Dates stay raw so that "not scheduled yet" and "unreadable" remain distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionUnit {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Total person-days per department.
    #[serde(default)]
    pub effort: DepartmentValues,
}

/// A worker booking as delivered by the resourcing system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: String,
    pub worker_id: String,
    pub project_id: String,
    pub department: String,
    pub region: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Fraction of a full-time week, in `(0, 1]`.
    pub allocation: f64,
}
