use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::department::Department;

/// Number of control points on a distribution curve.
///
/// Control point `i` sits at normalized position `i / (CURVE_POINTS - 1)`, and daily
/// projection rescales by this same count, so changing it changes both.
pub const CURVE_POINTS: usize = 5;

/// Relative effort intensity across a unit's normalized duration. Points sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DistributionCurve([f64; CURVE_POINTS]);

impl DistributionCurve {
    /// Wraps points that the caller has already normalized.
    pub(crate) fn from_normalized(points: [f64; CURVE_POINTS]) -> Self {
        Self(points)
    }

    pub fn flat() -> Self {
        Self([1.0 / CURVE_POINTS as f64; CURVE_POINTS])
    }

    pub fn points(&self) -> &[f64; CURVE_POINTS] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Default for DistributionCurve {
    fn default() -> Self {
        Self::flat()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CurvePreset {
    Flat,
    FrontLoaded,
    BackLoaded,
    Bell,
    RampUp,
    RampDown,
}

impl CurvePreset {
    pub const ALL: [CurvePreset; 6] = [
        CurvePreset::Flat,
        CurvePreset::FrontLoaded,
        CurvePreset::BackLoaded,
        CurvePreset::Bell,
        CurvePreset::RampUp,
        CurvePreset::RampDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurvePreset::Flat => "flat",
            CurvePreset::FrontLoaded => "front-loaded",
            CurvePreset::BackLoaded => "back-loaded",
            CurvePreset::Bell => "bell",
            CurvePreset::RampUp => "ramp-up",
            CurvePreset::RampDown => "ramp-down",
        }
    }

    /// Unnormalized shape weights.
    pub fn weights(&self) -> [f64; CURVE_POINTS] {
        match self {
            CurvePreset::Flat => [1.0, 1.0, 1.0, 1.0, 1.0],
            CurvePreset::FrontLoaded => [0.35, 0.3, 0.2, 0.1, 0.05],
            CurvePreset::BackLoaded => [0.05, 0.1, 0.2, 0.3, 0.35],
            CurvePreset::Bell => [0.05, 0.2, 0.5, 0.2, 0.05],
            CurvePreset::RampUp => [0.0, 0.1, 0.2, 0.3, 0.4],
            CurvePreset::RampDown => [0.4, 0.3, 0.2, 0.1, 0.0],
        }
    }
}

impl fmt::Display for CurvePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CurvePreset {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        CurvePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == value)
            .ok_or_else(|| format!("unsupported curve preset: {value}"))
    }
}

/// The curve each department's effort follows. Missing departments read as flat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DepartmentCurveSettings {
    curves: BTreeMap<Department, DistributionCurve>,
}

impl Default for DepartmentCurveSettings {
    fn default() -> Self {
        Self {
            curves: Department::ALL
                .into_iter()
                .map(|department| (department, DistributionCurve::flat()))
                .collect(),
        }
    }
}

impl DepartmentCurveSettings {
    pub fn curve(&self, department: Department) -> DistributionCurve {
        self.curves
            .get(&department)
            .copied()
            .unwrap_or_else(DistributionCurve::flat)
    }

    pub fn set(&mut self, department: Department, curve: DistributionCurve) {
        self.curves.insert(department, curve);
    }

    pub fn with_curve(mut self, department: Department, curve: DistributionCurve) -> Self {
        self.set(department, curve);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Department, DistributionCurve)> + '_ {
        Department::ALL
            .into_iter()
            .map(move |department| (department, self.curve(department)))
    }
}
