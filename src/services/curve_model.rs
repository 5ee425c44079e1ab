use serde_json::json;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::curve::{CurvePreset, DepartmentCurveSettings, DistributionCurve, CURVE_POINTS};

/// Sums within this distance of 1.0 are treated as already normalized.
const NORMALIZED_TOLERANCE: f64 = 1e-12;

/// Factor that turns interpolated relative weight back into a share of the average day.
///
/// The points of a normalized curve sum to 1 across `CURVE_POINTS` segments, so a flat
/// curve reads `1 / CURVE_POINTS` everywhere; multiplying by the point count restores 1.0.
pub fn scale_factor() -> f64 {
    CURVE_POINTS as f64
}

/// Normalized timeline position of control point `index`.
pub fn control_position(index: usize) -> f64 {
    index as f64 / (CURVE_POINTS - 1) as f64
}

/// Divides every point by the total so the curve sums to 1.
pub fn normalize(points: &[f64; CURVE_POINTS]) -> AppResult<DistributionCurve> {
    if let Some(index) = points
        .iter()
        .position(|value| !value.is_finite() || *value < 0.0)
    {
        return Err(AppError::invalid_curve(format!(
            "point {index} is {} (points must be finite and non-negative)",
            points[index]
        )));
    }

    let sum: f64 = points.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(AppError::invalid_curve(format!(
            "curve total is {sum}; at least one point must be positive"
        )));
    }

    if (sum - 1.0).abs() <= NORMALIZED_TOLERANCE {
        return Ok(DistributionCurve::from_normalized(*points));
    }

    let mut normalized = [0.0; CURVE_POINTS];
    for (slot, value) in normalized.iter_mut().zip(points.iter()) {
        *slot = value / sum;
    }
    Ok(DistributionCurve::from_normalized(normalized))
}

/// Linear interpolation between the bracketing control points at `position` in `[0, 1]`.
pub fn interpolate(curve: &DistributionCurve, position: f64) -> f64 {
    let points = curve.points();
    let position = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    };

    if position >= 1.0 {
        return points[CURVE_POINTS - 1];
    }

    let scaled = position * (CURVE_POINTS - 1) as f64;
    let lower = (scaled.floor() as usize).min(CURVE_POINTS - 2);
    let fraction = scaled - lower as f64;
    let start = points[lower];
    let end = points[lower + 1];

    start + (end - start) * fraction
}

/// Replaces one control point and renormalizes the result.
pub fn with_point(
    curve: &DistributionCurve,
    index: usize,
    value: f64,
) -> AppResult<DistributionCurve> {
    if index >= CURVE_POINTS {
        return Err(AppError::validation_with_details(
            "curve point index out of range",
            json!({"index": index, "points": CURVE_POINTS}),
        ));
    }

    let mut points = *curve.points();
    points[index] = value;
    normalize(&points)
}

pub fn preset_curve(preset: CurvePreset) -> DistributionCurve {
    normalize(&preset.weights()).unwrap_or_else(|_| DistributionCurve::flat())
}

/// Renormalizes curves that arrive from outside; any curve that cannot be normalized
/// falls back to flat.
pub fn sanitize_curves(curves: &DepartmentCurveSettings) -> DepartmentCurveSettings {
    let mut settings = DepartmentCurveSettings::default();
    for (department, curve) in curves.iter() {
        match normalize(curve.points()) {
            Ok(normalized) => settings.set(department, normalized),
            Err(err) => {
                warn!(
                    target: "app::curve",
                    department = %department,
                    error = %err,
                    "degenerate curve; falling back to flat"
                );
            }
        }
    }
    settings
}
