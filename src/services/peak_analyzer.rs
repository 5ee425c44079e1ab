use crate::models::department::{Department, Peaks};
use crate::models::forecast::MonthlyDataPoint;

/// Largest monthly value per department; remaining need when `show_remaining` is set.
pub fn compute_peaks(series: &[MonthlyDataPoint], show_remaining: bool) -> Peaks {
    let mut peaks = Peaks::default();

    for point in series {
        for department in Department::ALL {
            let value = displayed_value(point, department, show_remaining);
            let peak = peaks.get_mut(department);
            if value > *peak {
                *peak = value;
            }
        }
    }

    peaks
}

pub fn displayed_value(point: &MonthlyDataPoint, department: Department, show_remaining: bool) -> f64 {
    if show_remaining {
        point.remaining(department)
    } else {
        point.needed.get(department)
    }
}
