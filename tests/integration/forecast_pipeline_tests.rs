use chrono::NaiveDate;
use studio_forecast_lib::models::curve::{CurvePreset, DepartmentCurveSettings};
use studio_forecast_lib::models::department::{Department, DepartmentValues};
use studio_forecast_lib::models::forecast::{ForecastFilters, ForecastRequest, TimelineZoom};
use studio_forecast_lib::models::production::{Commitment, ProductionUnit};
use studio_forecast_lib::services::curve_model::preset_curve;
use studio_forecast_lib::services::demand_projector::project_daily_need;
use studio_forecast_lib::services::forecast_engine::run_forecast_at;
use studio_forecast_lib::utils::calendar::working_days;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn episode(id: &str, project: &str, start: &str, end: &str, effort: DepartmentValues) -> ProductionUnit {
    ProductionUnit {
        id: id.to_string(),
        project_id: project.to_string(),
        status: Some("in-progress".to_string()),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        effort,
    }
}

fn booking(id: &str, department: &str, region: &str, start: &str, end: &str, allocation: f64) -> Commitment {
    Commitment {
        id: id.to_string(),
        worker_id: format!("artist-{id}"),
        project_id: "show-a".to_string(),
        department: department.to_string(),
        region: region.to_string(),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        allocation,
    }
}

#[test]
fn test_single_episode_flat_curve_end_to_end() {
    // Mon 2024-03-04 to Fri 2024-03-15: ten working days.
    let unit = episode(
        "ep-1",
        "show-a",
        "2024-03-04",
        "2024-03-15",
        DepartmentValues {
            animation: 20.0,
            ..Default::default()
        },
    );

    let daily = project_daily_need(&unit, &DepartmentCurveSettings::default());
    assert_eq!(daily.len(), 10);
    for day in working_days(date(2024, 3, 4), date(2024, 3, 15)) {
        assert!((daily.value(day, Department::Animation) - 2.0).abs() < 1e-9);
    }

    let request = ForecastRequest {
        units: vec![unit],
        zoom: TimelineZoom::ThreeMonths,
        ..Default::default()
    };
    // Window runs 2024-02-01 to 2024-05-31.
    let response = run_forecast_at(&request, date(2024, 3, 10));

    assert_eq!(response.bounds.start, date(2024, 2, 1));
    let march = response
        .series
        .iter()
        .find(|point| point.month == date(2024, 3, 1))
        .expect("march point");
    assert_eq!(march.working_days, 10);
    assert!((march.needed.animation - 2.0).abs() < 1e-9);
    assert_eq!(response.diagnostics.projected_units, 1);
}

#[test]
fn test_monthly_fold_over_whole_month() {
    // The unit covers ten of March's 21 working days.
    let unit = episode(
        "ep-1",
        "show-a",
        "2024-03-04",
        "2024-03-15",
        DepartmentValues {
            animation: 20.0,
            ..Default::default()
        },
    );
    let daily = project_daily_need(&unit, &DepartmentCurveSettings::default());
    let series = studio_forecast_lib::services::monthly_aggregator::fold(
        &daily,
        &Default::default(),
        studio_forecast_lib::models::forecast::TimelineBounds {
            start: date(2024, 3, 1),
            end: date(2024, 3, 31),
        },
    );

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].working_days, 10);
    assert!((series[0].needed.animation - 2.0).abs() < 1e-9);
}

#[test]
fn test_remaining_need_subtracts_bookings() {
    // One week of CG need at 1.0/day and a half-time booking for the same week.
    let unit = episode(
        "ep-1",
        "show-a",
        "2024-03-04",
        "2024-03-08",
        DepartmentValues {
            cg: 5.0,
            ..Default::default()
        },
    );
    let commitment = booking("b1", "CG", "California", "2024-03-04", "2024-03-08", 0.5);

    let mut request = ForecastRequest {
        units: vec![unit],
        commitments: vec![commitment],
        zoom: TimelineZoom::ThreeMonths,
        filters: ForecastFilters {
            show_remaining: true,
            ..Default::default()
        },
        ..Default::default()
    };

    // Today after the unit ends: the window is re-centred on March 2024.
    let response = run_forecast_at(&request, date(2024, 6, 1));
    assert_eq!(response.bounds.start, date(2024, 2, 1));
    assert_eq!(response.bounds.end, date(2024, 4, 30));

    let march = response
        .series
        .iter()
        .find(|point| point.month == date(2024, 3, 1))
        .expect("march point");
    let per_day_need = 1.0;
    let per_day_booked = 0.5;
    assert!((march.needed.cg - per_day_need).abs() < 1e-9);
    assert!((march.booked.cg - per_day_booked).abs() < 1e-9);
    assert!((march.remaining(Department::Cg) - (per_day_need - per_day_booked)).abs() < 1e-9);
    assert!((response.peaks.cg - (per_day_need - per_day_booked)).abs() < 1e-9);

    request.filters.show_remaining = false;
    let gross = run_forecast_at(&request, date(2024, 6, 1));
    assert!((gross.peaks.cg - per_day_need).abs() < 1e-9);
}

#[test]
fn test_historical_selection_brackets_units() {
    let unit = episode(
        "ep-1",
        "show-a",
        "2023-01-01",
        "2023-03-31",
        DepartmentValues {
            fx: 30.0,
            ..Default::default()
        },
    );
    let request = ForecastRequest {
        units: vec![unit],
        ..Default::default()
    };

    let response = run_forecast_at(&request, date(2031, 1, 1));
    assert!(response.bounds.contains(date(2023, 1, 1)));
    assert!(response.bounds.contains(date(2023, 3, 31)));
    assert!(response.bounds.end < date(2024, 1, 1));

    let months: Vec<NaiveDate> = response.series.iter().map(|point| point.month).collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
    assert!(response.peaks.fx > 0.0);
}

#[test]
fn test_unit_filters_scope_demand() {
    let effort = DepartmentValues {
        animation: 10.0,
        ..Default::default()
    };
    let mut on_hold = episode("ep-2", "show-a", "2024-03-04", "2024-03-08", effort);
    on_hold.status = Some("On-Hold".to_string());

    let request = ForecastRequest {
        units: vec![
            episode("ep-1", "show-a", "2024-03-04", "2024-03-08", effort),
            on_hold,
            episode("ep-3", "show-b", "2024-03-04", "2024-03-08", effort),
        ],
        zoom: TimelineZoom::ThreeMonths,
        filters: ForecastFilters {
            project_id: Some("show-a".to_string()),
            statuses: ["in-progress".to_string()].into_iter().collect(),
            ..Default::default()
        },
        ..Default::default()
    };

    let response = run_forecast_at(&request, date(2024, 3, 1));
    assert_eq!(response.diagnostics.projected_units, 1);
    let march = &response.series[1];
    assert_eq!(march.month, date(2024, 3, 1));
    assert!((march.needed.animation - 2.0).abs() < 1e-9);

    let single = ForecastRequest {
        filters: ForecastFilters {
            unit_id: Some("ep-3".to_string()),
            ..Default::default()
        },
        ..request.clone()
    };
    let response = run_forecast_at(&single, date(2024, 3, 1));
    assert_eq!(response.diagnostics.projected_units, 1);
}

#[test]
fn test_region_filter_hides_other_regions() {
    let request = ForecastRequest {
        commitments: vec![
            booking("b1", "cg", "Oregon", "2024-03-04", "2024-03-08", 1.0),
            booking("b2", "cg", "California", "2024-03-04", "2024-03-08", 0.25),
        ],
        zoom: TimelineZoom::ThreeMonths,
        filters: ForecastFilters {
            regions: ["California".to_string()].into_iter().collect(),
            ..Default::default()
        },
        ..Default::default()
    };

    let response = run_forecast_at(&request, date(2024, 3, 1));
    assert_eq!(response.diagnostics.aggregated_commitments, 1);
    let march = response
        .series
        .iter()
        .find(|point| point.month == date(2024, 3, 1))
        .expect("march point");
    assert!((march.booked.cg - 0.25).abs() < 1e-9);
}

#[test]
fn test_shaped_curve_preserves_total_effort() {
    let curves = DepartmentCurveSettings::default()
        .with_curve(Department::Compositing, preset_curve(CurvePreset::Bell));
    let unit = episode(
        "ep-1",
        "show-a",
        "2024-03-04",
        "2024-03-29",
        DepartmentValues {
            compositing: 40.0,
            ..Default::default()
        },
    );

    let daily = project_daily_need(&unit, &curves);
    let total: f64 = daily.iter().map(|(_, values)| values.compositing).sum();
    // Piecewise-linear sampling does not conserve effort exactly, but stays close.
    assert!(total > 0.0);
    assert!((total - 40.0).abs() / 40.0 < 0.25);

    let peak_day = daily
        .iter()
        .max_by(|a, b| a.1.compositing.total_cmp(&b.1.compositing))
        .map(|(day, _)| *day)
        .unwrap();
    assert!(peak_day >= date(2024, 3, 11) && peak_day <= date(2024, 3, 22));
}
