use studio_forecast_lib::db::migrations::get_migration_history;
use studio_forecast_lib::db::DbPool;
use studio_forecast_lib::models::curve::{CurvePreset, DistributionCurve, CURVE_POINTS};
use studio_forecast_lib::models::department::Department;
use studio_forecast_lib::services::curve_model::preset_curve;
use studio_forecast_lib::services::curve_settings_service::CurveSettingsService;
use tempfile::tempdir;

fn setup() -> (DbPool, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("settings.sqlite")).expect("db pool");
    (pool, dir)
}

#[test]
fn test_migrations_seed_flat_curves() {
    let (pool, _dir) = setup();

    let history = pool
        .with_connection(|conn| get_migration_history(conn))
        .expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].version, 2);

    let service = CurveSettingsService::new(pool);
    let settings = service.get().expect("settings");
    for department in Department::ALL {
        assert_eq!(settings.curve(department), DistributionCurve::flat());
    }
}

#[test]
fn test_edits_persist_across_service_instances() {
    let (pool, _dir) = setup();

    let service = CurveSettingsService::new(pool.clone());
    service
        .apply_preset(Department::Animation, CurvePreset::BackLoaded)
        .expect("apply preset");
    service
        .set_curve(Department::Fx, [1.0, 1.0, 2.0, 0.0, 0.0])
        .expect("set curve");

    let reloaded = CurveSettingsService::new(pool).get().expect("reload");
    assert_eq!(
        reloaded.curve(Department::Animation),
        preset_curve(CurvePreset::BackLoaded)
    );
    assert_eq!(
        reloaded.curve(Department::Fx).points(),
        &[0.25, 0.25, 0.5, 0.0, 0.0]
    );
    assert_eq!(reloaded.curve(Department::Cg), DistributionCurve::flat());
}

#[test]
fn test_update_point_renormalizes() {
    let (pool, _dir) = setup();
    let service = CurveSettingsService::new(pool);

    let settings = service
        .update_point(Department::Compositing, 0, 0.8)
        .expect("update point");
    let curve = settings.curve(Department::Compositing);

    assert!((curve.sum() - 1.0).abs() < 1e-9);
    assert!((curve.points()[0] - 0.5).abs() < 1e-9);
    assert!((curve.points()[1] - 0.2 / 1.6).abs() < 1e-9);
}

#[test]
fn test_degenerate_edit_leaves_settings_untouched() {
    let (pool, _dir) = setup();
    let service = CurveSettingsService::new(pool.clone());

    let err = service
        .set_curve(Department::Cg, [0.0; CURVE_POINTS])
        .expect_err("zero curve must fail");
    assert!(err.is_invalid_curve());

    let err = service
        .update_point(Department::Cg, CURVE_POINTS, 0.3)
        .expect_err("index out of range");
    assert!(!err.is_invalid_curve());

    let reloaded = CurveSettingsService::new(pool).get().expect("reload");
    assert_eq!(reloaded.curve(Department::Cg), DistributionCurve::flat());
}

#[test]
fn test_corrupt_stored_value_falls_back_to_defaults() {
    let (pool, _dir) = setup();
    pool.with_connection(|conn| {
        conn.execute(
            "UPDATE app_settings SET value = 'not json' WHERE key = 'department_curves'",
            [],
        )?;
        Ok(())
    })
    .expect("corrupt setting");

    let settings = CurveSettingsService::new(pool).get().expect("settings");
    assert_eq!(settings.curve(Department::Animation), DistributionCurve::flat());
}

#[test]
fn test_reset_restores_flat_curves() {
    let (pool, _dir) = setup();
    let service = CurveSettingsService::new(pool);

    service
        .apply_preset(Department::Fx, CurvePreset::RampUp)
        .expect("apply preset");
    let settings = service.reset().expect("reset");
    assert_eq!(settings.curve(Department::Fx), DistributionCurve::flat());
    assert_eq!(service.get().expect("get").curve(Department::Fx), DistributionCurve::flat());
}
