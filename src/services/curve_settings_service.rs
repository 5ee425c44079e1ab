use std::sync::RwLock;

use tracing::{info, warn};

use crate::db::repositories::settings_repository::SettingsRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::curve::{CurvePreset, DepartmentCurveSettings, DistributionCurve, CURVE_POINTS};
use crate::models::department::Department;
use crate::services::curve_model;

pub const KEY_DEPARTMENT_CURVES: &str = "department_curves";

/// Loads, edits and persists the per-department distribution curves.
///
/// Every edit is renormalized before it is stored; a degenerate edit fails and leaves
/// the stored settings as they were.
pub struct CurveSettingsService {
    db: DbPool,
    cache: RwLock<Option<DepartmentCurveSettings>>,
}

impl CurveSettingsService {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            cache: RwLock::new(None),
        }
    }

    pub fn get(&self) -> AppResult<DepartmentCurveSettings> {
        if let Ok(guard) = self.cache.read() {
            if let Some(settings) = guard.as_ref() {
                return Ok(settings.clone());
            }
        }

        let settings = self.load_from_db()?;
        self.store_cache(&settings);
        Ok(settings)
    }

    pub fn set_curve(
        &self,
        department: Department,
        points: [f64; CURVE_POINTS],
    ) -> AppResult<DepartmentCurveSettings> {
        let curve = curve_model::normalize(&points)?;
        self.replace_curve(department, curve)
    }

    pub fn update_point(
        &self,
        department: Department,
        index: usize,
        value: f64,
    ) -> AppResult<DepartmentCurveSettings> {
        let current = self.get()?.curve(department);
        let curve = curve_model::with_point(&current, index, value)?;
        self.replace_curve(department, curve)
    }

    pub fn apply_preset(
        &self,
        department: Department,
        preset: CurvePreset,
    ) -> AppResult<DepartmentCurveSettings> {
        info!(
            target: "app::curve",
            department = %department,
            preset = %preset,
            "applying curve preset"
        );
        self.replace_curve(department, curve_model::preset_curve(preset))
    }

    /// Drops the stored curves so every department reads as flat again.
    pub fn reset(&self) -> AppResult<DepartmentCurveSettings> {
        self.db
            .with_connection(|conn| SettingsRepository::delete(conn, KEY_DEPARTMENT_CURVES))?;
        info!(target: "app::curve", "department curves reset to defaults");

        let settings = DepartmentCurveSettings::default();
        self.store_cache(&settings);
        Ok(settings)
    }

    fn replace_curve(
        &self,
        department: Department,
        curve: DistributionCurve,
    ) -> AppResult<DepartmentCurveSettings> {
        let mut settings = self.get()?;
        settings.set(department, curve);
        self.persist(&settings)?;
        Ok(settings)
    }

    fn persist(&self, settings: &DepartmentCurveSettings) -> AppResult<()> {
        let value = serde_json::to_string(settings)?;
        self.db
            .with_connection(|conn| SettingsRepository::upsert(conn, KEY_DEPARTMENT_CURVES, &value))?;
        self.store_cache(settings);
        Ok(())
    }

    fn store_cache(&self, settings: &DepartmentCurveSettings) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings.clone());
        }
    }

    fn load_from_db(&self) -> AppResult<DepartmentCurveSettings> {
        let row = self
            .db
            .with_connection(|conn| SettingsRepository::get(conn, KEY_DEPARTMENT_CURVES))?;

        let Some(row) = row else {
            return Ok(DepartmentCurveSettings::default());
        };

        match serde_json::from_str::<DepartmentCurveSettings>(&row.value) {
            Ok(stored) => Ok(curve_model::sanitize_curves(&stored)),
            Err(err) => {
                warn!(
                    target: "app::curve",
                    error = %err,
                    updated_at = %row.updated_at,
                    "stored department curves are unreadable; using defaults"
                );
                Ok(DepartmentCurveSettings::default())
            }
        }
    }
}
