use std::path::PathBuf;
use std::process::ExitCode;

use studio_forecast_lib::db::DbPool;
use studio_forecast_lib::error::{AppError, AppResult};
use studio_forecast_lib::models::forecast::ForecastRequest;
use studio_forecast_lib::services::curve_settings_service::CurveSettingsService;
use studio_forecast_lib::services::forecast_engine::run_forecast;
use studio_forecast_lib::utils::logger::init_logging;
use tracing::info;

const ENV_DB_PATH: &str = "STUDIO_FORECAST_DB";
const ENV_LOG_DIR: &str = "STUDIO_FORECAST_LOG_DIR";
const DEFAULT_LOG_DIR: &str = "logs";

fn main() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("studio-forecast failed: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> AppResult<()> {
    let log_dir = std::env::var_os(ENV_LOG_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    init_logging(&log_dir)?;

    let request_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| AppError::validation("usage: studio-forecast <request.json>"))?;

    let raw = std::fs::read_to_string(&request_path)?;
    let mut request: ForecastRequest = serde_json::from_str(&raw)?;

    if let Some(db_path) = std::env::var_os(ENV_DB_PATH) {
        let settings = CurveSettingsService::new(DbPool::new(PathBuf::from(db_path))?);
        request.curves = settings.get()?;
        info!(target: "app::forecast", "using persisted department curves");
    }

    let response = run_forecast(&request);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
