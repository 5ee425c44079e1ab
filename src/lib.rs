pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::forecast::{ForecastRequest, ForecastResponse};
pub use services::forecast_engine::{run_forecast, run_forecast_at};
