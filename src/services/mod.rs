pub mod booking_aggregator;
pub mod curve_model;
pub mod curve_settings_service;
pub mod daily_metrics;
pub mod demand_projector;
pub mod forecast_engine;
pub mod monthly_aggregator;
pub mod peak_analyzer;
pub mod timeline_window;
