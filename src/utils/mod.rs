pub mod calendar;
pub mod logger;
