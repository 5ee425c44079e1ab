use std::fmt;

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid distribution curve: {reason}")]
    InvalidCurve { reason: String },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("database error: {message}")]
    Database { message: String },

    #[error("record not found")]
    NotFound,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(target: "app::curve", %reason, "rejected distribution curve");
        AppError::InvalidCurve { reason }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::database", "resource not found");
        AppError::NotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::database", %message, "database error");
        AppError::Database { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }

    pub fn is_invalid_curve(&self) -> bool {
        matches!(self, AppError::InvalidCurve { .. })
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::QueryReturnedNoRows;

        match &error {
            QueryReturnedNoRows => AppError::not_found(),
            _ => AppError::database(error.to_string()),
        }
    }
}

/// Which date field of an input record failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn as_str(self) -> &'static str {
        match self {
            DateField::Start => "startDate",
            DateField::End => "endDate",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single unit or commitment contributed nothing to the forecast.
///
/// These never abort a pass; the engine counts them and moves on to the next record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("{0} is missing")]
    MissingDate(DateField),

    #[error("{field} could not be parsed: {value:?}")]
    MalformedDate { field: DateField, value: String },

    #[error("end date precedes start date")]
    EndBeforeStart,

    #[error("date range contains no working days")]
    NoWorkingDays,

    #[error("unknown department: {0:?}")]
    UnknownDepartment(String),

    #[error("allocation must be a positive finite fraction")]
    InvalidAllocation,
}

impl SkipReason {
    /// Missing data is an expected state for unscheduled units; everything else is a bad record.
    pub fn is_malformed(&self) -> bool {
        !matches!(
            self,
            SkipReason::MissingDate(_) | SkipReason::NoWorkingDays | SkipReason::EndBeforeStart
        )
    }
}
