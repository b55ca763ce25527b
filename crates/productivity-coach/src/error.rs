use crate::analysis::{StopwordError, UnknownTag};
use crate::assessment::UnknownProfile;
use crate::config::ConfigError;
use crate::session::{InputError, RecordError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Analysis(StopwordError),
    Input(InputError),
    Record(RecordError),
    UnknownProfile(UnknownProfile),
    UnknownTag(UnknownTag),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Analysis(err) => write!(f, "text analysis unavailable: {}", err),
            AppError::Input(err) => write!(f, "invalid assessment input: {}", err),
            AppError::Record(err) => write!(f, "record error: {}", err),
            AppError::UnknownProfile(err) => write!(f, "invalid recommendation input: {}", err),
            AppError::UnknownTag(err) => write!(f, "invalid recommendation input: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Analysis(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Record(err) => Some(err),
            AppError::UnknownProfile(err) => Some(err),
            AppError::UnknownTag(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Input(_) | AppError::UnknownProfile(_) | AppError::UnknownTag(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Analysis(_)
            | AppError::Record(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<StopwordError> for AppError {
    fn from(value: StopwordError) -> Self {
        Self::Analysis(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<RecordError> for AppError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<UnknownProfile> for AppError {
    fn from(value: UnknownProfile) -> Self {
        Self::UnknownProfile(value)
    }
}

impl From<UnknownTag> for AppError {
    fn from(value: UnknownTag) -> Self {
        Self::UnknownTag(value)
    }
}
