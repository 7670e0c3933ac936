use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::error;

use crate::geo::GeoError;
use crate::preferences::PreferencesError;
use crate::validation::EnrollmentError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<GeoError> for ApiError {
    fn from(value: GeoError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl From<EnrollmentError> for ApiError {
    fn from(value: EnrollmentError) -> Self {
        match value {
            EnrollmentError::UnknownHoop(_) => ApiError::NotFound(value.to_string()),
            EnrollmentError::InvalidDuration
            | EnrollmentError::InvalidPlayerName
            | EnrollmentError::AlreadyEnded
            | EnrollmentError::ArrivalTooFar => ApiError::BadRequest(value.to_string()),
        }
    }
}

impl From<PreferencesError> for ApiError {
    fn from(value: PreferencesError) -> Self {
        match value {
            PreferencesError::InvalidZoom | PreferencesError::InvalidCoordinate { .. } => {
                ApiError::BadRequest(value.to_string())
            }
            PreferencesError::Io(_) | PreferencesError::Json(_) => {
                error!("Preferences error: {value}");
                ApiError::Internal("Failed to save preferences".into())
            }
        }
    }
}
