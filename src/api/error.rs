use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::dtos::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("command not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[derive(Debug, Serialize)]
struct ValidationProblem {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'static str,
    status: u16,
    errors: ValidationErrors,
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'static str,
    status: u16,
    detail: &'static str,
}

fn problem_json(status: StatusCode, payload: impl Serialize) -> Response {
    let mut response = (status, Json(payload)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/problem+json"),
    );
    response
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(errors) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                problem_json(
                    status,
                    ValidationProblem {
                        kind: "https://tools.ietf.org/html/rfc4918#section-11.2",
                        title: "One or more validation errors occurred.",
                        status: status.as_u16(),
                        errors,
                    },
                )
            }
            ApiError::Internal(err) => {
                let message = format!("{:#}", err);
                error!(error = %message, "request failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                problem_json(
                    status,
                    ProblemDetails {
                        kind: "https://tools.ietf.org/html/rfc9110#section-15.6.1",
                        title: "An error occurred while processing your request.",
                        status: status.as_u16(),
                        detail: "internal server error",
                    },
                )
            }
        }
    }
}
