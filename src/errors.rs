use std::net::AddrParseError;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use validator::ValidationErrors;

use crate::logger::Logger;
use crate::models::responses::DefaultResponse;
use crate::repositories::RepositoryError;

/// Every failure a handler can forward. Rendered as
/// `{ "success": false, "message": ... }`.
#[derive(Debug, Error)]
pub enum Errors {
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Invalid(String),

    #[error("cannot {method} {path}")]
    NotFound { method: String, path: String },

    #[error("cannot {method} {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("{0}")]
    Internal(String),
}

impl Errors {
    /// Builds an input error from `(field, message)` pairs.
    pub fn new(errors: &[(&str, &str)]) -> Self {
        let message = errors
            .iter()
            .map(|(field, message)| format!("{} {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");

        Errors::Invalid(message)
    }

    pub fn into_string(errors: ValidationErrors) -> String {
        let mut messages = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, error.code),
                })
            })
            .collect::<Vec<_>>();

        // HashMap order is not stable
        messages.sort();
        messages.join(", ")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Errors::Repository(_) | Errors::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Errors::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Errors::NotFound { .. } => StatusCode::NOT_FOUND,
            Errors::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<ValidationErrors> for Errors {
    fn from(errors: ValidationErrors) -> Self {
        Errors::Invalid(Errors::into_string(errors))
    }
}

impl From<JsonRejection> for Errors {
    fn from(rejection: JsonRejection) -> Self {
        Errors::Invalid(rejection.body_text())
    }
}

impl From<PathRejection> for Errors {
    fn from(rejection: PathRejection) -> Self {
        Errors::Invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for Errors {
    fn from(rejection: QueryRejection) -> Self {
        Errors::Invalid(rejection.body_text())
    }
}

impl IntoResponse for Errors {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            Logger::new(format!("{:?}", self)).log();
        } else {
            Logger::new(message.as_str()).warn();
        }

        (status, DefaultResponse::error(message).into_json()).into_response()
    }
}

/// Failures that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid server address: {0}")]
    Address(#[from] AddrParseError),

    #[error("failed to connect to database: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("server error: {0}")]
    Server(#[from] hyper::Error),
}
