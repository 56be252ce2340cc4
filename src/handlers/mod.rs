use std::any::Any;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};

use crate::errors::Errors;
use crate::models::responses::DefaultResponse;
use crate::state::AppState;

pub mod customer;

pub async fn health(State(state): State<AppState>) -> Result<Response, Errors> {
    state.customers.ping().await?;

    Ok(DefaultResponse::ok("ok").into_json().into_response())
}

pub async fn fallback(method: Method, uri: Uri) -> Errors {
    Errors::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Answers methods a route does not define.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Errors {
    Errors::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Renders a handler panic as the regular error envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "internal server error".to_string()
    };

    Errors::Internal(message).into_response()
}
