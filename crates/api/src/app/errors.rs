use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use stockflow_core::{DomainError, DomainResult, Outcome};

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::SkuNotPresent { .. } | DomainError::InsufficientStock(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
    }
}

/// Map a domain result onto `{ success, message }` with a matching status.
pub fn outcome_response<T: core::fmt::Display>(result: DomainResult<T>) -> axum::response::Response {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    (status, Json(Outcome::from(result))).into_response()
}

/// Unwrap a JSON body, answering a rejected one in the `{ success, message }`
/// shape with the extractor's own status.
pub fn with_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    handle: impl FnOnce(T) -> Response,
) -> Response {
    match payload {
        Ok(Json(body)) => handle(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "request body rejected");
            (rejection.status(), Json(Outcome::failed(rejection.body_text()))).into_response()
        }
    }
}
