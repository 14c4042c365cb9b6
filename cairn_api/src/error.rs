use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cairn_graphhopper::client::RouteClientError;
use cairn_navigation::validate::NavigateError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
}

impl From<NavigateError> for ApiError {
    fn from(error: NavigateError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<RouteClientError> for ApiError {
    fn from(error: RouteClientError) -> Self {
        match error {
            RouteClientError::InvalidRequest(inner) => ApiError::BadRequest(inner.to_string()),
            other => ApiError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}
