use thiserror::Error;

use crate::request::RouteRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Get,
    Post,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Custom models cannot be used for GET requests. Use setPostRequest(true)")]
    CustomModelWithGet,

    #[error(
        "Cannot calculate instructions without points (only points without instructions). Use calc_points=false and instructions=false to disable point and instruction calculations"
    )]
    InstructionsWithoutPoints,

    #[error("Invalid route endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Cross-field checks shared by both encoders, run before any encoding work.
/// `instructions` and `calc_points` are the effective values: the request
/// hint when set, otherwise the client default.
pub fn validate(
    request: &RouteRequest,
    mode: TransportMode,
    instructions: bool,
    calc_points: bool,
) -> Result<(), RequestError> {
    if request.custom_model.is_some() && mode == TransportMode::Get {
        return Err(RequestError::CustomModelWithGet);
    }

    if instructions && !calc_points {
        return Err(RequestError::InstructionsWithoutPoints);
    }

    Ok(())
}
