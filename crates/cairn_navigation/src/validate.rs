use thiserror::Error;

use crate::bearings::parse_bearing_list;

/// The only geometry encoding the navigation surface serves.
pub const SUPPORTED_GEOMETRIES: &str = "polyline6";

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("Geometry format '{0}' is not supported, use polyline6")]
    UnsupportedGeometries(String),

    #[error("Number of bearings and waypoints did not match: got {bearings} bearings for {waypoints} waypoints")]
    BearingWaypointMismatch { bearings: usize, waypoints: usize },

    #[error("Incorrect URL {0}")]
    IncorrectUrl(String),

    #[error("Cannot parse point '{0}'")]
    InvalidPoint(String),
}

/// Checks run in a fixed order so the first failure reported is stable:
/// geometry format, then bearing count, then URL/profile agreement.
pub fn validate_navigate_request(
    geometries: &str,
    bearings: &str,
    waypoint_count: usize,
    path_profile: &str,
    profile: &str,
) -> Result<(), NavigateError> {
    if geometries != SUPPORTED_GEOMETRIES {
        return Err(NavigateError::UnsupportedGeometries(geometries.to_string()));
    }

    let bearing_count = parse_bearing_list(bearings).len();
    if bearing_count != 0 && bearing_count != waypoint_count {
        return Err(NavigateError::BearingWaypointMismatch {
            bearings: bearing_count,
            waypoints: waypoint_count,
        });
    }

    if path_profile != profile {
        return Err(NavigateError::IncorrectUrl(format!(
            "path says '{path_profile}', parameter says '{profile}'"
        )));
    }

    Ok(())
}
