use cairn_graphhopper::point::GeoPoint;

use crate::validate::NavigateError;

/// Path prefix of the navigation compatibility endpoint:
/// `/navigate/directions/v5/gh/{profile}/{lon,lat;lon,lat;...}`.
pub const NAVIGATE_BASE_PATH: &str = "/navigate/directions/v5/gh/";

/// The profile segment sits directly after the base path.
pub fn profile_from_path(path: &str) -> Result<&str, NavigateError> {
    let rest = path
        .strip_prefix(NAVIGATE_BASE_PATH)
        .ok_or_else(|| NavigateError::IncorrectUrl(path.to_string()))?;

    match rest.split_once('/') {
        Some((profile, _)) => Ok(profile),
        None => Ok(rest),
    }
}

/// Waypoints are the final path segment: `lon,lat` pairs joined by `;`,
/// swapped into lat/lon on parse.
pub fn waypoints_from_path(path: &str) -> Result<Vec<GeoPoint>, NavigateError> {
    let coordinates = match path.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => path,
    };

    coordinates
        .split(';')
        .map(|pair| {
            let (lon, lat) = pair
                .split_once(',')
                .ok_or_else(|| NavigateError::InvalidPoint(pair.to_string()))?;

            let lon: f64 = lon
                .parse()
                .map_err(|_| NavigateError::InvalidPoint(pair.to_string()))?;
            let lat: f64 = lat
                .parse()
                .map_err(|_| NavigateError::InvalidPoint(pair.to_string()))?;

            Ok(GeoPoint::new(lat, lon))
        })
        .collect()
}
