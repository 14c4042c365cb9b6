use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::Uri;
use cairn_graphhopper::client::RoutingEngine;
use cairn_graphhopper::request::RouteRequest;
use cairn_navigation::bearings::parse_bearing_list;
use cairn_navigation::path::{profile_from_path, waypoints_from_path};
use cairn_navigation::validate::validate_navigate_request;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{error::ApiError, state::AppState};

fn default_geometries() -> String {
    String::from("polyline6")
}

fn default_voice_units() -> String {
    String::from("metric")
}

fn default_overview() -> String {
    String::from("simplified")
}

fn default_language() -> String {
    String::from("en")
}

#[derive(Deserialize)]
pub struct NavigateParams {
    #[serde(default = "default_geometries")]
    pub geometries: String,
    #[serde(default)]
    pub bearings: String,
    #[serde(default)]
    pub steps: bool,
    #[serde(default)]
    pub voice_instructions: bool,
    #[serde(default)]
    pub banner_instructions: bool,
    #[serde(default)]
    pub roundabout_exits: bool,
    #[serde(default = "default_voice_units")]
    pub voice_units: String,
    #[serde(default = "default_overview")]
    pub overview: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Also the profile path segment; the two must agree.
    pub profile: String,
}

pub async fn navigate_handler<E: RoutingEngine + 'static>(
    State(state): State<Arc<AppState<E>>>,
    uri: Uri,
    Query(params): Query<NavigateParams>,
) -> Result<Json<Value>, ApiError> {
    let path = uri.path();
    let waypoints = waypoints_from_path(path)?;
    let path_profile = profile_from_path(path)?;

    validate_navigate_request(
        &params.geometries,
        &params.bearings,
        waypoints.len(),
        path_profile,
        &params.profile,
    )?;

    debug!(
        steps = params.steps,
        voice_instructions = params.voice_instructions,
        banner_instructions = params.banner_instructions,
        roundabout_exits = params.roundabout_exits,
        voice_units = %params.voice_units,
        overview = %params.overview,
        "navigate request for {} waypoints",
        waypoints.len()
    );

    let headings: Vec<f64> = parse_bearing_list(&params.bearings)
        .iter()
        .map(|slot| slot.unwrap_or(f64::NAN))
        .collect();

    let mut request = RouteRequest {
        points: waypoints,
        profile: params.profile.clone(),
        locale: state.translations.resolve_locale(&params.language),
        headings,
        ..RouteRequest::default()
    };
    request.hints.put("instructions", params.steps);

    let response = state.engine.route(&request).await?;

    Ok(Json(response))
}
