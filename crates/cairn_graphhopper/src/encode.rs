use serde_json::{Map, Value};
use url::{Url, form_urlencoded};

use crate::{
    client::RouteClient,
    request::RouteRequest,
    validate::{RequestError, TransportMode, validate},
};

impl RouteClient {
    /// Builds the GET form of a route request. Parameter order is fixed:
    /// `profile`, one `point` per waypoint, the nine fixed keys, one
    /// `heading` per heading, then residual hints in insertion order.
    pub fn create_get_request(&self, request: &RouteRequest) -> Result<Url, RequestError> {
        let instructions = self.instructions_for(request);
        let calc_points = self.calc_points_for(request);
        validate(request, TransportMode::Get, instructions, calc_points)?;

        let mut url = format!(
            "{}?profile={}",
            self.params.route_service_url,
            encode(&request.profile)
        );

        for point in &request.points {
            url.push_str(&format!("&point={:?},{:?}", point.lat, point.lon));
        }

        url.push_str("&type=json");
        url.push_str(&format!("&instructions={instructions}"));
        url.push_str(&format!(
            "&points_encoded={}",
            request.hints.points_encoded.unwrap_or(true)
        ));
        url.push_str(&format!(
            "&points_encoded_multiplier={}",
            request.hints.points_encoded_multiplier.unwrap_or(1_000_000)
        ));
        url.push_str(&format!("&calc_points={calc_points}"));
        url.push_str(&format!("&algorithm={}", encode(&request.algorithm)));
        url.push_str(&format!("&locale={}", encode(&request.locale)));
        url.push_str(&format!("&elevation={}", self.elevation_for(request)));
        url.push_str(&format!("&optimize={}", self.optimize_for(request)));

        for heading in &request.headings {
            url.push_str(&format!("&heading={heading:?}"));
        }

        for (key, value) in &request.hints.extra {
            url.push_str(&format!("&{}={}", encode(key), encode(&hint_text(value))));
        }

        Ok(Url::parse(&url)?)
    }

    /// Builds the POST body. Empty optional sequences are omitted, never
    /// emitted as empty arrays, and the `timeout` hint stays transport-only.
    pub fn request_to_json(&self, request: &RouteRequest) -> Result<Map<String, Value>, RequestError> {
        let instructions = self.instructions_for(request);
        let calc_points = self.calc_points_for(request);
        validate(request, TransportMode::Post, instructions, calc_points)?;

        let mut body = Map::new();
        body.insert("profile".to_string(), Value::from(request.profile.clone()));

        let points: Vec<Value> = request
            .points
            .iter()
            .map(|point| Value::from(point.to_lon_lat().to_vec()))
            .collect();
        body.insert("points".to_string(), Value::Array(points));

        insert_strings(&mut body, "point_hints", &request.point_hints);
        if !request.headings.is_empty() {
            body.insert("headings".to_string(), Value::from(request.headings.clone()));
        }
        insert_strings(&mut body, "curbsides", &request.curbsides);
        insert_strings(&mut body, "snap_preventions", &request.snap_preventions);
        insert_strings(&mut body, "details", &request.path_details);

        if let Some(custom_model) = &request.custom_model {
            body.insert("custom_model".to_string(), serde_json::to_value(custom_model)?);
        }

        body.insert("locale".to_string(), Value::from(request.locale.clone()));
        body.insert("instructions".to_string(), Value::from(instructions));
        body.insert("calc_points".to_string(), Value::from(calc_points));
        body.insert(
            "elevation".to_string(),
            Value::from(self.elevation_for(request)),
        );
        body.insert(
            "optimize".to_string(),
            Value::from(self.optimize_for(request)),
        );
        body.insert(
            "points_encoded".to_string(),
            Value::from(request.hints.points_encoded.unwrap_or(true)),
        );
        body.insert(
            "points_encoded_multiplier".to_string(),
            Value::from(request.hints.points_encoded_multiplier.unwrap_or(1_000_000)),
        );

        if !request.algorithm.is_empty() {
            body.insert(
                "algorithm".to_string(),
                Value::from(request.algorithm.clone()),
            );
        }

        for (key, value) in &request.hints.extra {
            body.insert(key.clone(), value.clone());
        }

        Ok(body)
    }

    fn instructions_for(&self, request: &RouteRequest) -> bool {
        request.hints.instructions.unwrap_or(self.params.instructions)
    }

    fn calc_points_for(&self, request: &RouteRequest) -> bool {
        request.hints.calc_points.unwrap_or(self.params.calc_points)
    }

    fn elevation_for(&self, request: &RouteRequest) -> bool {
        request.hints.elevation.unwrap_or(self.params.elevation)
    }

    fn optimize_for(&self, request: &RouteRequest) -> bool {
        request.hints.optimize.unwrap_or(self.params.optimize)
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Residual hint values render without JSON quoting in a query string.
fn hint_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn insert_strings(body: &mut Map<String, Value>, key: &str, values: &[String]) {
    if !values.is_empty() {
        body.insert(key.to_string(), Value::from(values.to_vec()));
    }
}
