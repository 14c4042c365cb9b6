use serde_json::Value;

use crate::{custom_model::CustomModel, point::GeoPoint};

/// Extension hints attached to a route request. Recognized keys get typed
/// fields; anything else is kept verbatim in `extra`, in insertion order,
/// and travels to the server untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteHints {
    pub instructions: Option<bool>,
    pub calc_points: Option<bool>,
    pub elevation: Option<bool>,
    pub optimize: Option<bool>,
    pub points_encoded: Option<bool>,
    pub points_encoded_multiplier: Option<u64>,
    /// Connect timeout in milliseconds. Consumed by the transport layer,
    /// never serialized into a request.
    pub timeout: Option<u64>,
    pub extra: Vec<(String, Value)>,
}

impl RouteHints {
    /// Stores a raw key/value hint, dispatching recognized keys into their
    /// typed fields. An unrecognized key replaces an earlier entry with the
    /// same name in place, keeping the original position.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match key {
            "instructions" => self.instructions = value.as_bool(),
            "calc_points" => self.calc_points = value.as_bool(),
            "elevation" => self.elevation = value.as_bool(),
            "optimize" => self.optimize = value.as_bool(),
            "points_encoded" => self.points_encoded = value.as_bool(),
            "points_encoded_multiplier" => self.points_encoded_multiplier = value.as_u64(),
            "timeout" => self.timeout = value.as_u64(),
            _ => match self.extra.iter_mut().find(|(name, _)| name == key) {
                Some((_, existing)) => *existing = value,
                None => self.extra.push((key.to_string(), value)),
            },
        }
    }
}

/// One route query against the remote engine. Built by the caller, handed
/// immutably to the validator and encoders, and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub points: Vec<GeoPoint>,
    pub profile: String,
    pub locale: String,
    pub algorithm: String,
    /// One heading per waypoint when present; NaN marks a waypoint without
    /// a heading preference.
    pub headings: Vec<f64>,
    pub point_hints: Vec<String>,
    pub curbsides: Vec<String>,
    pub snap_preventions: Vec<String>,
    pub path_details: Vec<String>,
    pub custom_model: Option<CustomModel>,
    pub hints: RouteHints,
}

impl Default for RouteRequest {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            profile: String::new(),
            locale: String::from("en_US"),
            algorithm: String::new(),
            headings: Vec::new(),
            point_hints: Vec::new(),
            curbsides: Vec::new(),
            snap_preventions: Vec::new(),
            path_details: Vec::new(),
            custom_model: None,
            hints: RouteHints::default(),
        }
    }
}

impl RouteRequest {
    pub fn between(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            points: vec![start, end],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_dispatches_recognized_keys() {
        let mut hints = RouteHints::default();
        hints.put("instructions", false);
        hints.put("timeout", 5000);
        hints.put("ch.disable", true);

        assert_eq!(hints.instructions, Some(false));
        assert_eq!(hints.timeout, Some(5000));
        assert_eq!(hints.extra, vec![(String::from("ch.disable"), json!(true))]);
    }

    #[test]
    fn put_replaces_residual_keys_in_place() {
        let mut hints = RouteHints::default();
        hints.put("block_area", "a");
        hints.put("ch.disable", true);
        hints.put("block_area", "b");

        assert_eq!(
            hints.extra,
            vec![
                (String::from("block_area"), json!("b")),
                (String::from("ch.disable"), json!(true)),
            ]
        );
    }

    #[test]
    fn default_locale_is_en_us() {
        assert_eq!(RouteRequest::default().locale, "en_US");
    }
}
