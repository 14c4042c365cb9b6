use std::fmt;

use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Client-supplied cost adjustments evaluated by the remote engine.
///
/// Statement order inside `priority` and `speed` is the evaluation order and
/// survives (de)serialization untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomModel {
    /// Outer `None` keeps the field off the wire entirely; `Some(None)` is
    /// an explicit JSON null, which the engine treats differently from an
    /// absent value.
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_influence: Option<Option<f64>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub heading_penalty: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<FeatureCollection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<Statement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speed: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LimitTo,
    MultiplyBy,
}

impl Op {
    pub const fn key(self) -> &'static str {
        match self {
            Op::LimitTo => "limit_to",
            Op::MultiplyBy => "multiply_by",
        }
    }
}

/// One conditional rule: `{"if": <condition>, "<op>": <value>}` on the wire.
/// Values stay text because they may be symbolic as well as numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub condition: String,
    pub op: Op,
    pub value: String,
}

impl Statement {
    pub fn new(condition: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            op,
            value: value.into(),
        }
    }
}

impl Serialize for Statement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("if", &self.condition)?;
        map.serialize_entry(self.op.key(), &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StatementVisitor)
    }
}

const STATEMENT_KEYS: &[&str] = &["if", "limit_to", "multiply_by"];

struct StatementVisitor;

impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a statement object with an \"if\" condition and one operation")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut condition = None;
        let mut operation: Option<(Op, String)> = None;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "if" => condition = Some(access.next_value::<String>()?),
                "limit_to" => operation = Some((Op::LimitTo, value_text(access.next_value()?))),
                "multiply_by" => {
                    operation = Some((Op::MultiplyBy, value_text(access.next_value()?)))
                }
                other => return Err(de::Error::unknown_field(other, STATEMENT_KEYS)),
            }
        }

        let condition = condition.ok_or_else(|| de::Error::missing_field("if"))?;
        let (op, value) = operation
            .ok_or_else(|| de::Error::custom("statement without limit_to or multiply_by"))?;

        Ok(Statement {
            condition,
            op,
            value,
        })
    }
}

/// Operation values may arrive as JSON numbers; the model keeps them as text.
fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Builds an area feature with the wire shape the engine expects: string id,
/// empty properties, a single polygon ring closed by repeating the first
/// position. An open ring is closed here.
pub fn closed_polygon_area(id: &str, ring: &[[f64; 2]]) -> Feature {
    let mut positions: Vec<Vec<f64>> = ring.iter().map(|position| position.to_vec()).collect();
    if !positions.is_empty() && positions.first() != positions.last() {
        let first = positions[0].clone();
        positions.push(first);
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Polygon(vec![positions]))),
        id: Some(Id::String(id.to_string())),
        properties: Some(Map::new()),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn motorway_model() -> CustomModel {
        let area_1 = closed_polygon_area(
            "area_1",
            &[
                [48.019324184801185, 11.28021240234375],
                [48.019324184801185, 11.53564453125],
                [48.11843396091691, 11.53564453125],
                [48.11843396091691, 11.28021240234375],
            ],
        );
        let area_2 = closed_polygon_area(
            "area_2",
            &[
                [48.15509285476017, 11.53289794921875],
                [48.15509285476017, 11.8212890625],
                [48.281365151571755, 11.8212890625],
                [48.281365151571755, 11.53289794921875],
            ],
        );

        CustomModel {
            distance_influence: Some(Some(69.0)),
            heading_penalty: Some(Some(22.0)),
            areas: Some(FeatureCollection {
                bbox: None,
                features: vec![area_1, area_2],
                foreign_members: None,
            }),
            priority: vec![
                Statement::new("surface == DIRT", Op::MultiplyBy, "0.7"),
                Statement::new("surface == SAND", Op::MultiplyBy, "0.6"),
            ],
            speed: vec![Statement::new("road_class == MOTORWAY", Op::LimitTo, "80")],
        }
    }

    #[test]
    fn serializes_wire_format() {
        let json = serde_json::to_value(motorway_model()).unwrap();

        let expected = json!({
            "distance_influence": 69.0,
            "heading_penalty": 22.0,
            "areas": {
                "type": "FeatureCollection",
                "features": [
                    {
                        "id": "area_1",
                        "type": "Feature",
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[
                                [48.019324184801185, 11.28021240234375],
                                [48.019324184801185, 11.53564453125],
                                [48.11843396091691, 11.53564453125],
                                [48.11843396091691, 11.28021240234375],
                                [48.019324184801185, 11.28021240234375],
                            ]]
                        },
                        "properties": {}
                    },
                    {
                        "id": "area_2",
                        "type": "Feature",
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[
                                [48.15509285476017, 11.53289794921875],
                                [48.15509285476017, 11.8212890625],
                                [48.281365151571755, 11.8212890625],
                                [48.281365151571755, 11.53289794921875],
                                [48.15509285476017, 11.53289794921875],
                            ]]
                        },
                        "properties": {}
                    }
                ]
            },
            "priority": [
                { "if": "surface == DIRT", "multiply_by": "0.7" },
                { "if": "surface == SAND", "multiply_by": "0.6" },
            ],
            "speed": [
                { "if": "road_class == MOTORWAY", "limit_to": "80" },
            ]
        });

        assert_eq!(json, expected);
    }

    #[test]
    fn statement_order_round_trips() {
        let model = motorway_model();
        let text = serde_json::to_string(&model).unwrap();
        let parsed: CustomModel = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, model);
        assert_eq!(parsed.priority[0].condition, "surface == DIRT");
        assert_eq!(parsed.priority[1].condition, "surface == SAND");
        assert_eq!(parsed.speed.len(), 1);
        assert_eq!(parsed.speed[0].op, Op::LimitTo);
    }

    #[test]
    fn explicit_null_distance_influence_is_preserved() {
        let model: CustomModel = serde_json::from_str(r#"{"distance_influence": null}"#).unwrap();

        assert_eq!(model.distance_influence, Some(None));
        assert_eq!(model.heading_penalty, None);
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "distance_influence": null })
        );
    }

    #[test]
    fn missing_fields_are_absent() {
        let model: CustomModel = serde_json::from_str("{}").unwrap();

        assert_eq!(model, CustomModel::default());
        assert_eq!(serde_json::to_value(&model).unwrap(), json!({}));
    }

    #[test]
    fn numeric_statement_values_become_text() {
        let model: CustomModel = serde_json::from_str(
            r#"{"priority": [{"if": "surface == DIRT", "multiply_by": 0.7}], "speed": [{"if": "max_speed < 30", "limit_to": 25}]}"#,
        )
        .unwrap();

        assert_eq!(model.priority[0].value, "0.7");
        assert_eq!(model.speed[0].value, "25");
    }

    #[test]
    fn empty_area_collection_round_trips() {
        let model = CustomModel {
            areas: Some(FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            }),
            ..CustomModel::default()
        };

        let text = serde_json::to_string(&model).unwrap();
        let parsed: CustomModel = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed.areas.unwrap().features.len(), 0);
    }

    #[test]
    fn open_rings_are_closed() {
        let feature = closed_polygon_area("a", &[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let geometry = feature.geometry.unwrap();

        match geometry.value {
            geojson::Value::Polygon(rings) => {
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }
}
