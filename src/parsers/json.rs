//! JSON-array log reader.
//!
//! Format: a top-level array of flat objects, one object per frame.
//! Malformed JSON, or JSON whose top level is not an array, yields an empty
//! log rather than an error.

use serde_json::Value;

use super::trim_padding;
use super::types::{Parseable, ParseResult, RawRecord, SensorFrame};
use crate::normalize::normalize_row;

/// JSON array log reader
pub struct JsonArray;

impl JsonArray {
    /// Detect if text opens like JSON (`[` or `{` after leading whitespace)
    pub fn detect(contents: &str) -> bool {
        matches!(trim_padding(contents).chars().next(), Some('[' | '{'))
    }
}

impl Parseable for JsonArray {
    fn parse(&self, text: &str) -> ParseResult {
        let elements = match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(elements)) => elements,
            Ok(other) => {
                tracing::debug!("JSON log top level is not an array: {}", json_kind(&other));
                return ParseResult::empty();
            }
            Err(e) => {
                tracing::debug!("Malformed JSON log: {}", e);
                return ParseResult::empty();
            }
        };

        let frames: Vec<SensorFrame> = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let raw = match element {
                    Value::Object(map) => RawRecord::from(map),
                    other => {
                        tracing::debug!(
                            "JSON log element {} is {}, not an object",
                            index,
                            json_kind(&other)
                        );
                        RawRecord::new()
                    }
                };
                normalize_row(raw, index)
            })
            .collect();

        tracing::info!("Parsed JSON log: {} frames", frames.len());

        ParseResult::from_frames(frames)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_json() {
        assert!(JsonArray::detect("[]"));
        assert!(JsonArray::detect("  \n{\"rpm\": 1}"));
        assert!(!JsonArray::detect("rpm,map"));
        assert!(!JsonArray::detect(""));
    }

    #[test]
    fn test_parse_json_log() {
        let sample = r#"[
            {"timestamp_ms": 0, "rpm": 850, "map": 35, "clt": 80},
            {"timestamp_ms": 20, "RPM": "900", "MAP": 36.5, "Coolant": 80.5},
            {"timestamp_ms": 40, "rpm": 950, "afr": 14.7, "volt": 13.9}
        ]"#;

        let log = JsonArray.parse(sample);

        assert_eq!(log.frames.len(), 3);
        assert_eq!(log.frames[0].rpm, 850.0);
        assert_eq!(log.frames[0].coolant_temp, 80.0);
        assert_eq!(log.frames[1].rpm, 900.0);
        assert_eq!(log.frames[1].manifold_pressure, 36.5);
        assert_eq!(log.frames[1].coolant_temp, 80.5);
        assert_eq!(log.frames[2].air_fuel_ratio, 14.7);
        assert_eq!(log.frames[2].battery_voltage, 13.9);
        assert_eq!(log.frames[1].timestamp_ms, 20);
        assert_eq!(log.duration_ms, 40);
    }

    #[test]
    fn test_malformed_json_is_empty() {
        let log = JsonArray.parse("{not valid");
        assert_eq!(log, ParseResult::empty());

        let log = JsonArray.parse("[{\"rpm\": 1},");
        assert!(log.is_empty());
    }

    #[test]
    fn test_bare_object_is_empty() {
        let log = JsonArray.parse(r#"{"rpm": 1000, "timestamp_ms": 10}"#);
        assert!(log.is_empty());
        assert_eq!(log.duration_ms, 0);
    }

    #[test]
    fn test_out_of_range_number_only_zeroes_its_field() {
        let log = JsonArray.parse(
            r#"[{"timestamp_ms": 10, "rpm": 1e400, "map": 40}, {"timestamp_ms": 20, "rpm": 900}]"#,
        );

        assert_eq!(log.frames.len(), 2);
        assert_eq!(log.frames[0].rpm, 0.0);
        assert_eq!(log.frames[0].manifold_pressure, 40.0);
        assert_eq!(log.frames[0].timestamp_ms, 10);
        assert_eq!(log.frames[1].rpm, 900.0);
        assert_eq!(log.duration_ms, 20);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(JsonArray.parse("[]"), ParseResult::empty());
    }

    #[test]
    fn test_non_object_elements_normalize_to_zero() {
        let log = JsonArray.parse(r#"[{"rpm": 1000}, 42, null, {"rpm": 2000}]"#);

        assert_eq!(log.frames.len(), 4);
        assert_eq!(log.frames[1].rpm, 0.0);
        assert!(log.frames[1].raw.is_empty());
        assert_eq!(log.frames[2].index, 2);
        assert_eq!(log.frames[3].rpm, 2000.0);
    }

    #[test]
    fn test_key_order_preserved_in_raw() {
        let log = JsonArray.parse(r#"[{"zeta": 1, "alpha": 2, "Rpm": 3}]"#);
        let keys: Vec<&String> = log.frames[0].raw.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, ["zeta", "alpha", "Rpm"]);
        assert_eq!(log.frames[0].raw.get("alpha"), Some(&json!(2)));
    }

    #[test]
    fn test_case_collision_uses_later_key() {
        let log = JsonArray.parse(r#"[{"Timestamp_MS": 100, "timestamp_ms": 250}]"#);
        assert_eq!(log.frames[0].timestamp_ms, 250);
    }
}
