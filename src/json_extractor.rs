//! JSON telemetry extractor
//!
//! Files written with `--telemetry-format=json` hold a single object keyed
//! by the same labels as the text report.

use crate::error::ExtractError;
use crate::schema::{Metric, Record};
use serde_json::{Map, Value};

const KEY_GENERATION: &str = "Final Generation";
const KEY_DURATION: &str = "Gen Duration";
const KEY_ATTEMPTED: &str = "Mutations Attempted";
const KEY_APPLIED: &str = "Mutations Applied";
const KEY_INSTANCES: &str = "Instances";

/// Extract a record from JSON-format content.
///
/// Fails only when the content is not valid JSON or is not an object.
/// Numbers are kept as written (`5.0` stays a float, `40` an integer).
/// Missing or non-numeric keys leave fields absent, except
/// `instance_count` which is the size of `Instances` and falls back to `0`.
pub fn extract_json(content: &str) -> Result<Record, ExtractError> {
    let value: Value = serde_json::from_str(content)?;
    let obj = value.as_object().ok_or(ExtractError::NotAnObject)?;
    Ok(record_from_object(obj))
}

fn record_from_object(obj: &Map<String, Value>) -> Record {
    Record {
        generation: number(obj, KEY_GENERATION),
        duration_ms: number(obj, KEY_DURATION),
        mutations_attempted: number(obj, KEY_ATTEMPTED),
        mutations_applied: number(obj, KEY_APPLIED),
        instance_count: Some(instance_count(obj)),
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<Metric> {
    match obj.get(key)? {
        Value::Number(n) => Some(Metric::from(n)),
        _ => None,
    }
}

// Element count of an array, object or string; anything else is 0.
fn instance_count(obj: &Map<String, Value>) -> u64 {
    let len = match obj.get(KEY_INSTANCES) {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        Some(Value::String(s)) => s.chars().count(),
        _ => 0,
    };
    len as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_object() {
        let content = r#"{"Final Generation": 5, "Gen Duration": 12.5, "Mutations Attempted": 100, "Mutations Applied": 7, "Instances": [1,2,3]}"#;
        let record = extract_json(content).unwrap();
        assert_eq!(
            record,
            Record {
                generation: Some(Metric::Int(5)),
                duration_ms: Some(Metric::Float(12.5)),
                mutations_attempted: Some(Metric::Int(100)),
                mutations_applied: Some(Metric::Int(7)),
                instance_count: Some(3),
            }
        );
    }

    #[test]
    fn test_missing_instances_is_zero_not_absent() {
        let record = extract_json(r#"{"Final Generation": 5}"#).unwrap();
        assert_eq!(record.generation, Some(Metric::Int(5)));
        assert_eq!(record.duration_ms, None);
        assert_eq!(record.mutations_attempted, None);
        assert_eq!(record.mutations_applied, None);
        assert_eq!(record.instance_count, Some(0));
    }

    #[test]
    fn test_numbers_keep_their_written_shape() {
        let content = r#"{"Final Generation": 5.0, "Gen Duration": 40, "Mutations Attempted": 1e2, "Instances": {"a": 1, "b": 2}}"#;
        let record = extract_json(content).unwrap();
        assert_eq!(record.generation, Some(Metric::Float(5.0)));
        assert_eq!(record.duration_ms, Some(Metric::Int(40)));
        assert_eq!(record.mutations_attempted, Some(Metric::Float(100.0)));
        assert_eq!(record.mutations_applied, None);
        assert_eq!(record.instance_count, Some(2));
        assert_eq!(
            crate::report::render_row(&record),
            "5.0\t40\t100.0\tNone\t2"
        );
    }

    #[test]
    fn test_negative_count_is_kept() {
        let record = extract_json(r#"{"Mutations Applied": -1}"#).unwrap();
        assert_eq!(record.mutations_applied, Some(Metric::Negative(-1)));
    }

    #[test]
    fn test_instances_size_by_type() {
        let count = |json: &str| extract_json(json).unwrap().instance_count;
        assert_eq!(count(r#"{"Instances": [{"id": 1}, null, "x", [1, 2]]}"#), Some(4));
        assert_eq!(count(r#"{"Instances": {"a": 1}}"#), Some(1));
        assert_eq!(count(r#"{"Instances": "abc"}"#), Some(3));
        assert_eq!(count(r#"{"Instances": []}"#), Some(0));
        assert_eq!(count(r#"{"Instances": null}"#), Some(0));
        assert_eq!(count(r#"{"Instances": 7}"#), Some(0));
        assert_eq!(count(r#"{"Instances": true}"#), Some(0));
    }

    #[test]
    fn test_non_numeric_values_are_absent() {
        let record = extract_json(r#"{"Final Generation": "5", "Gen Duration": null}"#).unwrap();
        assert_eq!(record.generation, None);
        assert_eq!(record.duration_ms, None);
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = extract_json("{not json").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
    }

    #[test]
    fn test_non_object_fails() {
        let err = extract_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExtractError::NotAnObject));
        assert_eq!(err.to_string(), "expected a JSON object at the top level");
    }
}
