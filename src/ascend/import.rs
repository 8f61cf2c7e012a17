use serde_json::Value;
use std::collections::BTreeMap;

use super::record::clamp_score;

/// Parse an import payload into lower-cased skill name -> score in [0, 100].
///
/// Accepts a JSON object, a string holding a JSON object, or a flat
/// `Name:Value,Name:Value` string. Segments that cannot be read are skipped,
/// so a partially parsed map is a normal result.
pub fn parse_import(raw: &Value) -> BTreeMap<String, i32> {
    match raw {
        Value::Object(_) => parse_structured(raw),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => parse_structured(&decoded),
            _ => parse_flat(text),
        },
        _ => BTreeMap::new(),
    }
}

fn parse_structured(raw: &Value) -> BTreeMap<String, i32> {
    let Some(fields) = raw.as_object() else {
        return BTreeMap::new();
    };

    fields
        .iter()
        .filter_map(|(key, value)| {
            let score = score_from_value(value);
            if score.is_none() {
                log::debug!("Skipping import field {:?}: {}", key, value);
            }
            Some((normalize_key(key)?, clamp_score(score?)))
        })
        .collect()
}

fn parse_flat(text: &str) -> BTreeMap<String, i32> {
    text.split(',')
        .filter_map(|segment| {
            let parsed = parse_segment(segment);
            if parsed.is_none() && !segment.trim().is_empty() {
                log::debug!("Skipping malformed import segment {:?}", segment);
            }
            parsed
        })
        .collect()
}

fn parse_segment(segment: &str) -> Option<(String, i32)> {
    let (key, value) = segment.split_once(':')?;
    let score = value.trim().parse::<i64>().ok()?;
    Some((normalize_key(key)?, clamp_score(score)))
}

fn normalize_key(key: &str) -> Option<String> {
    let key = key.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// Integers, floats (truncated) and numeric strings count as scores.
pub fn score_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_string_clamps_and_skips_bad_values() {
        let parsed = parse_import(&json!("PVP:150,Unknown:50,Clutching:abc"));

        assert_eq!(parsed.get("pvp"), Some(&100));
        assert_eq!(parsed.get("unknown"), Some(&50));
        assert!(!parsed.contains_key("clutching"));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_flat_string_splits_on_first_colon_only() {
        let parsed = parse_import(&json!(" Block Placement : 77 ,Gamesense:1:2,nocolon"));

        assert_eq!(parsed.get("block placement"), Some(&77));
        assert!(!parsed.contains_key("gamesense"));
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_negative_scores_clamp_to_zero() {
        let parsed = parse_import(&json!("PVP:-20"));
        assert_eq!(parsed.get("pvp"), Some(&0));
    }

    #[test]
    fn test_structured_object() {
        let parsed = parse_import(&json!({"PVP": 81, "Clutching": "64", "Gamesense": 99.9, "Block Placement": null}));

        assert_eq!(parsed.get("pvp"), Some(&81));
        assert_eq!(parsed.get("clutching"), Some(&64));
        assert_eq!(parsed.get("gamesense"), Some(&99));
        assert!(!parsed.contains_key("block placement"));
    }

    #[test]
    fn test_string_holding_json_object_is_decoded_first() {
        let parsed = parse_import(&json!(r#"{"pvp": 120, "sumo": 5}"#));

        assert_eq!(parsed.get("pvp"), Some(&100));
        assert_eq!(parsed.get("sumo"), Some(&5));
    }

    #[test]
    fn test_unusable_payloads_yield_empty_map() {
        assert!(parse_import(&json!(42)).is_empty());
        assert!(parse_import(&json!(["PVP:10"])).is_empty());
        assert!(parse_import(&json!("")).is_empty());
        assert!(parse_import(&json!("[1,2]")).is_empty());
    }
}
