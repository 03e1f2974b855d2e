//! Records returned by the second-brain API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of `GET /brain`
///
/// Text fields tolerate numbers and `null`; `tags` may also arrive as a JSON
/// array. Validation of `id` happens at reconcile time so that a bad record
/// is skipped instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub context: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub commits: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub project: Option<String>,
}

impl RemoteRecord {
    /// The record id if it is a positive integer (or a string holding one)
    pub fn valid_id(&self) -> Option<u64> {
        let n = match &self.id {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }?;
        (n > 0).then_some(n)
    }

    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or("")
    }
}

fn integral(f: f64) -> Option<u64> {
    (f.is_finite() && f.fract() == 0.0 && f > 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RemoteRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_ids() {
        assert_eq!(record(json!({"id": 7})).valid_id(), Some(7));
        assert_eq!(record(json!({"id": "12"})).valid_id(), Some(12));
        assert_eq!(record(json!({"id": 3.0})).valid_id(), Some(3));
        assert_eq!(record(json!({"id": " 5 "})).valid_id(), Some(5));
    }

    #[test]
    fn test_invalid_ids() {
        let invalid = [
            json!(0),
            json!(-4),
            json!(1.5),
            json!("abc"),
            json!(""),
            json!(null),
            json!(true),
        ];
        for id in invalid {
            assert_eq!(record(json!({ "id": id })).valid_id(), None, "{}", id);
        }
        assert_eq!(record(json!({})).valid_id(), None);
    }

    #[test]
    fn test_lenient_fields() {
        let r = record(json!({
            "id": 1,
            "title": 2024,
            "tags": ["a", "b"],
            "context": null,
            "project": "folio"
        }));
        assert_eq!(r.title.as_deref(), Some("2024"));
        assert_eq!(r.tags.as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(r.context, None);
        assert_eq!(r.commits, None);
        assert_eq!(r.project_name(), "folio");
    }
}
