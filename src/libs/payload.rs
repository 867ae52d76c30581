use serde::Deserialize;
use serde_json::Value;

/// The fields of a response the client looks at. Everything else is kept
/// untyped and rendered as-is.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Summary {
    #[serde(default)]
    pub counter: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
}

impl Summary {
    pub fn of(payload: &Value) -> Summary {
        match payload {
            Value::Object(_) => Summary::deserialize(payload).unwrap_or_default(),
            _ => Summary::default(),
        }
    }

    /// `counter` when it is a number, else the server's `count`.
    pub fn total(&self) -> Option<&serde_json::Number> {
        match (&self.counter, &self.count) {
            (Some(Value::Number(n)), _) => Some(n),
            (_, Some(Value::Number(n))) => Some(n),
            _ => None,
        }
    }

    pub fn item_count(&self) -> Option<usize> {
        match &self.items {
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }
}

/// One row per element of `items` when it is an array, otherwise a single row
/// holding the whole payload.
pub fn render_rows(payload: &Value) -> Vec<String> {
    match payload.get("items") {
        Some(Value::Array(items)) => items.iter().map(Value::to_string).collect(),
        _ => vec![payload.to_string()],
    }
}

/// Text for the status line, e.g. `5 results`.
pub fn describe(payload: &Value) -> String {
    let summary = Summary::of(payload);
    match (summary.total(), summary.item_count()) {
        (Some(n), _) => format!("{} results", n),
        (_, Some(n)) => format!("{} results", n),
        _ => "1 result".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn items_render_one_row_each() {
        assert_eq!(render_rows(&json!({"items": [1, 2]})), vec!["1", "2"]);
    }

    #[test]
    fn object_items_are_serialized_compactly() {
        let payload = json!({"count": 1, "items": [{"id": 7, "name": "Red Apple"}]});
        assert_eq!(render_rows(&payload), vec![r#"{"id":7,"name":"Red Apple"}"#]);
    }

    #[test]
    fn payload_without_items_renders_whole_object() {
        assert_eq!(render_rows(&json!({"counter": 5})), vec![r#"{"counter":5}"#]);
    }

    #[test]
    fn non_array_items_render_whole_object() {
        let payload = json!({"items": "none"});
        assert_eq!(render_rows(&payload), vec![r#"{"items":"none"}"#]);
    }

    #[test]
    fn empty_items_render_nothing() {
        assert!(render_rows(&json!({"count": 0, "items": []})).is_empty());
    }

    #[test]
    fn non_object_payload_is_one_row() {
        assert_eq!(render_rows(&json!([1, 2])), vec!["[1,2]"]);
        assert_eq!(render_rows(&json!("text")), vec![r#""text""#]);
    }

    #[test]
    fn summary_reads_server_count() {
        let summary = Summary::of(&json!({"count": 2, "items": [1, 2]}));
        assert_eq!(summary.counter, None);
        assert_eq!(summary.total(), Some(&serde_json::Number::from(2)));
        assert_eq!(summary.item_count(), Some(2));
    }

    #[test]
    fn counter_wins_over_count() {
        let payload = json!({"counter": 5, "count": 3, "items": [1, 2]});
        assert_eq!(describe(&payload), "5 results");
        assert_eq!(describe(&json!({"counter": "many", "count": 3})), "3 results");
    }

    #[test]
    fn describe_prefers_counter() {
        assert_eq!(describe(&json!({"counter": 5})), "5 results");
        assert_eq!(describe(&json!({"items": [1, 2, 3]})), "3 results");
        assert_eq!(describe(&json!(null)), "1 result");
    }
}
