//! Whole-project JSON codec.

use serde_json::Value;

use takelog_types::{locale_cmp, now_iso, Project, ProjectId, ProjectView, TakeRow};

use super::InterchangeError;

/// Name used when an imported project has none.
pub const IMPORTED_PROJECT_NAME: &str = "Imported project";

/// Pretty-printed project JSON.
pub fn encode(project: ProjectView<'_>) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string_pretty(&project)?)
}

/// Decode a project, tolerating missing or mistyped fields.
///
/// The payload must be a JSON object. `rows` that is absent or not an array
/// becomes empty, and individual rows that do not decode are dropped.
pub fn decode(text: &str) -> Result<Project, InterchangeError> {
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))?;
    let Value::Object(mut map) = value else {
        return Err(InterchangeError::Malformed("expected a JSON object".into()));
    };

    let string_field = |map: &serde_json::Map<String, Value>, key: &str| {
        map.get(key).and_then(Value::as_str).map(str::to_string)
    };

    let name = string_field(&map, "name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| IMPORTED_PROJECT_NAME.to_string());
    let id = string_field(&map, "id").map(ProjectId::new).unwrap_or_else(ProjectId::generate);
    let created_at = string_field(&map, "createdAt").unwrap_or_else(now_iso);
    let updated_at = string_field(&map, "updatedAt").unwrap_or_else(now_iso);

    let mut rows: Vec<TakeRow> = match map.remove("rows") {
        Some(Value::Array(items)) => {
            let total = items.len();
            let rows = decode_rows(items);
            log::info!(target: "interchange", "decoded {}/{} json rows", rows.len(), total);
            rows
        }
        Some(other) => {
            log::warn!(target: "interchange", "`rows` is not an array ({}), importing none", kind(&other));
            Vec::new()
        }
        None => Vec::new(),
    };
    rows.sort_by(|a, b| locale_cmp(&a.file_no, &b.file_no));

    Ok(Project {
        id,
        name,
        created_at,
        updated_at,
        rows,
    })
}

/// Decode rows one at a time, dropping (and logging) the ones that fail.
pub(crate) fn decode_rows(items: Vec<Value>) -> Vec<TakeRow> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!(target: "interchange", "dropping undecodable row: {}", e);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takelog_types::TakeStatus;

    #[test]
    fn non_object_is_malformed() {
        assert!(matches!(decode("\"not an object\""), Err(InterchangeError::Malformed(_))));
        assert!(matches!(decode("[1,2]"), Err(InterchangeError::Malformed(_))));
        assert!(matches!(decode("not json at all"), Err(InterchangeError::Malformed(_))));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let p = decode(r#"{"rows": "nope"}"#).unwrap();
        assert_eq!(p.name, IMPORTED_PROJECT_NAME);
        assert!(p.rows.is_empty());
        assert!(!p.id.as_str().is_empty());

        let p = decode(r#"{"name": 42}"#).unwrap();
        assert_eq!(p.name, IMPORTED_PROJECT_NAME);
    }

    #[test]
    fn bad_rows_are_dropped() {
        let p = decode(
            r#"{"name":"Forest","rows":[
                {"id":"b","fileNo":"241016_002","status":"NG"},
                "garbage",
                {"id":"a","fileNo":"241016_001","status":"WHAT"},
                {"id":"c","fileNo":"241016_000"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(p.name, "Forest");
        let ids: Vec<&str> = p.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
        assert_eq!(p.rows[1].status, TakeStatus::Ng);
    }

    #[test]
    fn structural_round_trip() {
        let mut project = Project::new("Forest");
        project.rows = decode(r#"{"rows":[{"id":"r1","fileNo":"241016_001","sceneNo":"2a","cutNo":"only","takeNo":"1","status":"OK","mics":["Boom"],"note":"x"}]}"#)
            .unwrap()
            .rows;
        let json = encode(ProjectView::from(&project)).unwrap();
        let back = decode(&json).unwrap();
        assert_eq!(back, project);
    }
}
