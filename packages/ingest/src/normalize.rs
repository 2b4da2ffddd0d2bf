//! Field-level normalization against a content schema.
//!
//! Every schema field ends up with a value: the foreign value when it can be
//! read as the field's kind, otherwise the registry default. Foreign fields the
//! schema does not declare are dropped.

use crate::dates::is_valid_date_text;
use broadsheet_schema::{Content, FieldKind, FieldSpec, DATE_SENTINEL};
use serde_json::{Map, Number, Value};

/// A date that had to be replaced by the sentinel
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DateNote {
    pub field: String,
    pub original: String,
}

pub(crate) fn normalize_fields(
    fields: &[FieldSpec],
    raw: &Map<String, Value>,
    path: &str,
    notes: &mut Vec<DateNote>,
) -> Content {
    fields
        .iter()
        .map(|spec| {
            let field_path = join_path(path, spec.name);
            let value = match raw.get(spec.name) {
                None | Some(Value::Null) => spec.default_value(),
                Some(value) => normalize_value(spec, value, &field_path, notes),
            };
            (spec.name.to_string(), value)
        })
        .collect()
}

fn normalize_value(
    spec: &FieldSpec,
    value: &Value,
    path: &str,
    notes: &mut Vec<DateNote>,
) -> Value {
    match spec.kind {
        FieldKind::String | FieldKind::Color | FieldKind::Url => as_text(value)
            .map(Value::String)
            .unwrap_or_else(|| spec.default_value()),

        FieldKind::Date => match value {
            Value::String(text) if is_valid_date_text(text) => value.clone(),
            other => {
                notes.push(DateNote {
                    field: path.to_string(),
                    original: as_text(other).unwrap_or_else(|| other.to_string()),
                });
                Value::String(DATE_SENTINEL.to_string())
            }
        },

        FieldKind::Number => as_number(value)
            .map(Value::Number)
            .unwrap_or_else(|| spec.default_value()),

        FieldKind::StringList => match value {
            Value::Array(items) => {
                Value::Array(items.iter().filter_map(as_text).map(Value::String).collect())
            }
            Value::String(single) => Value::Array(vec![Value::String(single.clone())]),
            _ => spec.default_value(),
        },

        FieldKind::StructList(item_fields) => match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        let item = item.as_object()?;
                        let item_path = format!("{}[{}]", path, i);
                        Some(Value::Object(normalize_fields(
                            item_fields,
                            item,
                            &item_path,
                            notes,
                        )))
                    })
                    .collect(),
            ),
            // A single sub-entity where a list is expected
            Value::Object(item) => Value::Array(vec![Value::Object(normalize_fields(
                item_fields,
                item,
                &format!("{}[0]", path),
                notes,
            ))]),
            _ => spec.default_value(),
        },
    }
}

/// Pull a flat sub-entity into a one-element list.
///
/// When a struct-list field is absent but fields that only exist on its items
/// appear at the top level (a single calendar event's `date`/`location`
/// instead of an `events` array), those item fields move into a new list. Item
/// fields that share a name with a top-level field move too, so the top level
/// falls back to its default for them.
pub(crate) fn lift_flat_entity(fields: &[FieldSpec], raw: &Map<String, Value>) -> Map<String, Value> {
    let mut lifted = raw.clone();

    for spec in fields {
        let item_fields = match spec.kind {
            FieldKind::StructList(item_fields) => item_fields,
            _ => continue,
        };
        if !matches!(raw.get(spec.name), None | Some(Value::Null)) {
            continue;
        }

        let has_exclusive_field = item_fields.iter().any(|item_field| {
            raw.contains_key(item_field.name)
                && !fields.iter().any(|top| top.name == item_field.name)
        });
        if !has_exclusive_field {
            continue;
        }

        let mut item = Map::new();
        for item_field in item_fields {
            if let Some(value) = lifted.remove(item_field.name) {
                item.insert(item_field.name.to_string(), value);
            }
        }
        lifted.insert(spec.name.to_string(), Value::Array(vec![Value::Object(item)]));
    }

    lifted
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadsheet_schema::{schema_for, BlockType};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_fields_get_defaults_and_extras_are_dropped() {
        let schema = schema_for(&BlockType::Button).unwrap();
        let raw = object(json!({ "text": "RSVP", "onClick": "alert(1)" }));

        let mut notes = Vec::new();
        let content = normalize_fields(schema.fields, &raw, "", &mut notes);

        assert_eq!(content["text"], json!("RSVP"));
        assert_eq!(content["url"], json!("#"));
        assert!(!content.contains_key("onClick"));
        assert_eq!(content.len(), schema.fields.len());
    }

    #[test]
    fn test_kind_coercion() {
        let schema = schema_for(&BlockType::DonationProgress).unwrap();
        let raw = object(json!({
            "goal": "5000",
            "raised": "12.5",
            "title": 2025,
            "barColor": { "r": 1 }
        }));

        let mut notes = Vec::new();
        let content = normalize_fields(schema.fields, &raw, "", &mut notes);

        assert_eq!(content["goal"], json!(5000));
        assert_eq!(content["raised"], json!(12.5));
        assert_eq!(content["title"], json!("2025"));
        assert_eq!(content["barColor"], json!("#16a34a"));
    }

    #[test]
    fn test_bad_dates_become_sentinel() {
        let schema = schema_for(&BlockType::Countdown).unwrap();
        let raw = object(json!({ "targetDate": "someday" }));

        let mut notes = Vec::new();
        let content = normalize_fields(schema.fields, &raw, "", &mut notes);

        assert_eq!(content["targetDate"], json!("TBD"));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].field, "targetDate");
    }

    #[test]
    fn test_struct_list_items_are_normalized() {
        let schema = schema_for(&BlockType::EventCard).unwrap();
        let raw = object(json!({
            "events": [
                { "title": "Gala", "date": "2025-10-01" },
                "not an event",
                { "title": "Picnic", "date": "soon" }
            ]
        }));

        let mut notes = Vec::new();
        let content = normalize_fields(schema.fields, &raw, "", &mut notes);
        let events = content["events"].as_array().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["location"], json!(""));
        assert_eq!(events[1]["date"], json!("TBD"));
        assert_eq!(notes[0].field, "events[2].date");
    }

    #[test]
    fn test_lift_flat_entity() {
        let schema = schema_for(&BlockType::EventCard).unwrap();
        let raw = object(json!({
            "title": "Food Drive",
            "date": "2025-11-02",
            "location": "Main Hall"
        }));

        let lifted = lift_flat_entity(schema.fields, &raw);

        assert!(!lifted.contains_key("title"));
        assert_eq!(
            lifted["events"],
            json!([{ "title": "Food Drive", "date": "2025-11-02", "location": "Main Hall" }])
        );
    }

    #[test]
    fn test_lift_leaves_lists_alone() {
        let schema = schema_for(&BlockType::EventCard).unwrap();
        let raw = object(json!({ "title": "Events", "events": [], "date": "2025-01-01" }));

        assert_eq!(lift_flat_entity(schema.fields, &raw), raw);
    }
}
