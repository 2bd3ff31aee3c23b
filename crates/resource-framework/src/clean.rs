//! Payload cleaning applied before every write request.
//!
//! The server distinguishes an absent field from an explicitly blank one, so
//! form values left empty must not reach it as `""`. Relations the user never
//! picked arrive as a nested object with a blank (or `-1`) id; those are
//! dropped the same way.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ResourceError;

/// Serializes `entity` and strips the fields the server must not see.
///
/// Removed top-level fields:
/// - string values equal to `""`
/// - objects whose `id` is `""` or `-1`
///
/// Non-object payloads are returned as serialized.
pub fn clean_entity<E: Serialize>(entity: &E) -> Result<Value, ResourceError> {
    let value = serde_json::to_value(entity)?;
    Ok(match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| keep_field(v))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    })
}

fn keep_field(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Object(nested) => match nested.get("id") {
            Some(Value::String(id)) => !id.is_empty(),
            Some(Value::Number(id)) => id.as_i64() != Some(-1),
            _ => true,
        },
        _ => true,
    }
}

/// Turns the ids selected in a multi-select into relation stubs.
///
/// Blank ids are skipped; ids that parse as integers are sent as numbers.
pub fn map_id_list<I, S>(ids: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .filter_map(|raw| {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                return None;
            }
            let id = raw
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(raw));
            Some(serde_json::json!({ "id": id }))
        })
        .collect()
}
