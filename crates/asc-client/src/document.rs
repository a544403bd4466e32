//! Helpers for JSON:API documents.
//!
//! Responses stay as `serde_json::Value`; these functions only read the few
//! structural fields every command cares about and build request bodies.

use asc_common::ValueExt;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// The `links.next` cursor of a page, if present and non-empty.
pub fn next_link(document: &Value) -> Option<&str> {
    document.non_empty_str_at(&["links", "next"])
}

/// The primary data as a list: arrays as-is, a single resource as one item.
pub fn data_items(document: &Value) -> Vec<&Value> {
    match document.get("data") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    }
}

/// Attribute of the primary data.
pub fn attribute<'a>(resource: &'a Value, name: &str) -> Option<&'a Value> {
    resource.at_path(&["attributes", name]).filter(|v| !v.is_null())
}

/// `{ "type": ..., "id": ... }` linkage.
pub fn linkage(resource_type: &str, id: &str) -> Value {
    json!({ "type": resource_type, "id": id })
}

/// `{ "data": [linkage...] }` body for relationship endpoints.
pub fn linkage_list(resource_type: &str, ids: &[String]) -> Value {
    json!({
        "data": ids.iter().map(|id| linkage(resource_type, id)).collect::<Vec<_>>()
    })
}

/// Builds `{ "data": { type, attributes, relationships } }` for create requests.
///
/// Null attributes are dropped so optional flags never overwrite server defaults.
pub fn create_document(
    resource_type: &str,
    attributes: Value,
    relationships: Option<Value>,
) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), json!(resource_type));
    let attributes = compact_attributes(attributes);
    if !attributes.as_object().map(Map::is_empty).unwrap_or(true) {
        data.insert("attributes".to_string(), attributes);
    }
    if let Some(relationships) = relationships {
        data.insert("relationships".to_string(), relationships);
    }
    json!({ "data": Value::Object(data) })
}

/// Builds `{ "data": { type, id, attributes } }` for update requests.
pub fn update_document(resource_type: &str, id: &str, attributes: Value) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), json!(resource_type));
    data.insert("id".to_string(), json!(id));
    let attributes = compact_attributes(attributes);
    if !attributes.as_object().map(Map::is_empty).unwrap_or(true) {
        data.insert("attributes".to_string(), attributes);
    }
    json!({ "data": Value::Object(data) })
}

/// Returns whether an update body carries any attribute to change.
pub fn has_attributes(document: &Value) -> bool {
    document
        .at_path(&["data", "attributes"])
        .and_then(Value::as_object)
        .map(|attrs| !attrs.is_empty())
        .unwrap_or(false)
}

/// `{ name: { "data": linkage } }` to-one relationship entry.
pub fn relationship_one(resource_type: &str, id: &str) -> Value {
    json!({ "data": linkage(resource_type, id) })
}

/// `{ name: { "data": [linkage...] } }` to-many relationship entry.
pub fn relationship_many(resource_type: &str, ids: &[String]) -> Value {
    linkage_list(resource_type, ids)
}

fn compact_attributes(attributes: Value) -> Value {
    match attributes {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}

/// Small success document for commands whose API response has no body.
pub fn deleted(resource_type: &str, id: &str) -> Value {
    json!({ "type": resource_type, "id": id, "deleted": true })
}
