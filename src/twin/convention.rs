//! Convention-based access to the twin namespaces.
//!
//! Tag names are case-folded to the lower-camel convention the documents are
//! stored in; desired and reported properties are looked up verbatim. Absence
//! and malformed values are modelled as `None`, never as an error: a missing
//! field or a legacy format is a normal occurrence during a sync cycle.

use crate::twin::{ReportedField, TwinDocument, TwinPatch};
use serde_json::Value;
use std::str::FromStr;

/// Looks up a tag, case-folding `name` to the stored lower-camel convention.
pub fn tag(document: &TwinDocument, name: &str) -> Option<String> {
    document.tags.get(&lower_camel(name)).and_then(scalar_to_string)
}

/// Stages a tag write under the same case-folding rule as [`tag`].
pub fn set_tag(patch: &mut TwinPatch, name: &str, value: impl Into<String>) {
    patch.tags.insert(lower_camel(name), Value::String(value.into()));
}

pub fn desired(document: &TwinDocument, name: &str) -> Option<String> {
    document.properties.desired.get(name).and_then(scalar_to_string)
}

pub fn set_desired(patch: &mut TwinPatch, name: &str, value: impl Into<String>) {
    patch.desired.insert(name.to_string(), Value::String(value.into()));
}

pub fn reported(document: &TwinDocument, name: &str) -> Option<String> {
    document.properties.reported.get(name).and_then(scalar_to_string)
}

pub fn desired_bool(document: &TwinDocument, name: &str) -> Option<bool> {
    desired(document, name).and_then(|value| value.parse().ok())
}

pub fn desired_i64(document: &TwinDocument, name: &str) -> Option<i64> {
    desired(document, name).and_then(|value| value.parse().ok())
}

pub fn desired_enum<T: FromStr>(document: &TwinDocument, name: &str) -> Option<T> {
    desired(document, name).and_then(|value| value.parse().ok())
}

/// Number of clients currently connected to a gateway, taken from the reported
/// `connectedClients` array. Absent or non-array values count as zero.
pub fn connected_client_count(document: &TwinDocument) -> usize {
    array_len(document, ReportedField::ConnectedClients)
}

/// Number of modules reported by the gateway identified by `expected_id`.
/// Returns zero when the document belongs to a different device, so a stale
/// document held by the caller never leaks another device's module count.
pub fn module_count(document: &TwinDocument, expected_id: &str) -> usize {
    if document.device_id != expected_id {
        return 0;
    }
    array_len(document, ReportedField::Modules)
}

fn array_len(document: &TwinDocument, field: ReportedField) -> usize {
    document
        .properties
        .reported
        .get(field.key())
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
