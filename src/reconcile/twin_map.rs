use crate::domain::TagValue;
use crate::twin::{TagField, TwinDocument, convention};
use std::collections::HashMap;

/// Scalar tags of a twin document as owned tag-value children. Values the
/// local schema cannot represent (nested objects, arrays) are left out.
pub(crate) fn tag_values(twin: &TwinDocument) -> Vec<TagValue> {
    twin.tags
        .keys()
        .filter_map(|key| convention::tag(twin, key).map(|value| TagValue::new(key.clone(), value)))
        .collect()
}

pub(crate) fn labels(twin: &TwinDocument) -> Vec<String> {
    convention::tag(twin, TagField::Labels.key()).map(split_labels).unwrap_or_default()
}

pub(crate) fn attribute_tag_values(attributes: &HashMap<String, String>) -> Vec<TagValue> {
    let mut tags: Vec<TagValue> = attributes.iter().map(|(key, value)| TagValue::new(key.clone(), value.clone())).collect();
    tags.sort_by(|a, b| a.key.cmp(&b.key));
    tags
}

pub(crate) fn attribute_labels(attributes: &HashMap<String, String>) -> Vec<String> {
    attributes.get(TagField::Labels.key()).map(|raw| split_labels(raw.clone())).unwrap_or_default()
}

fn split_labels(raw: String) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|label| !label.is_empty()).map(str::to_string).collect()
}
