/// A single metadata key/value owned by exactly one device or model record.
///
/// Tag values are replaced wholesale whenever their parent is updated from the
/// registry; they are never merged with a previous set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue {
    pub key: String,
    pub value: String,
}

impl TagValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        TagValue {
            key: key.into(),
            value: value.into(),
        }
    }
}
