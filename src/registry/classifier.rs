use std::collections::HashMap;

/// Attribute carrying the classification signal on a thing type.
pub const GATEWAY_ATTRIBUTE: &str = "isGateway";

/// Device class derived from the registry's classification signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Edge,
    Leaf,
    Unknown,
}

/// Classifies a registry entry from its boolean-valued gateway attribute.
/// Anything other than an unambiguous boolean is `Unknown`; the reconcilers
/// skip unknown entries for the cycle rather than guess a class.
pub fn classify(attributes: &HashMap<String, String>) -> Classification {
    match attributes.get(GATEWAY_ATTRIBUTE).map(|value| value.to_ascii_lowercase()).as_deref() {
        Some("true") => Classification::Edge,
        Some("false") => Classification::Leaf,
        _ => Classification::Unknown,
    }
}
