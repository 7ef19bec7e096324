pub mod convention;
mod document;
mod fields;

pub use document::{ConnectionState, TwinDocument, TwinPatch, TwinProperties};
pub use fields::{DesiredField, ReportedField, TagField};
