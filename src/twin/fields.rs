//! Hand-authored key tables for the three twin namespaces. The keys are the
//! exact strings stored in the documents; nothing is derived from type or
//! member names at runtime.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    DeviceClass,
    Labels,
    ModelId,
}

impl TagField {
    pub fn key(self) -> &'static str {
        match self {
            TagField::DeviceClass => "deviceClass",
            TagField::Labels => "labels",
            TagField::ModelId => "modelId",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredField {
    TelemetryEnabled,
    ReportingIntervalSeconds,
    PowerProfile,
}

impl DesiredField {
    pub fn key(self) -> &'static str {
        match self {
            DesiredField::TelemetryEnabled => "telemetryEnabled",
            DesiredField::ReportingIntervalSeconds => "reportingIntervalSeconds",
            DesiredField::PowerProfile => "powerProfile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedField {
    ConnectedClients,
    Modules,
}

impl ReportedField {
    pub fn key(self) -> &'static str {
        match self {
            ReportedField::ConnectedClients => "connectedClients",
            ReportedField::Modules => "modules",
        }
    }
}
