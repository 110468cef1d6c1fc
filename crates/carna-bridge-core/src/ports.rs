//! Port catalog shared with the core application. Port names are part of the
//! wire contract and must not change.

use serde_json::Value;

use crate::error::PortError;

pub const LOAD_BODY_INDEX_PORT: &str = "loadBodyIndex";

/// Inbound names reserved in the catalog with no producer or consumer wired.
pub const RESERVED_INBOUND_PORTS: [&str; 1] = [LOAD_BODY_INDEX_PORT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutboundPort {
    SetTitle,
    TrackHashPage,
    TrackBodyIndexSubmit,
    TrackBodyFatSubmit,
    SaveBodyIndex,
}

pub const OUTBOUND_PORTS: [OutboundPort; 5] = [
    OutboundPort::SetTitle,
    OutboundPort::TrackHashPage,
    OutboundPort::TrackBodyIndexSubmit,
    OutboundPort::TrackBodyFatSubmit,
    OutboundPort::SaveBodyIndex,
];

impl OutboundPort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetTitle => "setTitle",
            Self::TrackHashPage => "trackHashPage",
            Self::TrackBodyIndexSubmit => "trackBodyIndexSubmit",
            Self::TrackBodyFatSubmit => "trackBodyFatSubmit",
            Self::SaveBodyIndex => "saveBodyIndex",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        OUTBOUND_PORTS.into_iter().find(|port| port.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    BodyIndex,
    BodyFat,
}

impl FormKind {
    /// Telemetry event category for a submit of this form.
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Self::BodyIndex => "BodyIndex",
            Self::BodyFat => "BodyFat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    SetTitle(String),
    TrackPageView(String),
    TrackFormSubmit(FormKind),
    /// Serialized record, opaque to the bridge.
    SaveRecord(String),
}

impl OutboundMessage {
    pub fn decode(port_name: &str, payload: &Value) -> Result<Self, PortError> {
        if RESERVED_INBOUND_PORTS.contains(&port_name) {
            return Err(PortError::Unwired(port_name.to_string()));
        }
        let port = OutboundPort::from_name(port_name)
            .ok_or_else(|| PortError::UnknownPort(port_name.to_string()))?;
        Self::decode_port(port, payload)
    }

    pub fn decode_port(port: OutboundPort, payload: &Value) -> Result<Self, PortError> {
        match port {
            OutboundPort::SetTitle => string_payload(port, payload).map(Self::SetTitle),
            OutboundPort::TrackHashPage => string_payload(port, payload).map(Self::TrackPageView),
            OutboundPort::TrackBodyIndexSubmit => Ok(Self::TrackFormSubmit(FormKind::BodyIndex)),
            OutboundPort::TrackBodyFatSubmit => Ok(Self::TrackFormSubmit(FormKind::BodyFat)),
            OutboundPort::SaveBodyIndex => serde_json::to_string(payload)
                .map(Self::SaveRecord)
                .map_err(|error| PortError::InvalidPayload {
                    port: port.as_str(),
                    reason: error.to_string(),
                }),
        }
    }

    #[must_use]
    pub fn port(&self) -> OutboundPort {
        match self {
            Self::SetTitle(_) => OutboundPort::SetTitle,
            Self::TrackPageView(_) => OutboundPort::TrackHashPage,
            Self::TrackFormSubmit(FormKind::BodyIndex) => OutboundPort::TrackBodyIndexSubmit,
            Self::TrackFormSubmit(FormKind::BodyFat) => OutboundPort::TrackBodyFatSubmit,
            Self::SaveRecord(_) => OutboundPort::SaveBodyIndex,
        }
    }
}

fn string_payload(port: OutboundPort, payload: &Value) -> Result<String, PortError> {
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PortError::InvalidPayload {
            port: port.as_str(),
            reason: format!("expected string, got {}", json_kind(payload)),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
