use serde_json::{Value, json};
use tracing::debug;

pub const EVENT_HIT_TYPE: &str = "event";
pub const FORM_SUBMIT_ACTION: &str = "FormSubmit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub hit_type: &'static str,
    pub event_category: String,
    pub event_action: String,
}

impl TelemetryEvent {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            hit_type: EVENT_HIT_TYPE,
            event_category: category.into(),
            event_action: action.into(),
        }
    }
}

/// One invocation of the global telemetry function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryCommand {
    SetPage(String),
    SendPageview,
    SendEvent(TelemetryEvent),
}

impl TelemetryCommand {
    /// Positional arguments in the order the telemetry function expects them.
    #[must_use]
    pub fn arguments(&self) -> Vec<Value> {
        match self {
            Self::SetPage(path) => vec![json!("set"), json!("page"), json!(path)],
            Self::SendPageview => vec![json!("send"), json!("pageview")],
            Self::SendEvent(event) => vec![
                json!("send"),
                json!({
                    "hitType": event.hit_type,
                    "eventCategory": event.event_category,
                    "eventAction": event.event_action,
                }),
            ],
        }
    }
}

pub trait TelemetryFunction {
    /// Whether the host currently exposes the telemetry entry point.
    fn is_available(&self) -> bool;
    fn call(&self, command: &TelemetryCommand);
}

/// Live when the host exposes a telemetry function at startup, otherwise a
/// silent no-op for the rest of the run.
pub struct AnalyticsAdapter {
    function: Box<dyn TelemetryFunction>,
    live: bool,
}

impl AnalyticsAdapter {
    /// Probes availability once; the result holds for the adapter's lifetime.
    pub fn select(function: Box<dyn TelemetryFunction>) -> Self {
        let live = function.is_available();
        if !live {
            debug!("telemetry function unavailable; analytics disabled");
        }
        Self { function, live }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn track_page_view(&self, page: &str) {
        if !self.live {
            return;
        }
        self.function
            .call(&TelemetryCommand::SetPage(page.to_string()));
        self.function.call(&TelemetryCommand::SendPageview);
    }

    pub fn track_event(&self, category: &str, action: &str) {
        if !self.live {
            return;
        }
        self.function
            .call(&TelemetryCommand::SendEvent(TelemetryEvent::new(
                category, action,
            )));
    }
}
