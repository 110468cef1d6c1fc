use std::cell::Cell;

use serde_json::Value;
use tracing::{debug, warn};

use crate::analytics::{AnalyticsAdapter, FORM_SUBMIT_ACTION};
use crate::document::DocumentAdapter;
use crate::persistence::PersistenceAdapter;
use crate::ports::{OutboundMessage, OutboundPort};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub rejected: u64,
    pub failed_saves: u64,
}

/// Routes every message emitted by the core application to exactly one
/// adapter, synchronously and in emission order.
pub struct PortBridge {
    document: Box<dyn DocumentAdapter>,
    analytics: AnalyticsAdapter,
    persistence: PersistenceAdapter,
    dispatched: Cell<u64>,
    rejected: Cell<u64>,
    failed_saves: Cell<u64>,
}

impl PortBridge {
    pub fn new(
        document: Box<dyn DocumentAdapter>,
        analytics: AnalyticsAdapter,
        persistence: PersistenceAdapter,
    ) -> Self {
        Self {
            document,
            analytics,
            persistence,
            dispatched: Cell::new(0),
            rejected: Cell::new(0),
            failed_saves: Cell::new(0),
        }
    }

    pub fn dispatch(&self, message: OutboundMessage) {
        debug!("dispatching {} message", message.port().as_str());
        match message {
            OutboundMessage::SetTitle(text) => self.document.set_title(&text),
            OutboundMessage::TrackPageView(requested) => {
                // Reports the live location; the emitted path is informational only.
                let current = self.document.current_page_path();
                if current != requested {
                    debug!("page view requested {} but location is {}", requested, current);
                }
                self.analytics.track_page_view(&current);
            }
            OutboundMessage::TrackFormSubmit(kind) => {
                self.analytics
                    .track_event(kind.category(), FORM_SUBMIT_ACTION);
            }
            OutboundMessage::SaveRecord(record) => {
                if !self.persistence.save(&record) {
                    bump(&self.failed_saves);
                }
            }
        }
        bump(&self.dispatched);
    }

    /// Decodes a raw port emission and dispatches it. Undecodable emissions
    /// are logged and dropped.
    pub fn dispatch_port(&self, port_name: &str, payload: &Value) {
        match OutboundMessage::decode(port_name, payload) {
            Ok(message) => self.dispatch(message),
            Err(error) => {
                warn!("dropping port emission: {}", error);
                bump(&self.rejected);
            }
        }
    }

    /// Same as [`Self::dispatch_port`] for a listener already bound to a port.
    pub fn receive(&self, port: OutboundPort, payload: &Value) {
        match OutboundMessage::decode_port(port, payload) {
            Ok(message) => self.dispatch(message),
            Err(error) => {
                warn!("dropping port emission: {}", error);
                bump(&self.rejected);
            }
        }
    }

    pub fn dispatch_all(&self, messages: impl IntoIterator<Item = OutboundMessage>) {
        for message in messages {
            self.dispatch(message);
        }
    }

    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            dispatched: self.dispatched.get(),
            rejected: self.rejected.get(),
            failed_saves: self.failed_saves.get(),
        }
    }

    pub fn analytics(&self) -> &AnalyticsAdapter {
        &self.analytics
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().saturating_add(1));
}
