use std::rc::Rc;

use serde_json::Value;
use tracing::info;

use crate::analytics::AnalyticsAdapter;
use crate::bridge::PortBridge;
use crate::config::{BridgeConfig, MountTarget};
use crate::document::{DocumentAdapter, DocumentLanguage};
use crate::environment::{BrowserEnvironment, EnvironmentReader};
use crate::error::BootError;
use crate::flags::StartupFlags;
use crate::persistence::{PersistenceAdapter, RecordStore};
use crate::ports::{OUTBOUND_PORTS, OutboundPort};

pub type PortListener = Box<dyn FnMut(&Value)>;

/// Message-subscription surface of a running core application.
pub trait ApplicationHandle {
    fn subscribe(&mut self, port: OutboundPort, listener: PortListener) -> Result<(), BootError>;
}

/// Factory for the externally supplied core application.
pub trait CoreApplication {
    fn launch(
        &self,
        flags: &StartupFlags,
        mount: &MountTarget,
    ) -> Result<Box<dyn ApplicationHandle>, BootError>;
}

pub struct BridgeCapabilities {
    pub environment: Box<dyn BrowserEnvironment>,
    pub store: Box<dyn RecordStore>,
    pub document: Box<dyn DocumentAdapter>,
    pub analytics: AnalyticsAdapter,
}

pub struct BootedApplication {
    pub flags: StartupFlags,
    pub document_language: DocumentLanguage,
    pub bridge: Rc<PortBridge>,
    pub handle: Box<dyn ApplicationHandle>,
}

pub struct Bootstrapper {
    config: BridgeConfig,
    capabilities: BridgeCapabilities,
}

impl Bootstrapper {
    pub fn new(config: BridgeConfig, capabilities: BridgeCapabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Derives flags, starts the core and wires every outbound port. A core
    /// launch failure is returned as-is; there is no retry.
    pub fn start(self, core: &dyn CoreApplication) -> Result<BootedApplication, BootError> {
        let Self {
            config,
            capabilities,
        } = self;
        let BridgeCapabilities {
            environment,
            store,
            document,
            analytics,
        } = capabilities;

        let persistence = PersistenceAdapter::new(store);
        let (user_language, initial_record) = {
            let reader = EnvironmentReader::new(
                environment.as_ref(),
                &persistence,
                &config.default_language,
            );
            (reader.detect_language(), reader.load_persisted_record())
        };
        info!(
            "boot: user language {}, persisted record {}",
            user_language,
            if initial_record.is_some() { "found" } else { "absent" }
        );

        let document_language = DocumentLanguage::from_user_language(&user_language);
        document.set_language(document_language);

        let flags = StartupFlags::new(user_language, initial_record);
        let mut handle = core.launch(&flags, &config.mount)?;
        info!("boot: core application started ({})", config.mount.as_str());

        let bridge = Rc::new(PortBridge::new(document, analytics, persistence));
        for port in OUTBOUND_PORTS {
            let bridge = Rc::clone(&bridge);
            handle.subscribe(
                port,
                Box::new(move |payload: &Value| bridge.receive(port, payload)),
            )?;
        }
        info!("boot: {} ports wired", OUTBOUND_PORTS.len());

        Ok(BootedApplication {
            flags,
            document_language,
            bridge,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{
        MemoryDocument, MemoryRecordStore, RecordingTelemetry, ScriptedCore, StaticEnvironment,
    };
    use serde_json::json;

    fn capabilities(
        environment: StaticEnvironment,
        store: &MemoryRecordStore,
        document: &MemoryDocument,
        telemetry: Option<&RecordingTelemetry>,
    ) -> BridgeCapabilities {
        BridgeCapabilities {
            environment: Box::new(environment),
            store: Box::new(store.clone()),
            document: Box::new(document.clone()),
            analytics: AnalyticsAdapter::select(Box::new(
                telemetry.cloned().unwrap_or_else(RecordingTelemetry::unavailable),
            )),
        }
    }

    #[test]
    fn start_sets_document_language_before_launching_core() {
        let store = MemoryRecordStore::default();
        let document = MemoryDocument::default();
        let core = ScriptedCore::default();
        core.observe_document(document.clone());

        let booted = Bootstrapper::new(
            BridgeConfig::default(),
            capabilities(
                StaticEnvironment::new(Some("de-DE"), None),
                &store,
                &document,
                None,
            ),
        )
        .start(&core)
        .expect("boot");

        assert_eq!(booted.document_language, DocumentLanguage::De);
        assert_eq!(core.language_at_launch(), Some(DocumentLanguage::De));
        assert_eq!(booted.flags, StartupFlags::new("de-DE", None));
    }

    #[test]
    fn every_outbound_port_is_subscribed_once() {
        let store = MemoryRecordStore::default();
        let document = MemoryDocument::default();
        let core = ScriptedCore::default();

        Bootstrapper::new(
            BridgeConfig::default(),
            capabilities(StaticEnvironment::new(None, None), &store, &document, None),
        )
        .start(&core)
        .expect("boot");

        for port in OUTBOUND_PORTS {
            assert_eq!(core.listener_count(port), 1, "port {}", port.as_str());
        }
    }

    #[test]
    fn launch_failure_is_fatal() {
        let store = MemoryRecordStore::default();
        let document = MemoryDocument::default();
        let core = ScriptedCore::failing("Elm.Main is undefined");

        let result = Bootstrapper::new(
            BridgeConfig::default(),
            capabilities(StaticEnvironment::new(None, None), &store, &document, None),
        )
        .start(&core);

        assert!(matches!(result, Err(BootError::CoreLaunch(_))));
        assert_eq!(core.listener_count(OutboundPort::SetTitle), 0);
    }

    #[test]
    fn configured_mount_reaches_core() {
        let store = MemoryRecordStore::default();
        let document = MemoryDocument::default();
        let core = ScriptedCore::default();
        let config = BridgeConfig {
            mount: MountTarget::Embed {
                element_id: "main".to_string(),
            },
            ..BridgeConfig::default()
        };

        Bootstrapper::new(
            config,
            capabilities(StaticEnvironment::new(None, None), &store, &document, None),
        )
        .start(&core)
        .expect("boot");

        assert_eq!(
            core.mount(),
            Some(MountTarget::Embed {
                element_id: "main".to_string()
            })
        );
    }

    #[test]
    fn emissions_flow_through_subscriptions() {
        let store = MemoryRecordStore::default();
        let document = MemoryDocument::at("/", "#/bmi");
        let telemetry = RecordingTelemetry::default();
        let core = ScriptedCore::default();

        let booted = Bootstrapper::new(
            BridgeConfig::default(),
            capabilities(
                StaticEnvironment::new(Some("en-US"), None),
                &store,
                &document,
                Some(&telemetry),
            ),
        )
        .start(&core)
        .expect("boot");

        core.emit(OutboundPort::SetTitle, &json!("BMI"));
        core.emit(OutboundPort::TrackBodyIndexSubmit, &Value::Null);
        core.emit(OutboundPort::SaveBodyIndex, &json!({"weight": 70}));

        assert_eq!(document.title(), "BMI");
        assert_eq!(telemetry.calls().len(), 1);
        assert_eq!(store.snapshot().as_deref(), Some(r#"{"weight":70}"#));
        assert_eq!(booted.bridge.stats().dispatched, 3);
    }
}
