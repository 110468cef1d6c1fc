//! Boot and port bridge for the Carna web client.
//!
//! The core application is an opaque reactive UI engine. This crate owns the
//! small surface around it:
//! - startup flag derivation from the host environment
//! - the outbound port catalog and its single dispatch function
//! - capability traits for storage, telemetry and the document, so browser
//!   and in-memory implementations are interchangeable

pub mod analytics;
pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod document;
pub mod environment;
pub mod error;
pub mod flags;
pub mod memory;
pub mod persistence;
pub mod ports;

pub use analytics::{AnalyticsAdapter, TelemetryCommand, TelemetryEvent, TelemetryFunction};
pub use bootstrap::{
    ApplicationHandle, BootedApplication, BridgeCapabilities, Bootstrapper, CoreApplication,
    PortListener,
};
pub use bridge::{DispatchStats, PortBridge};
pub use config::{BridgeConfig, MountTarget};
pub use document::{DocumentAdapter, DocumentLanguage};
pub use environment::{BrowserEnvironment, EnvironmentReader};
pub use error::{BootError, ConfigError, PortError, StorageError};
pub use flags::StartupFlags;
pub use persistence::{PersistenceAdapter, RecordStore};
pub use ports::{FormKind, OUTBOUND_PORTS, OutboundMessage, OutboundPort, RESERVED_INBOUND_PORTS};
