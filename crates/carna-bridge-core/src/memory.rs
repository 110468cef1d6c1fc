//! In-memory capability implementations for native hosts and tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::analytics::{TelemetryCommand, TelemetryFunction};
use crate::bootstrap::{ApplicationHandle, CoreApplication, PortListener};
use crate::config::MountTarget;
use crate::document::{DocumentAdapter, DocumentLanguage, join_page_path};
use crate::environment::BrowserEnvironment;
use crate::error::{BootError, StorageError};
use crate::flags::StartupFlags;
use crate::persistence::RecordStore;
use crate::ports::OutboundPort;

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    failure: Option<StorageError>,
    writes: usize,
}

/// Shared single-slot store. Clones observe the same slot, which lets a test
/// keep a handle after boxing one into the bridge.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryRecordStore {
    pub fn with_record(value: impl Into<String>) -> Self {
        let store = Self::default();
        store.slot.borrow_mut().value = Some(value.into());
        store
    }

    /// Every subsequent load and save fails with `error`.
    pub fn fail_with(&self, error: StorageError) {
        self.slot.borrow_mut().failure = Some(error);
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.slot.borrow().value.clone()
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.slot.borrow().writes
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self.slot.borrow();
        if let Some(error) = &slot.failure {
            return Err(error.clone());
        }
        Ok(slot.value.clone())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.borrow_mut();
        if let Some(error) = &slot.failure {
            return Err(error.clone());
        }
        slot.value = Some(value.to_string());
        slot.writes += 1;
        Ok(())
    }
}

#[derive(Debug)]
struct DocumentState {
    language: Option<DocumentLanguage>,
    titles: Vec<String>,
    pathname: String,
    hash: String,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::at("/", "")
    }
}

impl MemoryDocument {
    pub fn at(pathname: &str, hash: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                language: None,
                titles: Vec::new(),
                pathname: pathname.to_string(),
                hash: hash.to_string(),
            })),
        }
    }

    pub fn navigate(&self, pathname: &str, hash: &str) {
        let mut state = self.state.borrow_mut();
        state.pathname = pathname.to_string();
        state.hash = hash.to_string();
    }

    #[must_use]
    pub fn language(&self) -> Option<DocumentLanguage> {
        self.state.borrow().language
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.state.borrow().titles.last().cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn title_history(&self) -> Vec<String> {
        self.state.borrow().titles.clone()
    }
}

impl DocumentAdapter for MemoryDocument {
    fn set_language(&self, language: DocumentLanguage) {
        self.state.borrow_mut().language = Some(language);
    }

    fn set_title(&self, title: &str) {
        self.state.borrow_mut().titles.push(title.to_string());
    }

    fn current_page_path(&self) -> String {
        let state = self.state.borrow();
        join_page_path(&state.pathname, &state.hash)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    preferred: Option<String>,
    legacy: Option<String>,
}

impl StaticEnvironment {
    pub fn new(preferred: Option<&str>, legacy: Option<&str>) -> Self {
        Self {
            preferred: preferred.map(str::to_string),
            legacy: legacy.map(str::to_string),
        }
    }
}

impl BrowserEnvironment for StaticEnvironment {
    fn preferred_language(&self) -> Option<String> {
        self.preferred.clone()
    }

    fn legacy_language(&self) -> Option<String> {
        self.legacy.clone()
    }
}

/// Records every call it receives, whether or not it reports itself as
/// available, so a suppressed call path can be checked for zero calls.
#[derive(Debug, Clone)]
pub struct RecordingTelemetry {
    available: Rc<Cell<bool>>,
    calls: Rc<RefCell<Vec<TelemetryCommand>>>,
}

impl Default for RecordingTelemetry {
    fn default() -> Self {
        Self {
            available: Rc::new(Cell::new(true)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl RecordingTelemetry {
    #[must_use]
    pub fn unavailable() -> Self {
        let telemetry = Self::default();
        telemetry.set_available(false);
        telemetry
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<TelemetryCommand> {
        self.calls.borrow().clone()
    }
}

impl TelemetryFunction for RecordingTelemetry {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn call(&self, command: &TelemetryCommand) {
        self.calls.borrow_mut().push(command.clone());
    }
}

#[derive(Default)]
struct ScriptedState {
    failure: Option<String>,
    flags: Option<StartupFlags>,
    mount: Option<MountTarget>,
    document_probe: Option<MemoryDocument>,
    language_at_launch: Option<DocumentLanguage>,
    listeners: HashMap<OutboundPort, Vec<PortListener>>,
}

/// Stand-in core application that records its flags and lets the caller
/// emit on its ports.
#[derive(Clone, Default)]
pub struct ScriptedCore {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedCore {
    pub fn failing(reason: &str) -> Self {
        let core = Self::default();
        core.state.borrow_mut().failure = Some(reason.to_string());
        core
    }

    /// Captures the document language as it was when `launch` ran.
    pub fn observe_document(&self, document: MemoryDocument) {
        self.state.borrow_mut().document_probe = Some(document);
    }

    #[must_use]
    pub fn flags(&self) -> Option<StartupFlags> {
        self.state.borrow().flags.clone()
    }

    #[must_use]
    pub fn mount(&self) -> Option<MountTarget> {
        self.state.borrow().mount.clone()
    }

    #[must_use]
    pub fn language_at_launch(&self) -> Option<DocumentLanguage> {
        self.state.borrow().language_at_launch
    }

    #[must_use]
    pub fn listener_count(&self, port: OutboundPort) -> usize {
        self.state
            .borrow()
            .listeners
            .get(&port)
            .map_or(0, Vec::len)
    }

    pub fn emit(&self, port: OutboundPort, payload: &Value) {
        let mut listeners = self
            .state
            .borrow_mut()
            .listeners
            .remove(&port)
            .unwrap_or_default();
        for listener in &mut listeners {
            listener(payload);
        }
        let mut state = self.state.borrow_mut();
        let slot = state.listeners.entry(port).or_default();
        listeners.append(slot);
        *slot = listeners;
    }
}

impl CoreApplication for ScriptedCore {
    fn launch(
        &self,
        flags: &StartupFlags,
        mount: &MountTarget,
    ) -> Result<Box<dyn ApplicationHandle>, BootError> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = &state.failure {
            return Err(BootError::CoreLaunch(reason.clone()));
        }
        state.flags = Some(flags.clone());
        state.mount = Some(mount.clone());
        state.language_at_launch = state.document_probe.as_ref().and_then(MemoryDocument::language);
        Ok(Box::new(ScriptedHandle {
            state: Rc::clone(&self.state),
        }))
    }
}

struct ScriptedHandle {
    state: Rc<RefCell<ScriptedState>>,
}

impl ApplicationHandle for ScriptedHandle {
    fn subscribe(&mut self, port: OutboundPort, listener: PortListener) -> Result<(), BootError> {
        self.state
            .borrow_mut()
            .listeners
            .entry(port)
            .or_default()
            .push(listener);
        Ok(())
    }
}
