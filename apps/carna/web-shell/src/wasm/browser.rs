use super::*;

pub(super) fn capabilities(config: &BridgeConfig) -> BridgeCapabilities {
    BridgeCapabilities {
        environment: Box::new(NavigatorEnvironment),
        store: Box::new(LocalStorageRecordStore::new(&config.storage_key)),
        document: Box::new(BrowserDocument),
        analytics: AnalyticsAdapter::select(Box::new(GlobalTelemetryFunction::new(
            &config.telemetry_global,
        ))),
    }
}

pub(super) struct NavigatorEnvironment;

impl BrowserEnvironment for NavigatorEnvironment {
    fn preferred_language(&self) -> Option<String> {
        web_sys::window()?.navigator().language()
    }

    fn legacy_language(&self) -> Option<String> {
        let navigator = web_sys::window()?.navigator();
        js_sys::Reflect::get(&navigator, &JsValue::from_str(LEGACY_LANGUAGE_PROPERTY))
            .ok()?
            .as_string()
    }
}

pub(super) struct LocalStorageRecordStore {
    key: String,
}

impl LocalStorageRecordStore {
    pub(super) fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window is unavailable".to_string()))?;
        window
            .local_storage()
            .map_err(|error| StorageError::Unavailable(describe_js_error(&error)))?
            .ok_or_else(|| StorageError::Unavailable("local storage is unavailable".to_string()))
    }
}

impl RecordStore for LocalStorageRecordStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|error| StorageError::Read(describe_js_error(&error)))
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|error| StorageError::Write(describe_js_error(&error)))
    }
}

pub(super) struct BrowserDocument;

impl DocumentAdapter for BrowserDocument {
    fn set_language(&self, language: DocumentLanguage) {
        let Some(root) = document().and_then(|document| document.document_element()) else {
            warn!("document root is unavailable; lang attribute not set");
            return;
        };
        if let Err(error) = root.set_attribute(LANG_ATTRIBUTE, language.as_str()) {
            warn!("failed to set lang attribute: {}", describe_js_error(&error));
        }
    }

    fn set_title(&self, title: &str) {
        if let Some(document) = document() {
            document.set_title(title);
        }
    }

    fn current_page_path(&self) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        let location = window.location();
        join_page_path(
            &location.pathname().unwrap_or_default(),
            &location.hash().unwrap_or_default(),
        )
    }
}

/// Calls the host's global telemetry function by name. The global is looked
/// up on every call because analytics loaders replace their queueing stub
/// with the real tracker after boot.
pub(super) struct GlobalTelemetryFunction {
    name: String,
}

impl GlobalTelemetryFunction {
    pub(super) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    fn lookup(&self) -> Option<js_sys::Function> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str(&self.name))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }
}

impl TelemetryFunction for GlobalTelemetryFunction {
    fn is_available(&self) -> bool {
        self.lookup().is_some()
    }

    fn call(&self, command: &TelemetryCommand) {
        let Some(function) = self.lookup() else {
            warn!("telemetry global {} disappeared; call skipped", self.name);
            return;
        };
        let arguments = js_sys::Array::new();
        for argument in command.arguments() {
            arguments.push(&json_to_js(&argument));
        }
        if let Err(error) = function.apply(&JsValue::UNDEFINED, &arguments) {
            warn!("telemetry call failed: {}", describe_js_error(&error));
        }
    }
}

pub(super) fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub(super) fn describe_js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

pub(super) fn json_to_js(value: &Value) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|raw| js_sys::JSON::parse(&raw).ok())
        .unwrap_or(JsValue::NULL)
}

pub(super) fn js_to_json(value: &JsValue) -> Value {
    if value.is_undefined() {
        return Value::Null;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|raw| raw.as_string())
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or(Value::Null)
}
