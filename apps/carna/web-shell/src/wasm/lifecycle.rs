use super::*;

pub(super) fn set_boot_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|state| state.borrow_mut().set_phase(phase, detail));
    info!("boot phase {}: {}", phase, detail);
}

pub(super) fn set_boot_error(message: &str) {
    DIAGNOSTICS.with(|state| state.borrow_mut().record_error(message));
    error!("boot failed: {}", message);
}

pub(super) fn refresh_dispatch_diagnostics() {
    let stats = BOOTED.with(|booted| {
        booted
            .borrow()
            .as_ref()
            .map(|booted| booted.bridge.stats())
    });
    if let Some(stats) = stats {
        DIAGNOSTICS.with(|state| state.borrow_mut().record_dispatch(stats));
    }
}

/// Reads `window.__CARNA_CONFIG__`; absent or invalid config falls back to
/// defaults.
pub(super) fn read_bridge_config() -> BridgeConfig {
    let Some(window) = web_sys::window() else {
        return BridgeConfig::default();
    };
    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
        return BridgeConfig::default();
    };
    if value.is_undefined() || value.is_null() {
        return BridgeConfig::default();
    }
    let raw = js_to_json(&value).to_string();
    match BridgeConfig::from_json(&raw) {
        Ok(config) => config,
        Err(error) => {
            warn!("ignoring {}: {}", CONFIG_GLOBAL, error);
            BridgeConfig::default()
        }
    }
}
