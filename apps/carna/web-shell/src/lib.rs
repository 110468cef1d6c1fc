#[cfg(any(target_arch = "wasm32", test))]
mod boot_diagnostics;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};

    use carna_bridge_core::document::join_page_path;
    use carna_bridge_core::{
        AnalyticsAdapter, ApplicationHandle, BootError, BootedApplication, Bootstrapper,
        BridgeCapabilities, BridgeConfig, BrowserEnvironment, CoreApplication, DocumentAdapter,
        DocumentLanguage, MountTarget, OutboundPort, PortListener, RecordStore, StartupFlags,
        StorageError, TelemetryCommand, TelemetryFunction,
    };
    use serde_json::Value;
    use tracing::{error, info, warn};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::boot_diagnostics::BootDiagnostics;
    use crate::wasm_constants::*;

    mod browser;
    mod core_app;
    mod lifecycle;

    use browser::*;
    use core_app::ElmProgram;
    use lifecycle::*;

    thread_local! {
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static BOOTED: RefCell<Option<BootedApplication>> = const { RefCell::new(None) };
        static BOOT_FAILED: Cell<bool> = const { Cell::new(false) };
        static PORT_LISTENERS: RefCell<Vec<Closure<dyn FnMut(JsValue)>>> = const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        set_boot_phase("idle", "waiting for core program");
    }

    /// Boots the core program once per page. Later calls are ignored after a
    /// successful boot and refused after a failed one.
    #[wasm_bindgen]
    pub fn boot(program: JsValue) -> Result<(), JsValue> {
        if BOOT_FAILED.with(Cell::get) {
            return Err(js_sys::Error::new("boot already failed on this page").into());
        }
        if BOOTED.with(|booted| booted.borrow().is_some()) {
            warn!("boot called more than once; keeping the running core application");
            return Ok(());
        }

        set_boot_phase("booting", "deriving startup flags");
        let config = read_bridge_config();
        let capabilities = capabilities(&config);
        let telemetry_live = capabilities.analytics.is_live();
        let mount = config.mount.clone();

        match Bootstrapper::new(config, capabilities).start(&ElmProgram::new(program)) {
            Ok(booted) => {
                DIAGNOSTICS.with(|state| {
                    state.borrow_mut().record_boot(
                        &booted.flags,
                        booted.document_language,
                        &mount,
                        telemetry_live,
                    );
                });
                BOOTED.with(|slot| *slot.borrow_mut() = Some(booted));
                set_boot_phase("running", "core application started");
                Ok(())
            }
            Err(error) => {
                // Ports wired before the failure must stop dispatching.
                PORT_LISTENERS.with(|listeners| listeners.borrow_mut().clear());
                BOOT_FAILED.with(|failed| failed.set(true));
                let message = error.to_string();
                set_boot_error(&message);
                Err(js_sys::Error::new(&message).into())
            }
        }
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        refresh_dispatch_diagnostics();
        DIAGNOSTICS.with(|state| state.borrow().to_json())
    }

    #[wasm_bindgen]
    pub fn startup_flags_json() -> String {
        BOOTED.with(|booted| {
            booted
                .borrow()
                .as_ref()
                .and_then(|booted| booted.flags.to_json().ok())
                .unwrap_or_else(|| "null".to_string())
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn failed_port_wiring_is_fatal_and_final() {
            let program = js_sys::eval(
                "({ fullscreen: function (flags) { return { ports: {
                    setTitle: { subscribe: function (listener) {} },
                    trackHashPage: { subscribe: function (listener) { throw new Error('wiring failed'); } }
                } }; } })",
            )
            .expect("program");

            assert!(boot(program.clone()).is_err());
            assert_eq!(PORT_LISTENERS.with(|listeners| listeners.borrow().len()), 0);
            assert!(BOOTED.with(|booted| booted.borrow().is_none()));
            assert!(BOOT_FAILED.with(Cell::get));

            assert!(boot(program).is_err());
            let diagnostics: Value =
                serde_json::from_str(&boot_diagnostics_json()).expect("diagnostics");
            assert_eq!(diagnostics["phase"], Value::from("error"));
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::boot_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"web shell diagnostics only available on wasm\"}".to_string()
}
