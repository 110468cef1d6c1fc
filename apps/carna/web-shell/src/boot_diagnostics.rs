use carna_bridge_core::{DispatchStats, DocumentLanguage, MountTarget, StartupFlags};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BootDiagnostics {
    pub phase: String,
    pub detail: String,
    pub mount: Option<String>,
    pub user_language: Option<String>,
    pub document_language: Option<String>,
    pub restored_record: bool,
    pub telemetry_live: bool,
    pub dispatched_messages: u64,
    pub rejected_messages: u64,
    pub failed_saves: u64,
    pub last_error: Option<String>,
}

impl Default for BootDiagnostics {
    fn default() -> Self {
        Self {
            phase: "idle".to_string(),
            detail: "web shell not started".to_string(),
            mount: None,
            user_language: None,
            document_language: None,
            restored_record: false,
            telemetry_live: false,
            dispatched_messages: 0,
            rejected_messages: 0,
            failed_saves: 0,
            last_error: None,
        }
    }
}

impl BootDiagnostics {
    pub fn set_phase(&mut self, phase: &str, detail: &str) {
        self.phase = phase.to_string();
        self.detail = detail.to_string();
        if phase != "error" {
            self.last_error = None;
        }
    }

    pub fn record_error(&mut self, message: &str) {
        self.phase = "error".to_string();
        self.detail = "startup failed".to_string();
        self.last_error = Some(message.to_string());
    }

    pub fn record_boot(
        &mut self,
        flags: &StartupFlags,
        document_language: DocumentLanguage,
        mount: &MountTarget,
        telemetry_live: bool,
    ) {
        self.user_language = Some(flags.user_language.clone());
        self.document_language = Some(document_language.as_str().to_string());
        self.restored_record = flags.initial_body_index_record.is_some();
        self.mount = Some(mount.as_str().to_string());
        self.telemetry_live = telemetry_live;
    }

    pub fn record_dispatch(&mut self, stats: DispatchStats) {
        self.dispatched_messages = stats.dispatched;
        self.rejected_messages = stats.rejected;
        self.failed_saves = stats.failed_saves;
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn default_reports_idle_shell() {
        let value: Value =
            serde_json::from_str(&BootDiagnostics::default().to_json()).expect("json");
        assert_eq!(value["phase"], json!("idle"));
        assert_eq!(value["restored_record"], json!(false));
        assert_eq!(value["last_error"], Value::Null);
    }

    #[test]
    fn record_boot_captures_flags_and_language() {
        let mut diagnostics = BootDiagnostics::default();
        diagnostics.record_boot(
            &StartupFlags::new("de-DE", Some("{}".to_string())),
            DocumentLanguage::De,
            &MountTarget::Embed {
                element_id: "main".to_string(),
            },
            true,
        );
        assert_eq!(diagnostics.user_language.as_deref(), Some("de-DE"));
        assert_eq!(diagnostics.document_language.as_deref(), Some("de"));
        assert_eq!(diagnostics.mount.as_deref(), Some("embed"));
        assert!(diagnostics.restored_record);
        assert!(diagnostics.telemetry_live);
    }

    #[test]
    fn error_is_cleared_by_next_non_error_phase() {
        let mut diagnostics = BootDiagnostics::default();
        diagnostics.record_error("core application failed to start: boom");
        assert_eq!(diagnostics.phase, "error");
        assert!(diagnostics.last_error.is_some());

        diagnostics.set_phase("running", "core application started");
        assert_eq!(diagnostics.last_error, None);
    }

    #[test]
    fn dispatch_counters_mirror_bridge_stats() {
        let mut diagnostics = BootDiagnostics::default();
        diagnostics.record_dispatch(DispatchStats {
            dispatched: 4,
            rejected: 1,
            failed_saves: 2,
        });
        assert_eq!(diagnostics.dispatched_messages, 4);
        assert_eq!(diagnostics.rejected_messages, 1);
        assert_eq!(diagnostics.failed_saves, 2);
    }
}
