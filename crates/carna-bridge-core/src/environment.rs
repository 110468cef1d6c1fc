use crate::config::DEFAULT_USER_LANGUAGE;
use crate::persistence::PersistenceAdapter;

/// Ambient language signals exposed by the host.
pub trait BrowserEnvironment {
    /// Standard preferred-language signal (`navigator.language`).
    fn preferred_language(&self) -> Option<String>;
    /// Legacy signal (`navigator.userLanguage`).
    fn legacy_language(&self) -> Option<String>;
}

pub struct EnvironmentReader<'a> {
    environment: &'a dyn BrowserEnvironment,
    persistence: &'a PersistenceAdapter,
    default_language: &'a str,
}

impl<'a> EnvironmentReader<'a> {
    pub fn new(
        environment: &'a dyn BrowserEnvironment,
        persistence: &'a PersistenceAdapter,
        default_language: &'a str,
    ) -> Self {
        Self {
            environment,
            persistence,
            default_language,
        }
    }

    /// Preferred signal, then legacy signal, then the configured default.
    /// Empty signals count as unavailable.
    pub fn detect_language(&self) -> String {
        self.environment
            .preferred_language()
            .filter(|value| !value.is_empty())
            .or_else(|| {
                self.environment
                    .legacy_language()
                    .filter(|value| !value.is_empty())
            })
            .unwrap_or_else(|| fallback_language(self.default_language))
    }

    pub fn load_persisted_record(&self) -> Option<String> {
        self.persistence.load()
    }
}

fn fallback_language(configured: &str) -> String {
    if configured.is_empty() {
        DEFAULT_USER_LANGUAGE.to_string()
    } else {
        configured.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRecordStore, StaticEnvironment};

    fn detect(environment: &StaticEnvironment) -> String {
        let persistence = PersistenceAdapter::new(Box::new(MemoryRecordStore::default()));
        EnvironmentReader::new(environment, &persistence, DEFAULT_USER_LANGUAGE).detect_language()
    }

    #[test]
    fn prefers_standard_signal() {
        let environment = StaticEnvironment::new(Some("de-CH"), Some("fr-FR"));
        assert_eq!(detect(&environment), "de-CH");
    }

    #[test]
    fn falls_back_to_legacy_signal() {
        let environment = StaticEnvironment::new(None, Some("fr-FR"));
        assert_eq!(detect(&environment), "fr-FR");
    }

    #[test]
    fn empty_standard_signal_falls_through() {
        let environment = StaticEnvironment::new(Some(""), Some("it-IT"));
        assert_eq!(detect(&environment), "it-IT");
    }

    #[test]
    fn defaults_when_no_signal_available() {
        let environment = StaticEnvironment::new(None, None);
        assert_eq!(detect(&environment), "en-EN");
    }

    #[test]
    fn empty_configured_default_still_yields_language() {
        let environment = StaticEnvironment::new(None, Some(""));
        let persistence = PersistenceAdapter::new(Box::new(MemoryRecordStore::default()));
        let reader = EnvironmentReader::new(&environment, &persistence, "");
        assert_eq!(reader.detect_language(), "en-EN");
    }

    #[test]
    fn persisted_record_passes_through_unchanged() {
        let environment = StaticEnvironment::new(Some("en-US"), None);
        let persistence = PersistenceAdapter::new(Box::new(MemoryRecordStore::with_record(
            r#"{ "weight" : 70 }"#,
        )));
        let reader = EnvironmentReader::new(&environment, &persistence, DEFAULT_USER_LANGUAGE);
        assert_eq!(
            reader.load_persisted_record().as_deref(),
            Some(r#"{ "weight" : 70 }"#)
        );
    }
}
