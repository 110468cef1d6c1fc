use serde::{Deserialize, Serialize};

/// Startup configuration handed once to the core application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupFlags {
    #[serde(rename = "userLanguage")]
    pub user_language: String,
    #[serde(rename = "initialBodyIndex")]
    pub initial_body_index_record: Option<String>,
}

impl StartupFlags {
    pub fn new(user_language: impl Into<String>, initial_body_index_record: Option<String>) -> Self {
        Self {
            user_language: user_language.into(),
            initial_body_index_record,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_record_serializes_as_null() {
        let flags = StartupFlags::new("en-US", None);
        let value: serde_json::Value =
            serde_json::from_str(&flags.to_json().expect("flags json")).expect("flags value");
        assert_eq!(
            value,
            json!({"userLanguage": "en-US", "initialBodyIndex": null})
        );
    }

    #[test]
    fn record_is_passed_as_opaque_string() {
        let flags = StartupFlags::new("de-DE", Some(r#"{"weight":70}"#.to_string()));
        let value: serde_json::Value =
            serde_json::from_str(&flags.to_json().expect("flags json")).expect("flags value");
        assert_eq!(
            value,
            json!({"userLanguage": "de-DE", "initialBodyIndex": "{\"weight\":70}"})
        );
    }
}
