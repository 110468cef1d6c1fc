pub(crate) const CONFIG_GLOBAL: &str = "__CARNA_CONFIG__";
pub(crate) const LEGACY_LANGUAGE_PROPERTY: &str = "userLanguage";
pub(crate) const LANG_ATTRIBUTE: &str = "lang";
pub(crate) const PORTS_PROPERTY: &str = "ports";
pub(crate) const SUBSCRIBE_METHOD: &str = "subscribe";
pub(crate) const FULLSCREEN_METHOD: &str = "fullscreen";
pub(crate) const EMBED_METHOD: &str = "embed";
