use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootError {
    #[error("core application failed to start: {0}")]
    CoreLaunch(String),

    #[error("mount element `{0}` is missing from the document")]
    MissingMountElement(String),

    #[error("failed to serialize startup flags: {0}")]
    Flags(#[from] serde_json::Error),

    #[error("port subscription failed for `{port}`: {reason}")]
    Subscription { port: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum PortError {
    #[error("unknown port `{0}`")]
    UnknownPort(String),

    #[error("port `{0}` is declared but has no wired handler")]
    Unwired(String),

    #[error("invalid payload on port `{port}`: {reason}")]
    InvalidPayload { port: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bridge config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config field `{0}` must not be blank")]
    BlankField(&'static str),
}
