use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("deck not found: {0}")]
    DeckNotFound(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to read utterance: {0}")]
    ReadFailed(String),

    #[error("transcript source not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to record event: {0}")]
    RecordFailed(String),

    #[error("progress sink not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("deck '{0}' has no words")]
    EmptyDeck(String),
}
