//! Error types for the PRISM console.

/// Errors produced by the PRISM console framework.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    /// Registration with an empty id or an id containing whitespace.
    #[error("invalid command id: {0:?}")]
    InvalidId(String),

    /// Registration of an existing `(id, arity)` pair without override.
    #[error("command already registered: {id}/{arity}")]
    DuplicateCommand { id: String, arity: usize },

    /// Attempt to override or remove a native console command.
    #[error("native command is protected: {0}")]
    NativeProtected(String),

    /// Removal of a command that is not registered.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command callback failed during execution.
    #[error("command failed: {0}")]
    Callback(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// TOML parse error while loading configuration.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PrismError>;
