use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while creating, loading, or talking to the dashboard panel.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The bundled UI has no `index.html`. Opening a panel would show a blank page.
    #[error("bundled index document not found: {0}")]
    MissingIndex(PathBuf),

    #[error("failed to create panel: {0}")]
    Create(String),

    #[error("failed to post message to panel: {0}")]
    Post(String),

    #[error("panel has been disposed")]
    Disposed,
}

#[derive(Debug, thiserror::Error)]
pub enum AbcodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("watch error: {0}")]
    Watch(String),

    #[error("{0}")]
    Other(String),
}
