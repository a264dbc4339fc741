use thiserror::Error;

/// Errors surfaced by the few operations that do not degrade silently
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("No element matches {selector}")]
    MissingElement { selector: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Host error: {0}")]
    Host(String),
}
