//! Shared error type for the workspace seams

use thiserror::Error;

/// Top-level error for core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Deep link error: {0}")]
    DeepLink(#[from] crate::deeplink::DeepLinkError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;
