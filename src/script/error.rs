use thiserror::Error;

use crate::page::PageError;

/// Failure to load a page module or start its controller.
#[derive(Debug, Error)]
pub enum ScriptLoadError {
    #[error("Page module '{locator}' returned HTTP {status}")]
    Status { locator: String, status: u16 },

    #[error("Page module '{locator}' could not be fetched: {source}")]
    Network {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No page module is bundled for '{locator}'")]
    ModuleNotFound { locator: String },

    #[error("Controller '{controller}' failed to initialize: {source}")]
    Init {
        controller: String,
        #[source]
        source: PageError,
    },
}

impl ScriptLoadError {
    /// Short classification for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptLoadError::Status { .. } => "status",
            ScriptLoadError::Network { .. } => "network",
            ScriptLoadError::ModuleNotFound { .. } => "module_not_found",
            ScriptLoadError::Init { .. } => "init",
        }
    }
}
