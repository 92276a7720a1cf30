//! Page-controller lifecycle contract.
//!
//! A controller exposes up to two capabilities. The router checks for them
//! through [`PageController::init_hook`] and [`PageController::cleanup_hook`]
//! instead of probing method names.

use async_trait::async_trait;
use thiserror::Error;

use crate::document::ScreenContainer;

/// Error raised by a controller's `init`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PageError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Entry hook, awaited before the navigation is considered complete.
#[async_trait]
pub trait PageInit: Send {
    async fn init(&mut self, container: &ScreenContainer) -> Result<(), PageError>;
}

/// Teardown hook, run when the controller is abandoned.
pub trait PageCleanup: Send {
    fn cleanup(&mut self);
}

/// A per-route controller instance.
pub trait PageController: Send {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    fn init_hook(&mut self) -> Option<&mut dyn PageInit> {
        None
    }

    fn cleanup_hook(&mut self) -> Option<&mut dyn PageCleanup> {
        None
    }
}
