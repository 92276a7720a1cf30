//! Page-module sources.
//!
//! A page module is the unit a route's script locator points at. Loading it
//! runs its registrar, which adds controller factories to the registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::error::ScriptLoadError;
use crate::client::join_url;
use crate::page::PageRegistry;

type Registrar = Arc<dyn Fn(&mut PageRegistry) + Send + Sync>;

/// A loaded page module.
#[derive(Clone)]
pub struct PageModule {
    locator: String,
    registrar: Registrar,
}

impl PageModule {
    pub fn new<F>(locator: impl Into<String>, registrar: F) -> Self
    where
        F: Fn(&mut PageRegistry) + Send + Sync + 'static,
    {
        Self {
            locator: locator.into(),
            registrar: Arc::new(registrar),
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Run the module's registration against `registry`.
    pub fn register(&self, registry: &mut PageRegistry) {
        (self.registrar)(registry);
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("locator", &self.locator)
            .finish()
    }
}

#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, locator: &str) -> Result<PageModule, ScriptLoadError>;
}

/// Modules compiled into the binary, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct BundledModules {
    modules: HashMap<String, PageModule>,
}

impl BundledModules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module<F>(mut self, locator: &str, registrar: F) -> Self
    where
        F: Fn(&mut PageRegistry) + Send + Sync + 'static,
    {
        self.insert(PageModule::new(locator, registrar));
        self
    }

    pub fn insert(&mut self, module: PageModule) {
        self.modules.insert(module.locator.clone(), module);
    }

    pub fn get(&self, locator: &str) -> Option<&PageModule> {
        self.modules.get(locator)
    }
}

#[async_trait]
impl ModuleLoader for BundledModules {
    async fn load(&self, locator: &str) -> Result<PageModule, ScriptLoadError> {
        self.get(locator)
            .cloned()
            .ok_or_else(|| ScriptLoadError::ModuleNotFound {
                locator: locator.to_string(),
            })
    }
}

/// Fetches the module resource from the server before binding it to the
/// bundled registrar, so a missing or broken asset fails the load.
pub struct RemoteModules {
    client: Client,
    base_url: String,
    bundled: BundledModules,
}

impl RemoteModules {
    pub fn new(client: Client, base_url: impl Into<String>, bundled: BundledModules) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            bundled,
        }
    }

    pub fn url_for(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            join_url(&self.base_url, locator)
        }
    }
}

#[async_trait]
impl ModuleLoader for RemoteModules {
    async fn load(&self, locator: &str) -> Result<PageModule, ScriptLoadError> {
        let url = self.url_for(locator);
        tracing::debug!(locator, %url, "Fetching page module");

        let network = |source| ScriptLoadError::Network {
            locator: locator.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScriptLoadError::Status {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }
        response.bytes().await.map_err(network)?;

        self.bundled.load(locator).await
    }
}
