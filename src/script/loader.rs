use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::ScriptLoadError;
use super::modules::ModuleLoader;
use crate::document::ScreenContainer;
use crate::page::{ControllerNames, PageController, PageRegistry};

/// Loads page modules and starts their controllers.
///
/// Modules are cached by locator: once a module has registered its factories,
/// later navigations reuse them without loading the module again.
pub struct ScriptLoader {
    modules: Arc<dyn ModuleLoader>,
    registry: Mutex<PageRegistry>,
    loaded: Mutex<HashSet<String>>,
    names: ControllerNames,
}

impl ScriptLoader {
    pub fn new(modules: Arc<dyn ModuleLoader>, names: ControllerNames) -> Self {
        Self {
            modules,
            registry: Mutex::new(PageRegistry::new()),
            loaded: Mutex::new(HashSet::new()),
            names,
        }
    }

    /// Start with factories that do not come from a page module.
    pub fn with_registry(self, registry: PageRegistry) -> Self {
        *self.registry.lock() = registry;
        self
    }

    pub fn is_loaded(&self, locator: &str) -> bool {
        self.loaded.lock().contains(locator)
    }

    pub fn controller_name(&self, route: &str) -> String {
        self.names.for_route(route)
    }

    /// Load `locator`, instantiate the controller for `route` and await its
    /// `init` with `container`.
    ///
    /// Returns `Ok(None)` when the module does not provide the controller.
    pub async fn load_and_start(
        &self,
        locator: &str,
        route: &str,
        container: &ScreenContainer,
    ) -> Result<Option<Box<dyn PageController>>, ScriptLoadError> {
        self.ensure_loaded(locator).await?;

        let name = self.names.for_route(route);
        let created = self.registry.lock().create(&name);
        let Some(mut controller) = created else {
            tracing::warn!(
                locator,
                route,
                controller = %name,
                "Module does not register the route's controller"
            );
            return Ok(None);
        };

        match controller.init_hook() {
            Some(hook) => {
                tracing::debug!(controller = %name, container = container.id(), "Calling init");
                hook.init(container)
                    .await
                    .map_err(|source| ScriptLoadError::Init {
                        controller: name.clone(),
                        source,
                    })?;
            }
            None => tracing::debug!(controller = %name, "Controller has no init hook"),
        }

        Ok(Some(controller))
    }

    async fn ensure_loaded(&self, locator: &str) -> Result<(), ScriptLoadError> {
        if self.is_loaded(locator) {
            tracing::debug!(locator, "Page module already loaded");
            return Ok(());
        }

        let module = self.modules.load(locator).await?;
        module.register(&mut self.registry.lock());
        self.loaded.lock().insert(locator.to_string());
        tracing::info!(locator, "Page module loaded");
        Ok(())
    }
}
