use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use super::state::{NavigationState, RenderOutcome, RouterPhase};
use crate::config::{NavigationPolicy, RouterConfig};
use crate::document::{Display, Document, ScreenContainer, ACTIVE_SCREEN_CLASS};
use crate::location::Location;
use crate::page::PageController;
use crate::routing::{Route, RouteTable};
use crate::script::{ScriptLoadError, ScriptLoader};
use crate::template::{TemplateLoadError, TemplateSource};

/// Markup written into a screen whose template failed to load.
pub const TEMPLATE_ERROR_MARKUP: &str = r#"<div class="error">Page failed to load</div>"#;

#[derive(Debug, Error)]
enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateLoadError),

    #[error(transparent)]
    Script(#[from] ScriptLoadError),

    #[error("Screen container '{id}' not found")]
    MissingContainer { id: String },
}

/// Static router settings taken from [`RouterConfig`].
#[derive(Debug, Clone)]
struct RouterSettings {
    chrome_container: String,
    chrome_routes: HashSet<String>,
    container_aliases: HashMap<String, String>,
    policy: NavigationPolicy,
}

impl From<&RouterConfig> for RouterSettings {
    fn from(config: &RouterConfig) -> Self {
        Self {
            chrome_container: config.chrome_container.clone(),
            chrome_routes: config.chrome_routes.iter().cloned().collect(),
            container_aliases: config.container_aliases.clone(),
            policy: config.navigation_policy,
        }
    }
}

/// Hash router: resolves the fragment, swaps screens and starts controllers.
///
/// At most one render runs at a time. Triggers arriving meanwhile are dropped
/// or coalesced into a single follow-up render depending on the policy.
pub struct Router {
    routes: RouteTable,
    document: Arc<dyn Document>,
    location: Arc<Location>,
    templates: Arc<dyn TemplateSource>,
    scripts: Arc<ScriptLoader>,
    settings: RouterSettings,
    state: Mutex<NavigationState>,
    page: Mutex<Option<Box<dyn PageController>>>,
    passes: AtomicU64,
}

impl Router {
    pub fn new(
        config: &RouterConfig,
        routes: RouteTable,
        document: Arc<dyn Document>,
        location: Arc<Location>,
        templates: Arc<dyn TemplateSource>,
        scripts: Arc<ScriptLoader>,
    ) -> Self {
        Self {
            routes,
            document,
            location,
            templates,
            scripts,
            settings: RouterSettings::from(config),
            state: Mutex::new(NavigationState::default()),
            page: Mutex::new(None),
            passes: AtomicU64::new(0),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn location(&self) -> &Arc<Location> {
        &self.location
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn phase(&self) -> RouterPhase {
        self.state.lock().phase()
    }

    pub fn navigation_state(&self) -> NavigationState {
        self.state.lock().clone()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.state.lock().current_route.clone()
    }

    /// Name of the live page controller, if any.
    pub fn current_page(&self) -> Option<String> {
        self.page.lock().as_ref().map(|page| page.name().to_string())
    }

    /// Number of render passes started so far, recovery renders included.
    pub fn render_passes(&self) -> u64 {
        self.passes.load(Ordering::SeqCst)
    }

    /// Id of the screen container used by `route`.
    pub fn container_id(&self, route: &Route) -> String {
        match self.settings.container_aliases.get(&route.name) {
            Some(id) => id.clone(),
            None => format!("screen-{}", route.template),
        }
    }

    /// Render whatever route the current fragment names.
    ///
    /// Never fails: template errors leave an inline message, script errors
    /// trigger a one-shot render of the default route.
    pub async fn render_route(&self) -> RenderOutcome {
        if let Some(outcome) = self.try_begin() {
            return outcome;
        }

        // Releases the flag if this future is dropped or a controller panics.
        let guard = scopeguard::guard(self, |router| router.abort_render());

        let mut outcome = self.render_pass().await;
        while self.continue_or_finish() {
            tracing::debug!("Running queued render");
            outcome = self.render_pass().await;
        }

        ScopeGuard::into_inner(guard);
        outcome
    }

    fn try_begin(&self) -> Option<RenderOutcome> {
        let mut state = self.state.lock();
        if !state.is_rendering {
            state.is_rendering = true;
            return None;
        }

        match self.settings.policy {
            NavigationPolicy::Drop => {
                tracing::debug!("Render already in progress, dropping trigger");
                Some(RenderOutcome::Dropped)
            }
            NavigationPolicy::QueueLatest => {
                tracing::debug!("Render already in progress, queueing trigger");
                state.rerender_requested = true;
                Some(RenderOutcome::Queued)
            }
        }
    }

    /// Either consume a queued request (staying in `Rendering`) or go `Idle`.
    fn continue_or_finish(&self) -> bool {
        let mut state = self.state.lock();
        if state.rerender_requested {
            state.rerender_requested = false;
            return true;
        }
        state.is_rendering = false;
        state.pending_script_locator = None;
        false
    }

    fn abort_render(&self) {
        tracing::warn!("Render aborted before completion");
        let mut state = self.state.lock();
        state.is_rendering = false;
        state.rerender_requested = false;
        state.pending_script_locator = None;
    }

    async fn render_pass(&self) -> RenderOutcome {
        self.passes.fetch_add(1, Ordering::SeqCst);

        let fragment = self.location.fragment();
        let route = self.routes.resolve(&fragment).clone();
        let span = tracing::info_span!(
            "render",
            id = %Uuid::new_v4(),
            fragment = %fragment,
            route = %route.name
        );

        async {
            tracing::info!("Rendering route");
            match self.render(&route).await {
                Ok(()) => {
                    tracing::info!("Route rendered");
                    RenderOutcome::Rendered {
                        route: route.name.clone(),
                    }
                }
                Err(RenderError::Template(e)) => {
                    tracing::error!(error = %e, "Template failed to load");
                    RenderOutcome::TemplateFailed {
                        route: route.name.clone(),
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Render failed, recovering with default route");
                    self.recover(&route).await
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn recover(&self, failed: &Route) -> RenderOutcome {
        let fallback = self.routes.default_route().clone();
        self.passes.fetch_add(1, Ordering::SeqCst);

        match self.render(&fallback).await {
            Ok(()) => RenderOutcome::Recovered {
                failed_route: failed.name.clone(),
            },
            Err(e) => {
                tracing::error!(error = %e, route = %fallback.name, "Recovery render failed");
                RenderOutcome::Failed {
                    route: failed.name.clone(),
                }
            }
        }
    }

    async fn render(&self, route: &Route) -> Result<(), RenderError> {
        let container = ScreenContainer::new(self.container_id(route), self.document.clone());
        if !container.exists() {
            return Err(RenderError::MissingContainer {
                id: container.id().to_string(),
            });
        }

        let markup = match self.templates.load(&route.template).await {
            Ok(markup) => markup,
            Err(e) => {
                container.set_html(TEMPLATE_ERROR_MARKUP);
                return Err(e.into());
            }
        };

        self.activate(&container, &markup);
        self.update_chrome(&route.name);
        self.release_page();

        if let Some(locator) = &route.script {
            self.state.lock().pending_script_locator = Some(locator.clone());
            let page = self
                .scripts
                .load_and_start(locator, &route.name, &container)
                .await?;
            *self.page.lock() = page;
            self.state.lock().pending_script_locator = None;
        }

        self.state.lock().current_route = Some(route.clone());
        Ok(())
    }

    fn activate(&self, container: &ScreenContainer, markup: &str) {
        for id in self.document.screen_ids() {
            self.document.set_display(&id, Display::None);
            self.document.remove_class(&id, ACTIVE_SCREEN_CLASS);
        }

        self.document.set_display(container.id(), Display::Flex);
        self.document.add_class(container.id(), ACTIVE_SCREEN_CLASS);
        container.set_html(markup);
    }

    fn update_chrome(&self, route: &str) {
        let display = if self.settings.chrome_routes.contains(route) {
            Display::Block
        } else {
            Display::None
        };
        if !self
            .document
            .set_display(&self.settings.chrome_container, display)
        {
            tracing::debug!(
                container = %self.settings.chrome_container,
                "Chrome container not present"
            );
        }
    }

    /// Run `cleanup` on the controller being replaced.
    fn release_page(&self) {
        let previous = self.page.lock().take();
        let Some(mut page) = previous else {
            return;
        };

        let name = page.name().to_string();
        match page.cleanup_hook() {
            Some(hook) => {
                tracing::debug!(controller = %name, "Cleaning up previous page");
                hook.cleanup();
            }
            None => tracing::trace!(controller = %name, "Previous page has no cleanup hook"),
        }
    }
}
