//! One-time application bootstrap and the fragment-change loop.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;

use crate::client::build_client;
use crate::config::{NavigationPolicy, ShellConfig};
use crate::document::Document;
use crate::location::Location;
use crate::page::ControllerNames;
use crate::router::{RenderOutcome, Router};
use crate::routing::{RouteTable, RouteTableError};
use crate::script::{ModuleLoader, ScriptLoader};
use crate::shutdown::ShutdownHandle;
use crate::telemetry::{DeviceInfo, TelemetryClient};
use crate::template::{load_into, HttpTemplateLoader, TemplateSource};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("Application already initialized")]
    AlreadyInitialized,

    #[error("Application not initialized")]
    NotInitialized,
}

/// The shell: bootstraps once, then renders on every fragment change.
pub struct App {
    router: Arc<Router>,
    location: Arc<Location>,
    document: Arc<dyn Document>,
    templates: Arc<dyn TemplateSource>,
    telemetry: TelemetryClient,
    device: DeviceInfo,
    chrome_container: String,
    chrome_template: String,
    policy: NavigationPolicy,
    shutdown: ShutdownHandle,
    initialized: bool,
    events: Option<broadcast::Receiver<String>>,
}

impl App {
    pub fn from_config(
        config: &ShellConfig,
        document: Arc<dyn Document>,
        modules: Arc<dyn ModuleLoader>,
        device: DeviceInfo,
    ) -> Result<Self, AppError> {
        let client = build_client(&config.server)?;
        let routes = RouteTable::from_config(config)?;
        let location = Arc::new(Location::default());

        let templates: Arc<dyn TemplateSource> = Arc::new(
            HttpTemplateLoader::new(client.clone(), &config.server)
                .with_cache(config.router.cache_templates),
        );
        let scripts = Arc::new(ScriptLoader::new(
            modules,
            ControllerNames::new(config.router.controller_aliases.clone()),
        ));
        let router = Arc::new(Router::new(
            &config.router,
            routes,
            document.clone(),
            location.clone(),
            templates.clone(),
            scripts,
        ));

        Ok(Self {
            router,
            location,
            document,
            templates,
            telemetry: TelemetryClient::new(client, &config.server),
            device,
            chrome_container: config.router.chrome_container.clone(),
            chrome_template: config.router.chrome_template.clone(),
            policy: config.router.navigation_policy,
            shutdown: ShutdownHandle::new(),
            initialized: false,
            events: None,
        })
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn location(&self) -> &Arc<Location> {
        &self.location
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Startup sequence: telemetry, shared chrome, the initial render of the
    /// default route and the subscription to fragment changes.
    ///
    /// Under [`NavigationPolicy::Drop`] changes made while the first render
    /// runs are lost, like any other mid-render change. Under
    /// [`NavigationPolicy::QueueLatest`] the subscription is taken first so
    /// they are rendered by `run`.
    ///
    /// Runs at most once.
    pub async fn init(&mut self) -> Result<RenderOutcome, AppError> {
        if self.initialized {
            return Err(AppError::AlreadyInitialized);
        }
        self.initialized = true;

        self.telemetry.report(&self.device).await;

        if let Err(e) = load_into(
            self.templates.as_ref(),
            &self.chrome_template,
            &self.chrome_container,
            self.document.as_ref(),
        )
        .await
        {
            tracing::error!(error = %e, "Failed to load shared chrome");
        }

        let initial = self.router.routes().default_route().name.clone();
        self.location.replace_hash(&initial);

        if self.policy == NavigationPolicy::QueueLatest {
            self.events = Some(self.location.subscribe());
        }

        let outcome = self.router.render_route().await;
        tracing::info!(?outcome, "Initial render finished");

        if self.events.is_none() {
            self.events = Some(self.location.subscribe());
        }
        Ok(outcome)
    }

    /// Render on every fragment change until shutdown or until the location
    /// stops emitting events.
    ///
    /// Each change spawns its own render so that a change arriving mid-render
    /// meets the router's mutual-exclusion flag.
    pub async fn run(&mut self) -> Result<(), AppError> {
        let mut events = self.events.take().ok_or(AppError::NotInitialized)?;
        let mut renders = JoinSet::new();

        loop {
            tokio::select! {
                _ = self.shutdown.wait() => {
                    renders.shutdown().await;
                    return Ok(());
                }
                event = events.recv() => match event {
                    Ok(fragment) => {
                        tracing::debug!(%fragment, "Fragment change, rendering");
                        let router = self.router.clone();
                        renders.spawn(async move { router.render_route().await });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Missed fragment changes, rendering current");
                        let router = self.router.clone();
                        renders.spawn(async move { router.render_route().await });
                    }
                    Err(RecvError::Closed) => break,
                },
            }

            while let Some(finished) = renders.try_join_next() {
                log_render(finished);
            }
        }

        while let Some(finished) = renders.join_next().await {
            log_render(finished);
        }
        Ok(())
    }
}

fn log_render(result: Result<RenderOutcome, tokio::task::JoinError>) {
    match result {
        Ok(outcome) => tracing::debug!(?outcome, "Render task finished"),
        Err(e) => tracing::error!(error = %e, "Render task failed"),
    }
}
