//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use pageshell::client::build_client;
use pageshell::config::ShellConfig;
use pageshell::document::{MemoryDocument, ScreenContainer};
use pageshell::location::Location;
use pageshell::page::{ControllerNames, PageCleanup, PageController, PageError, PageInit};
use pageshell::routing::RouteTable;
use pageshell::script::{BundledModules, RemoteModules, ScriptLoader};
use pageshell::template::HttpTemplateLoader;
use pageshell::Router;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use mock_server::MockServer;

/// Lifecycle events recorded by [`RecordingPage`], e.g. `init:NewsPage@screen-news`.
pub type PageLog = Arc<Mutex<Vec<String>>>;

/// How the recording controllers behave.
#[derive(Clone, Default)]
pub struct PageBehavior {
    /// Controllers whose init fails.
    pub failing: HashSet<String>,
    /// Delay applied inside every init.
    pub init_delay_ms: u64,
}

/// Controller recording its lifecycle calls.
pub struct RecordingPage {
    name: String,
    log: PageLog,
    behavior: PageBehavior,
}

#[async_trait]
impl PageInit for RecordingPage {
    async fn init(&mut self, container: &ScreenContainer) -> Result<(), PageError> {
        if self.behavior.init_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.behavior.init_delay_ms)).await;
        }
        self.log
            .lock()
            .push(format!("init:{}@{}", self.name, container.id()));

        if self.behavior.failing.contains(&self.name) {
            return Err(PageError::new(format!("{} refused to start", self.name)));
        }
        Ok(())
    }
}

impl PageCleanup for RecordingPage {
    fn cleanup(&mut self) {
        self.log.lock().push(format!("cleanup:{}", self.name));
    }
}

impl PageController for RecordingPage {
    fn name(&self) -> &str {
        &self.name
    }

    fn init_hook(&mut self) -> Option<&mut dyn PageInit> {
        Some(self)
    }

    fn cleanup_hook(&mut self) -> Option<&mut dyn PageCleanup> {
        Some(self)
    }
}

/// One bundled module per configured script locator, each registering a
/// [`RecordingPage`] under the route's controller name.
pub fn recording_modules(
    config: &ShellConfig,
    log: &PageLog,
    behavior: &PageBehavior,
) -> BundledModules {
    let names = ControllerNames::new(config.router.controller_aliases.clone());
    let mut modules = BundledModules::new();

    for route in &config.routes {
        let Some(locator) = &route.script else {
            continue;
        };
        let controller = names.for_route(&route.name);
        let previous = modules.get(locator).cloned();
        let log = log.clone();
        let behavior = behavior.clone();
        modules = modules.with_module(locator, move |registry| {
            if let Some(module) = &previous {
                module.register(registry);
            }
            let name = controller.clone();
            let log = log.clone();
            let behavior = behavior.clone();
            registry.register(controller.clone(), move || {
                Box::new(RecordingPage {
                    name: name.clone(),
                    log: log.clone(),
                    behavior: behavior.clone(),
                }) as Box<dyn PageController>
            });
        });
    }
    modules
}

/// Default route table pointed at `base_url`.
pub fn test_config(base_url: &str) -> ShellConfig {
    let mut config = ShellConfig::default();
    config.server.base_url = base_url.to_string();
    config.server.connect_timeout_seconds = 2;
    config.server.request_timeout_seconds = Some(5);
    config
}

/// Serve a template and a module body for every configured route, plus the chrome.
pub async fn serve_all(server: &MockServer, config: &ShellConfig) {
    for route in &config.routes {
        server
            .template(&route.template, &format!("<h1>{}</h1>", route.template))
            .await;
        if let Some(locator) = &route.script {
            server
                .respond(locator, mock_server::MockResponse::script("export {}"))
                .await;
        }
    }
    server
        .template(&config.router.chrome_template, "<nav>footer</nav>")
        .await;
}

/// A router wired to the mock server and a fresh in-memory document.
pub struct Harness {
    pub router: Arc<Router>,
    pub document: Arc<MemoryDocument>,
    pub location: Arc<Location>,
    pub log: PageLog,
}

impl Harness {
    pub fn new(config: &ShellConfig, behavior: PageBehavior) -> Self {
        Self::with_location(config, Arc::new(Location::default()), behavior)
    }

    pub fn with_location(
        config: &ShellConfig,
        location: Arc<Location>,
        behavior: PageBehavior,
    ) -> Self {
        let document = Arc::new(MemoryDocument::for_config(config));
        Self::build(config, location, document, behavior)
    }

    pub fn build(
        config: &ShellConfig,
        location: Arc<Location>,
        document: Arc<MemoryDocument>,
        behavior: PageBehavior,
    ) -> Self {
        let log: PageLog = Arc::new(Mutex::new(Vec::new()));
        let client = build_client(&config.server).expect("client");
        let modules = RemoteModules::new(
            client.clone(),
            config.server.base_url.clone(),
            recording_modules(config, &log, &behavior),
        );
        let scripts = Arc::new(ScriptLoader::new(
            Arc::new(modules),
            ControllerNames::new(config.router.controller_aliases.clone()),
        ));
        let templates = Arc::new(
            HttpTemplateLoader::new(client, &config.server)
                .with_cache(config.router.cache_templates),
        );
        let router = Arc::new(Router::new(
            &config.router,
            RouteTable::from_config(config).expect("routes"),
            document.clone(),
            location.clone(),
            templates,
            scripts,
        ));

        Self {
            router,
            document,
            location,
            log,
        }
    }

    /// Point the fragment at `hash` and render it.
    pub async fn navigate(&self, hash: &str) -> pageshell::RenderOutcome {
        self.location.replace_hash(hash);
        self.router.render_route().await
    }

    pub fn events(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

/// Poll `cond` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

/// Write `content` to a fresh `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
