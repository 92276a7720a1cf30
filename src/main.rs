use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use pageshell::client::build_client;
use pageshell::config::{NavigationPolicy, ShellConfig};
use pageshell::document::{MemoryDocument, ScreenContainer};
use pageshell::logging::init_tracing;
use pageshell::page::{ControllerNames, PageCleanup, PageController, PageError, PageInit};
use pageshell::telemetry::{DeviceInfo, ScreenMetrics};
use pageshell::{App, BundledModules, RemoteModules, Router};

/// Headless hash-router shell. Boots against a server, then reads one
/// fragment per line from stdin and navigates to it.
#[derive(Debug, Parser)]
#[command(name = "pageshell", version)]
struct Args {
    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the server origin.
    #[arg(long)]
    base_url: Option<String>,

    /// What to do with navigations that arrive mid-render.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// User agent reported by the startup telemetry.
    #[arg(long, default_value = concat!("pageshell/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,

    #[arg(long, default_value_t = 0)]
    screen_width: u32,

    #[arg(long, default_value_t = 0)]
    screen_height: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Drop,
    QueueLatest,
}

impl From<PolicyArg> for NavigationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Drop => NavigationPolicy::Drop,
            PolicyArg::QueueLatest => NavigationPolicy::QueueLatest,
        }
    }
}

/// Controller bound to every configured module: it only logs its lifecycle.
struct LoggingPage {
    name: String,
}

#[async_trait]
impl PageInit for LoggingPage {
    async fn init(&mut self, container: &ScreenContainer) -> Result<(), PageError> {
        tracing::info!(page = %self.name, container = container.id(), "Page started");
        Ok(())
    }
}

impl PageCleanup for LoggingPage {
    fn cleanup(&mut self) {
        tracing::info!(page = %self.name, "Page cleaned up");
    }
}

impl PageController for LoggingPage {
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

fn bundled_modules(config: &ShellConfig) -> BundledModules {
    let names = ControllerNames::new(config.router.controller_aliases.clone());
    let mut modules = BundledModules::new();

    for route in &config.routes {
        let Some(locator) = &route.script else {
            continue;
        };
        let controller = names.for_route(&route.name);
        let existing = modules.get(locator).cloned();
        modules = modules.with_module(locator, move |registry| {
            if let Some(module) = &existing {
                module.register(registry);
            }
            let name = controller.clone();
            registry.register(controller.clone(), move || {
                Box::new(LoggingPage { name: name.clone() })
            });
        });
    }
    modules
}

fn print_state(router: &Router, document: &MemoryDocument) {
    let route = router
        .current_route()
        .map(|r| r.name)
        .unwrap_or_else(|| "-".to_string());
    let active = document.active_screens().join(",");
    println!(
        "route={} screen={} page={}",
        route,
        if active.is_empty() { "-" } else { &active },
        router.current_page().unwrap_or_else(|| "-".to_string())
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => ShellConfig::load_from(path),
        None => ShellConfig::load(),
    }
    .context("loading configuration")?;

    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }
    if let Some(policy) = args.policy {
        config.router.navigation_policy = policy.into();
    }
    config.validate().context("validating configuration")?;

    let document = Arc::new(MemoryDocument::for_config(&config));
    let modules = RemoteModules::new(
        build_client(&config.server)?,
        config.server.base_url.clone(),
        bundled_modules(&config),
    );
    let device = DeviceInfo::detect(
        &args.user_agent,
        ScreenMetrics {
            width: args.screen_width,
            height: args.screen_height,
            ..ScreenMetrics::default()
        },
    );

    let mut app = App::from_config(&config, document.clone(), Arc::new(modules), device)?;
    app.init().await?;
    print_state(app.router(), &document);

    let shutdown = app.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.signal();
        }
    });

    let location = app.location().clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if !line.trim().is_empty() => {
                    location.set_hash(&line);
                }
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
        location.close();
    });

    app.run().await?;
    print_state(app.router(), &document);
    Ok(())
}
