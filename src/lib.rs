//! Hash-routed single-page application shell.
//!
//! A [`Router`] resolves the URL fragment to a route, swaps the matching
//! screen into view with freshly fetched markup and starts the route's page
//! controller. [`App`] runs the one-time bootstrap and feeds fragment changes
//! to the router.

pub mod app;
pub mod client;
pub mod config;
pub mod document;
pub mod location;
pub mod logging;
pub mod page;
pub mod router;
pub mod routing;
pub mod script;
pub mod shutdown;
pub mod telemetry;
pub mod template;

pub use app::{App, AppError};
pub use config::{NavigationPolicy, ShellConfig};
pub use document::{Document, MemoryDocument, ScreenContainer};
pub use location::Location;
pub use page::{PageCleanup, PageController, PageError, PageInit, PageRegistry};
pub use router::{RenderOutcome, Router, RouterPhase};
pub use routing::{Route, RouteTable};
pub use script::{BundledModules, ModuleLoader, RemoteModules, ScriptLoadError, ScriptLoader};
pub use template::{HttpTemplateLoader, TemplateLoadError, TemplateSource};
