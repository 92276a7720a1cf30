//! Shell configuration: server location, route table and router settings.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{NavigationPolicy, RouteConfig, RouterConfig, ServerConfig, ShellConfig};
