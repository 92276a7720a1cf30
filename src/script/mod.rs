//! Page-module loading and controller start-up.

mod error;
mod loader;
mod modules;

pub use error::ScriptLoadError;
pub use loader::ScriptLoader;
pub use modules::{BundledModules, ModuleLoader, PageModule, RemoteModules};
