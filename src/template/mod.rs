//! HTML fragment loading.

mod loader;

pub use loader::{load_into, HttpTemplateLoader, TemplateLoadError, TemplateSource};
