//! Page controllers: lifecycle contract, naming convention and registry.

mod controller;
mod naming;
mod registry;

pub use controller::{PageCleanup, PageController, PageError, PageInit};
pub use naming::{conventional_name, ControllerNames};
pub use registry::{PageFactory, PageRegistry};
