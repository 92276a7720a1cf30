//! Navigation state machine.

mod engine;
mod state;

pub use engine::{Router, TEMPLATE_ERROR_MARKUP};
pub use state::{NavigationState, RenderOutcome, RouterPhase};
