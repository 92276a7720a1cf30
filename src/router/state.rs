use crate::routing::Route;

/// Router state-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    Idle,
    Rendering,
}

/// Navigation bookkeeping, mutated only by the router's render routine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_route: Option<Route>,
    /// Locator of the page module being started by the in-flight render.
    pub pending_script_locator: Option<String>,
    /// Mutual-exclusion flag; not a queue.
    pub is_rendering: bool,
    /// Set by a trigger that arrived mid-render under the queue-latest policy.
    pub rerender_requested: bool,
}

impl NavigationState {
    pub fn phase(&self) -> RouterPhase {
        if self.is_rendering {
            RouterPhase::Rendering
        } else {
            RouterPhase::Idle
        }
    }
}

/// Result of one call to [`Router::render_route`](super::Router::render_route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The route was displayed and its controller started.
    Rendered { route: String },
    /// The template could not be loaded; an error message was written into
    /// the route's container and the current route is unchanged.
    TemplateFailed { route: String },
    /// Starting `failed_route` failed and the default route was rendered instead.
    Recovered { failed_route: String },
    /// Both the route and the recovery render failed.
    Failed { route: String },
    /// A render was in flight; the trigger was discarded.
    Dropped,
    /// A render was in flight; a follow-up render was requested.
    Queued,
}

impl RenderOutcome {
    /// Whether this call performed a render pass itself.
    pub fn did_render(&self) -> bool {
        !matches!(self, RenderOutcome::Dropped | RenderOutcome::Queued)
    }
}
