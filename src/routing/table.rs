//! Static route table and fragment resolution.
//!
//! Unknown fragments never produce an error: [`RouteTable::resolve`] degrades
//! them to the default route. [`RouteTable::lookup`] is the strict variant.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{RouteConfig, ShellConfig};

/// A named navigable state, bound to a template and an optional page module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub template: String,
    pub script: Option<String>,
    pub parametric: bool,
}

impl From<&RouteConfig> for Route {
    fn from(config: &RouteConfig) -> Self {
        Self {
            name: config.name.clone(),
            template: config.template.clone(),
            script: config.script.clone(),
            parametric: config.parametric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown route '{name}'")]
pub struct UnknownRouteError {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("Default route '{0}' is not registered")]
    MissingDefault(String),
    #[error("Route '{0}' is registered twice")]
    Duplicate(String),
}

/// Immutable mapping route name -> [`Route`], built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Arc<HashMap<String, Route>>,
    default_route: String,
}

impl RouteTable {
    pub fn new(
        routes: impl IntoIterator<Item = Route>,
        default_route: impl Into<String>,
    ) -> Result<Self, RouteTableError> {
        let mut map = HashMap::new();
        for route in routes {
            let name = route.name.clone();
            if map.insert(name.clone(), route).is_some() {
                return Err(RouteTableError::Duplicate(name));
            }
        }

        let default_route = default_route.into();
        if !map.contains_key(&default_route) {
            return Err(RouteTableError::MissingDefault(default_route));
        }

        Ok(Self {
            routes: Arc::new(map),
            default_route,
        })
    }

    pub fn from_config(config: &ShellConfig) -> Result<Self, RouteTableError> {
        Self::new(
            config.routes.iter().map(Route::from),
            config.router.default_route.clone(),
        )
    }

    /// The loading/splash route used for fallbacks and recovery.
    pub fn default_route(&self) -> &Route {
        // Presence is checked in `new`.
        &self.routes[&self.default_route]
    }

    pub fn lookup(&self, name: &str) -> Result<&Route, UnknownRouteError> {
        self.routes.get(name).ok_or_else(|| UnknownRouteError {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a raw URL fragment to a route.
    ///
    /// Accepts `#route`, `route/param` for parametric routes and
    /// `route?query` / `route&query` suffixes.
    pub fn resolve(&self, fragment: &str) -> &Route {
        let name = route_name(fragment);
        let name = self.strip_param(name);

        match self.lookup(name) {
            Ok(route) => {
                tracing::debug!(fragment, route = %route.name, "Resolved route");
                route
            }
            Err(e) => {
                tracing::warn!(
                    fragment,
                    fallback = %self.default_route,
                    "{e}, falling back to default route"
                );
                self.default_route()
            }
        }
    }

    fn strip_param<'a>(&self, name: &'a str) -> &'a str {
        match name.split_once('/') {
            Some((base, _)) if self.routes.get(base).is_some_and(|r| r.parametric) => base,
            _ => name,
        }
    }
}

/// The fragment with the leading `#` and any `?`/`&` suffix removed.
pub fn route_name(fragment: &str) -> &str {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment).trim();
    match fragment.find(['?', '&']) {
        Some(idx) => &fragment[..idx],
        None => fragment,
    }
}
