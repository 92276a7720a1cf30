use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Where templates, page modules and telemetry are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin of the application server (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix under which `<template>.html` files are served.
    #[serde(default = "default_templates_path")]
    pub templates_path: String,
    /// Endpoint receiving the device descriptor at startup.
    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total request timeout in seconds. Unset means fetches may hang forever.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

/// What happens to a navigation trigger that fires while a render is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationPolicy {
    /// The trigger is discarded.
    #[default]
    Drop,
    /// One follow-up render runs after the in-flight one, reading the fragment anew.
    QueueLatest,
}

/// Router behaviour and the static alias tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Route used for unknown fragments and for failure recovery.
    #[serde(default = "default_route_name")]
    pub default_route: String,
    /// Element id of the shared chrome (footer/navigation).
    #[serde(default = "default_chrome_container")]
    pub chrome_container: String,
    /// Template loaded into the chrome container at startup.
    #[serde(default = "default_chrome_template")]
    pub chrome_template: String,
    /// Routes that show the shared chrome.
    #[serde(default = "default_chrome_routes")]
    pub chrome_routes: Vec<String>,
    #[serde(default)]
    pub navigation_policy: NavigationPolicy,
    /// Keep fetched templates in memory instead of reloading them per navigation.
    #[serde(default)]
    pub cache_templates: bool,
    /// Route name -> screen container id, for routes reusing another container.
    #[serde(default = "default_container_aliases")]
    pub container_aliases: HashMap<String, String>,
    /// Route name -> controller identifier, for routes not following `<Route>Page`.
    #[serde(default = "default_controller_aliases")]
    pub controller_aliases: HashMap<String, String>,
}

/// One navigable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    pub template: String,
    /// Locator of the page module driving this route.
    #[serde(default)]
    pub script: Option<String>,
    /// Whether `<name>/<param>` fragments resolve to this route.
    #[serde(default)]
    pub parametric: bool,
}

impl RouteConfig {
    fn page(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            script: Some(format!("/static/js/pages/{}.js", template)),
            parametric: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_templates_path() -> String {
    "/templates".to_string()
}

fn default_telemetry_path() -> String {
    "/log-device-info".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_route_name() -> String {
    "loading".to_string()
}

fn default_chrome_container() -> String {
    "footer-container".to_string()
}

fn default_chrome_template() -> String {
    "footer".to_string()
}

fn default_chrome_routes() -> Vec<String> {
    ["main", "news", "brand", "friends", "menu"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_container_aliases() -> HashMap<String, String> {
    HashMap::from([("my-brand".to_string(), "screen-brand".to_string())])
}

fn default_controller_aliases() -> HashMap<String, String> {
    HashMap::from([("my-brand".to_string(), "BrandPage".to_string())])
}

fn default_routes() -> Vec<RouteConfig> {
    let mut routes: Vec<RouteConfig> = [
        "loading",
        "main",
        "unsupported",
        "news",
        "friends",
        "brand",
        "menu",
        "create-brand",
    ]
    .into_iter()
    .map(|name| RouteConfig::page(name, name))
    .collect();

    routes.push(RouteConfig {
        parametric: true,
        ..RouteConfig::page("my-brand", "brand")
    });
    routes
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            templates_path: default_templates_path(),
            telemetry_path: default_telemetry_path(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_route: default_route_name(),
            chrome_container: default_chrome_container(),
            chrome_template: default_chrome_template(),
            chrome_routes: default_chrome_routes(),
            navigation_policy: NavigationPolicy::default(),
            cache_templates: false,
            container_aliases: default_container_aliases(),
            controller_aliases: default_controller_aliases(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            router: RouterConfig::default(),
            routes: default_routes(),
        }
    }
}
