use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use thiserror::Error;

use crate::client::join_url;
use crate::config::ServerConfig;
use crate::document::Document;

/// Failure to fetch a template.
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("Template '{name}' returned HTTP {status}")]
    Status { name: String, status: u16 },

    #[error("Template '{name}' could not be fetched: {source}")]
    Network {
        name: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TemplateLoadError {
    pub fn template(&self) -> &str {
        match self {
            TemplateLoadError::Status { name, .. } | TemplateLoadError::Network { name, .. } => {
                name
            }
        }
    }
}

/// Source of HTML fragments by template name.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<String, TemplateLoadError>;
}

/// Fetches `<base_url><templates_path>/<name>.html`.
pub struct HttpTemplateLoader {
    client: Client,
    base_url: String,
    templates_path: String,
    cache: Option<Mutex<HashMap<String, String>>>,
}

impl HttpTemplateLoader {
    pub fn new(client: Client, server: &ServerConfig) -> Self {
        Self {
            client,
            base_url: server.base_url.clone(),
            templates_path: server.templates_path.clone(),
            cache: None,
        }
    }

    /// Keep successfully fetched markup and serve later loads from memory.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(|| Mutex::new(HashMap::new()));
        self
    }

    pub fn url_for(&self, name: &str) -> String {
        let path = format!("{}/{}.html", self.templates_path.trim_end_matches('/'), name);
        join_url(&self.base_url, &path)
    }

    async fn fetch(&self, name: &str) -> Result<String, TemplateLoadError> {
        let url = self.url_for(name);
        tracing::debug!(template = name, %url, "Loading template");

        let network = |source| TemplateLoadError::Network {
            name: name.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TemplateLoadError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network)?;
        tracing::debug!(template = name, bytes = body.len(), "Template loaded");
        Ok(body)
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateLoader {
    async fn load(&self, name: &str) -> Result<String, TemplateLoadError> {
        if let Some(cache) = &self.cache {
            if let Some(markup) = cache.lock().get(name) {
                return Ok(markup.clone());
            }
        }

        let markup = self.fetch(name).await?;

        if let Some(cache) = &self.cache {
            cache.lock().insert(name.to_string(), markup.clone());
        }
        Ok(markup)
    }
}

/// Load `template` and write it into the element `target_id`.
///
/// Used for the shared chrome. A missing target element is not an error.
pub async fn load_into(
    source: &dyn TemplateSource,
    template: &str,
    target_id: &str,
    document: &dyn Document,
) -> Result<(), TemplateLoadError> {
    let markup = source.load(template).await?;
    if !document.set_inner_html(target_id, &markup) {
        tracing::warn!(template, target = target_id, "Target element not found");
    }
    Ok(())
}
