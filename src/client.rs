//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::Client;

use crate::config::ServerConfig;

/// Build the client used for template, module and telemetry requests.
///
/// No total timeout is applied unless `request_timeout_seconds` is set.
pub fn build_client(server: &ServerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(u64::from(server.connect_timeout_seconds)));

    if let Some(secs) = server.request_timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Join a server origin and an absolute path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://host:5000/", "/templates/news.html"),
            "http://host:5000/templates/news.html"
        );
        assert_eq!(join_url("http://host", "a.js"), "http://host/a.js");
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&ServerConfig::default()).is_ok());
    }
}
