//! HTTP registry transport.
//!
//! Blocking HTTP+JSON client for the registry service. Archives are the
//! transfer encoding for template content, so the registry needs no
//! second serialization format:
//!
//! - `GET  /templates` - JSON index of published versions
//! - `GET  /templates/{identifier}/{version}` - archive bytes
//! - `PUT  /templates/{identifier}/{version}` - archive bytes
//!   (`?force=true` to override a version conflict)
//!
//! Every call is bounded by the configured timeout; timeouts and
//! connection failures surface as `RegistryUnavailable` without retry.

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::client::{RegistryClient, RemoteEntry};
use crate::archive;
use crate::config::RegistryConfig;
use crate::error::{Result, TdkError};
use crate::template::model::TemplateModel;

/// Blocking HTTP implementation of [`RegistryClient`].
pub struct HttpRegistryClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpRegistryClient {
    /// Create a client for the configured registry endpoint.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(concat!("tdk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// The configured per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The registry endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn template_url(&self, identifier: &str, version: &str) -> String {
        format!("{}/templates/{}/{}", self.base_url, identifier, version)
    }

    fn unavailable(&self, err: reqwest::Error) -> TdkError {
        TdkError::RegistryUnavailable {
            message: format!("{}: {}", self.base_url, err),
        }
    }

    fn unexpected_status(&self, status: StatusCode) -> TdkError {
        TdkError::RegistryUnavailable {
            message: format!("{} responded with HTTP {}", self.base_url, status),
        }
    }
}

impl RegistryClient for HttpRegistryClient {
    fn list(&self) -> Result<Vec<RemoteEntry>> {
        let url = format!("{}/templates", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.unavailable(e))?;

        if !response.status().is_success() {
            return Err(self.unexpected_status(response.status()));
        }

        response.json().map_err(|e| self.unavailable(e))
    }

    fn fetch(&self, identifier: &str, version: &str) -> Result<TemplateModel> {
        let url = self.template_url(identifier, version);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.unavailable(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TdkError::NotFound {
                identifier: identifier.to_string(),
                version: version.to_string(),
            }),
            status if status.is_success() => {
                let bytes = response.bytes().map_err(|e| self.unavailable(e))?;
                archive::unpackage(&bytes)
            }
            status => Err(self.unexpected_status(status)),
        }
    }

    fn publish(&self, model: &TemplateModel, force: bool) -> Result<()> {
        let mut url = self.template_url(&model.identifier, &model.version);
        if force {
            url.push_str("?force=true");
        }

        let bytes = archive::package(model)?;
        tracing::debug!(
            identifier = %model.identifier,
            version = %model.version,
            bytes = bytes.len(),
            force,
            "publishing to {}",
            self.base_url
        );

        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .map_err(|e| self.unavailable(e))?;

        match response.status() {
            StatusCode::CONFLICT => Err(TdkError::VersionConflict {
                identifier: model.identifier.clone(),
                version: model.version.clone(),
            }),
            status if status.is_success() => Ok(()),
            status => Err(self.unexpected_status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> RegistryConfig {
        RegistryConfig {
            url: url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = HttpRegistryClient::new(&config("http://registry.example/")).unwrap();
        assert_eq!(client.base_url(), "http://registry.example");
    }

    #[test]
    fn timeout_comes_from_config() {
        let client = HttpRegistryClient::new(&config("http://registry.example")).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn template_url_joins_identifier_and_version() {
        let client = HttpRegistryClient::new(&config("http://registry.example")).unwrap();
        assert_eq!(
            client.template_url("org.demo", "1.0.0"),
            "http://registry.example/templates/org.demo/1.0.0"
        );
    }
}
