//! HTTP client for the Iconify API.

use std::collections::BTreeMap;
use std::time::Duration;

use http::header::ACCEPT;
use url::Url;

use super::RemoteCatalogClient;
use super::types::{CollectionDetail, CollectionEntry};
use crate::error::{NetworkError, Result};
use crate::http::{HttpClient, HttpClientBuilder, HttpClientConfig};
use crate::render_cache::IconRenderKey;
use icon_atlas_core::logging::targets;

/// Public Iconify API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.iconify.design";

/// Builder for [`IconifyClient`].
pub struct IconifyClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl IconifyClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<IconifyClient> {
        let base_url = Url::parse(self.base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(self.base_url));
        }

        let mut http = HttpClientBuilder::new();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }
        let http = http.build()?;

        Ok(IconifyClient { base_url, http })
    }
}

/// [`RemoteCatalogClient`] backed by the Iconify HTTP API.
#[derive(Clone, Debug)]
pub struct IconifyClient {
    base_url: Url,
    http: HttpClient,
}

impl IconifyClient {
    /// Create a client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::builder(DEFAULT_BASE_URL).build()
    }

    /// Create a builder for a client rooted at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> IconifyClientBuilder {
        IconifyClientBuilder::new(base_url)
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport settings in effect.
    pub fn http_config(&self) -> &HttpClientConfig {
        self.http.config()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the collection index.
    pub fn collections_url(&self) -> Result<Url> {
        self.endpoint(&["collections"])
    }

    /// URL of one collection's manifest.
    pub fn collection_url(&self, prefix: &str) -> Result<Url> {
        let mut url = self.endpoint(&["collection"])?;
        url.query_pairs_mut().append_pair("prefix", prefix);
        Ok(url)
    }

    /// URL of one rendered icon, with a query parameter per set option.
    pub fn icon_url(&self, key: &IconRenderKey) -> Result<Url> {
        let file = format!("{}.svg", key.icon());
        let mut url = self.endpoint(&[key.collection(), &file])?;
        let pairs = key.options().query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

impl RemoteCatalogClient for IconifyClient {
    async fn list_collections(&self) -> Result<BTreeMap<String, CollectionEntry>> {
        let url = self.collections_url()?;
        tracing::debug!(target: targets::REGISTRY, %url, "fetching collection index");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status_with_body()
            .await?;

        let mut collections: BTreeMap<String, CollectionEntry> = response.json().await?;
        for (id, entry) in collections.iter_mut() {
            entry.id.clone_from(id);
        }
        Ok(collections)
    }

    async fn collection_detail(&self, prefix: &str) -> Result<CollectionDetail> {
        let url = self.collection_url(prefix)?;
        tracing::debug!(target: targets::REGISTRY, %url, "fetching collection detail");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status_with_body()
            .await?;

        let mut detail: CollectionDetail = response.json().await?;
        if detail.prefix.is_empty() {
            detail.prefix = prefix.to_string();
        }
        Ok(detail)
    }

    async fn icon_markup(&self, key: &IconRenderKey) -> Result<String> {
        let url = self.icon_url(key)?;
        tracing::trace!(target: targets::REGISTRY, %url, "fetching icon markup");

        self.http
            .get(url)
            .send()
            .await?
            .error_for_status_with_body()
            .await?
            .text()
            .await
    }
}
