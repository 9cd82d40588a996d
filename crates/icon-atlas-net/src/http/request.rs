//! Pending registry request.

use http::{HeaderName, HeaderValue};
use url::Url;

use super::response::HttpResponse;
use crate::error::Result;
use icon_atlas_core::logging::targets;

/// A GET request that has not been sent yet.
#[must_use = "a request does nothing until it is sent"]
pub struct RegistryRequest {
    inner: reqwest::RequestBuilder,
    url: Url,
}

impl RegistryRequest {
    pub(crate) fn new(inner: reqwest::RequestBuilder, url: Url) -> Self {
        Self { inner, url }
    }

    /// The URL this request targets.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Set a request header.
    pub fn header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.inner = self.inner.header(name, HeaderValue::from_static(value));
        self
    }

    /// Send the request and wait for the response head.
    pub async fn send(self) -> Result<HttpResponse> {
        tracing::trace!(target: targets::HTTP, url = %self.url, "sending GET");
        let response = self.inner.send().await?;
        tracing::trace!(
            target: targets::HTTP,
            url = %self.url,
            status = response.status().as_u16(),
            "response received"
        );
        Ok(HttpResponse::from_reqwest(response))
    }
}
