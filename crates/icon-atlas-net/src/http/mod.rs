//! HTTP transport for the icon registry.
//!
//! A thin layer over `reqwest` that [`IconifyClient`](crate::IconifyClient)
//! is written against: GET requests with headers, and responses that decode
//! as JSON or SVG text.
//!
//! # Example
//!
//! ```ignore
//! use icon_atlas_net::http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//!
//! let url = Url::parse("https://api.iconify.design/collections")?;
//! let index: serde_json::Value = client
//!     .get(url)
//!     .header(ACCEPT, "application/json")
//!     .send()
//!     .await?
//!     .error_for_status_with_body()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::RegistryRequest;
pub use response::HttpResponse;
