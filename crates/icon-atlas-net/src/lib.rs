//! Networking for Icon Atlas.
//!
//! This crate talks to the remote icon registry and caches what it returns:
//!
//! - **HTTP**: a GET-only `reqwest` wrapper configured with a timeout and
//!   user agent
//! - **Registry**: the [`RemoteCatalogClient`] trait and its Iconify
//!   implementation, [`IconifyClient`]
//! - **Render cache**: [`IconRenderCache`], which coalesces concurrent
//!   requests for the same icon and memoizes the markup
//!
//! # Fetching the catalog
//!
//! ```ignore
//! use icon_atlas_net::{IconifyClient, RemoteCatalogClient};
//!
//! let client = IconifyClient::new()?;
//! let collections = client.list_collections().await?;
//! let detail = client.collection_detail("mdi").await?;
//! ```
//!
//! # Rendering icons
//!
//! ```ignore
//! use icon_atlas_net::{IconRenderCache, IconRenderKey, IconRequestOptions};
//!
//! let cache = IconRenderCache::new(IconifyClient::new()?);
//! let key = IconRenderKey::new("mdi", "home", IconRequestOptions::default());
//!
//! // Callback style: the handle must be kept for as long as the result is
//! // wanted. Dropping it discards a late result.
//! let handle = cache.subscribe(&key, |markup| {
//!     if let Ok(svg) = markup {
//!         println!("{svg}");
//!     }
//! });
//! ```

mod error;
pub mod http;
pub mod registry;
pub mod render_cache;
pub mod runtime;

pub use error::{NetworkError, Result};

// Re-export commonly used types at the crate root
pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpResponse};
pub use registry::{
    Author, CollectionDetail, CollectionEntry, CollectionSummary, IconHeight, IconifyClient,
    License, RemoteCatalogClient,
};
pub use render_cache::{
    IconFetch, IconRenderCache, IconRenderKey, IconRequestOptions, RenderHandle,
};
