//! Access to the remote icon registry.
//!
//! [`RemoteCatalogClient`] is the seam between the catalog and the network:
//! the render cache and the view-models are generic over it, and
//! [`IconifyClient`] is the HTTP implementation used in production.

mod iconify;
mod types;

use std::collections::BTreeMap;
use std::future::Future;

pub use iconify::{DEFAULT_BASE_URL, IconifyClient, IconifyClientBuilder};
pub use types::{
    Author, CollectionDetail, CollectionEntry, CollectionSummary, IconHeight, License,
};

use crate::error::Result;
use crate::render_cache::IconRenderKey;

/// Source of collection indexes, icon manifests and icon markup.
///
/// Every call either yields already-parsed data or fails with a
/// [`NetworkError`](crate::NetworkError). Implementations must not retry on
/// their own; retries are left to the caller.
pub trait RemoteCatalogClient: Send + Sync + 'static {
    /// Fetch the collection index, keyed by collection prefix.
    ///
    /// Each returned entry has its `id` set to its key.
    fn list_collections(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, CollectionEntry>>> + Send;

    /// Fetch the icon manifest of one collection.
    fn collection_detail(&self, prefix: &str)
    -> impl Future<Output = Result<CollectionDetail>> + Send;

    /// Fetch the rendered markup of one icon.
    ///
    /// Unset render options are omitted from the request.
    fn icon_markup(&self, key: &IconRenderKey) -> impl Future<Output = Result<String>> + Send;
}
