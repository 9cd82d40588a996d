//! Coalescing cache for rendered icon markup.
//!
//! [`IconRenderCache`] guarantees that at most one fetch per
//! [`IconRenderKey`] is outstanding at any time, and that a key whose fetch
//! succeeded is never fetched again for the lifetime of the cache.
//!
//! ```ignore
//! let cache = IconRenderCache::new(IconifyClient::new()?);
//! let key = IconRenderKey::new("mdi", "home", IconRequestOptions::default());
//!
//! // Both callers share a single request.
//! let (a, b) = tokio::join!(cache.resolve(&key), cache.resolve(&key));
//! assert_eq!(a?, b?);
//!
//! // Hits complete without suspending.
//! let markup = cache.cached(&key);
//! ```
//!
//! Entries are never evicted. A long-lived process that renders many distinct
//! keys grows the cache without bound.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::{self, BoxFuture, Either, FutureExt, Ready, Shared};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use url::form_urlencoded;

use crate::error::{NetworkError, Result};
use crate::registry::RemoteCatalogClient;
use crate::runtime;
use icon_atlas_core::logging::targets;

/// Visual options of one icon render request.
///
/// Absent and blank values are equivalent: both mean "let the registry
/// decide", and both are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IconRequestOptions {
    /// Icon width, e.g. `"32px"`.
    pub width: Option<String>,
    /// Icon height.
    pub height: Option<String>,
    /// Fill color for monochrome icons.
    pub color: Option<String>,
    /// `"horizontal"`, `"vertical"` or both.
    pub flip: Option<String>,
    /// Rotation, in quarter turns or degrees.
    pub rotate: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == value.len() {
            Some(value)
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl IconRequestOptions {
    /// Trim every option and drop the blank ones.
    pub fn normalized(self) -> Self {
        Self {
            width: normalize(self.width),
            height: normalize(self.height),
            color: normalize(self.color),
            flip: normalize(self.flip),
            rotate: normalize(self.rotate),
        }
    }

    /// Set options as `(name, value)` pairs, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("width", &self.width),
            ("height", &self.height),
            ("color", &self.color),
            ("flip", &self.flip),
            ("rotate", &self.rotate),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (name, value))
        })
        .collect()
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Percent-encodes a key segment so that `:` only ever appears as a separator.
fn escape_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// Canonical identity of one icon render request.
///
/// Two keys are equal when their canonical forms are equal, i.e.
/// `collection:icon:name=value&...` over the set options. Segments and option
/// values are percent-encoded, so distinct requests never share a form.
#[derive(Clone)]
pub struct IconRenderKey {
    collection: String,
    icon: String,
    options: IconRequestOptions,
    canonical: String,
}

impl IconRenderKey {
    /// Create a key, normalizing the options.
    pub fn new(
        collection: impl Into<String>,
        icon: impl Into<String>,
        options: IconRequestOptions,
    ) -> Self {
        let collection = collection.into();
        let icon = icon.into();
        let options = options.normalized();

        let params = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(options.query_pairs())
            .finish();
        let canonical = format!(
            "{}:{}:{params}",
            escape_segment(&collection),
            escape_segment(&icon)
        );

        Self {
            collection,
            icon,
            options,
            canonical,
        }
    }

    /// Collection prefix.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Icon name.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Normalized options.
    pub fn options(&self) -> &IconRequestOptions {
        &self.options
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for IconRenderKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for IconRenderKey {}

impl Hash for IconRenderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for IconRenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for IconRenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IconRenderKey").field(&self.canonical).finish()
    }
}

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<str>>>>;

/// Future returned by [`IconRenderCache::resolve`].
///
/// Cache hits are already complete; everything else is a handle on the
/// single in-flight fetch for the key.
pub type IconFetch = Either<Ready<Result<Arc<str>>>, SharedFetch>;

#[derive(Default)]
struct CacheState {
    entries: HashMap<IconRenderKey, Arc<str>>,
    pending: HashMap<IconRenderKey, SharedFetch>,
}

struct CacheInner<C> {
    client: Arc<C>,
    state: Mutex<CacheState>,
}

/// Clears the pending entry if the fetch task dies before settling.
struct PendingGuard<C: RemoteCatalogClient> {
    inner: Arc<CacheInner<C>>,
    key: IconRenderKey,
    armed: bool,
}

impl<C: RemoteCatalogClient> Drop for PendingGuard<C> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.state.lock().pending.remove(&self.key);
        }
    }
}

/// Process-wide cache of rendered icon markup with request coalescing.
///
/// The cache is cheaply cloneable; clones share entries and in-flight
/// fetches. Construct it once and hand clones to every consumer.
pub struct IconRenderCache<C> {
    inner: Arc<CacheInner<C>>,
}

impl<C> Clone for IconRenderCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: RemoteCatalogClient> IconRenderCache<C> {
    /// Create an empty cache over `client`.
    pub fn new(client: C) -> Self {
        Self::with_shared_client(Arc::new(client))
    }

    /// Create an empty cache over a client shared with other components.
    pub fn with_shared_client(client: Arc<C>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                client,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }

    /// The underlying registry client.
    pub fn client(&self) -> &Arc<C> {
        &self.inner.client
    }

    /// Resolve the markup for `key`.
    ///
    /// A cached key yields a completed future. A key with a fetch in flight
    /// attaches to that fetch. Otherwise a new fetch is started on the
    /// runtime; it keeps running even if every returned future is dropped,
    /// and populates the cache on success. Failures are not cached.
    pub fn resolve(&self, key: &IconRenderKey) -> IconFetch {
        let mut state = self.inner.state.lock();

        if let Some(markup) = state.entries.get(key) {
            tracing::trace!(target: targets::RENDER_CACHE, %key, "cache hit");
            return Either::Left(future::ready(Ok(Arc::clone(markup))));
        }

        if let Some(fetch) = state.pending.get(key) {
            tracing::trace!(target: targets::RENDER_CACHE, %key, "attaching to in-flight fetch");
            return Either::Right(fetch.clone());
        }

        tracing::debug!(target: targets::RENDER_CACHE, %key, "cache miss, fetching");

        // Registered before the lock is released, so the task cannot settle
        // ahead of its own pending entry.
        let task = runtime::spawn(Self::fetch(Arc::clone(&self.inner), key.clone()));
        let fetch = async move {
            task.await
                .unwrap_or_else(|err| Err(NetworkError::from(err)))
        }
        .boxed()
        .shared();

        state.pending.insert(key.clone(), fetch.clone());
        Either::Right(fetch)
    }

    async fn fetch(inner: Arc<CacheInner<C>>, key: IconRenderKey) -> Result<Arc<str>> {
        let mut guard = PendingGuard {
            inner,
            key,
            armed: true,
        };

        let result = guard
            .inner
            .client
            .icon_markup(&guard.key)
            .await
            .map(Arc::<str>::from);

        {
            let mut state = guard.inner.state.lock();
            state.pending.remove(&guard.key);
            match &result {
                Ok(markup) => {
                    state.entries.insert(guard.key.clone(), Arc::clone(markup));
                    tracing::trace!(
                        target: targets::RENDER_CACHE,
                        key = %guard.key,
                        bytes = markup.len(),
                        "cached icon markup"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        target: targets::RENDER_CACHE,
                        key = %guard.key,
                        error = %err,
                        "icon fetch failed"
                    );
                }
            }
        }
        guard.armed = false;

        result
    }

    /// Resolve `key` and hand the result to `on_ready`.
    ///
    /// On a cache hit the callback runs before this returns. Otherwise it
    /// runs once the shared fetch settles, unless the returned handle was
    /// released first. Releasing the handle never cancels the fetch itself.
    pub fn subscribe<F>(&self, key: &IconRenderKey, on_ready: F) -> RenderHandle
    where
        F: FnOnce(Result<Arc<str>>) + Send + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));

        if let Some(markup) = self.cached(key) {
            on_ready(Ok(markup));
            return RenderHandle { waiter: None, live };
        }

        let fetch = self.resolve(key);
        let waiter = runtime::spawn({
            let live = Arc::clone(&live);
            async move {
                let result = fetch.await;
                if live.load(Ordering::Acquire) {
                    on_ready(result);
                }
            }
        });
        RenderHandle {
            waiter: Some(waiter),
            live,
        }
    }

    /// Cached markup for `key`, if a fetch for it has succeeded.
    pub fn cached(&self, key: &IconRenderKey) -> Option<Arc<str>> {
        self.inner.state.lock().entries.get(key).cloned()
    }

    /// Whether a fetch for `key` is in flight.
    pub fn is_pending(&self, key: &IconRenderKey) -> bool {
        self.inner.state.lock().pending.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of fetches in flight.
    pub fn pending_len(&self) -> usize {
        self.inner.state.lock().pending.len()
    }
}

impl<C> fmt::Debug for IconRenderCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("IconRenderCache")
            .field("entries", &state.entries.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

/// A consumer's interest in one render result.
///
/// Once the handle is dropped (or [`release`](Self::release)d), a callback
/// that has not started yet never runs. A callback already running on another
/// worker is not interrupted. The underlying fetch is left alone and still
/// fills the cache.
#[must_use = "dropping the handle discards the pending result"]
pub struct RenderHandle {
    waiter: Option<JoinHandle<()>>,
    live: Arc<AtomicBool>,
}

impl RenderHandle {
    /// Whether the callback has already run, or will never run.
    pub fn is_settled(&self) -> bool {
        self.waiter.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Release the handle, discarding a late result.
    pub fn release(self) {}
}

impl Drop for RenderHandle {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
        if let Some(waiter) = self.waiter.take() {
            waiter.abort();
        }
    }
}

impl fmt::Debug for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHandle")
            .field("settled", &self.is_settled())
            .finish()
    }
}
