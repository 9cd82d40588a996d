//! Tests for the coalescing icon render cache.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::Either;
use parking_lot::Mutex;
use tokio::sync::{Semaphore, oneshot};

use icon_atlas_net::{
    CollectionDetail, CollectionEntry, IconRenderCache, IconRenderKey, IconRequestOptions,
    NetworkError, RemoteCatalogClient, Result, runtime,
};

/// Registry double that counts icon fetches and can hold them until released.
#[derive(Default)]
struct MockRegistry {
    fetches: AtomicUsize,
    failures: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl MockRegistry {
    fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    fn failing(times: usize) -> Self {
        Self {
            failures: AtomicUsize::new(times),
            ..Default::default()
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RemoteCatalogClient for MockRegistry {
    async fn list_collections(&self) -> Result<BTreeMap<String, CollectionEntry>> {
        Ok(BTreeMap::new())
    }

    async fn collection_detail(&self, prefix: &str) -> Result<CollectionDetail> {
        Ok(CollectionDetail {
            prefix: prefix.to_string(),
            ..Default::default()
        })
    }

    async fn icon_markup(&self, key: &IconRenderKey) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|_| NetworkError::Cancelled)?;
        }

        let scheduled_failure = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if scheduled_failure || key.icon() == "broken" {
            return Err(NetworkError::HttpStatus {
                status: 500,
                message: Some("upstream failure".to_string()),
            });
        }

        Ok(format!("<svg data-key=\"{key}\"></svg>"))
    }
}

fn key(icon: &str) -> IconRenderKey {
    IconRenderKey::new("mdi", icon, IconRequestOptions::default())
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_resolves_share_one_fetch() {
    let gate = Arc::new(Semaphore::new(0));
    let cache = IconRenderCache::new(MockRegistry::gated(Arc::clone(&gate)));
    let key = key("home");

    let first = cache.resolve(&key);
    let second = cache.resolve(&key);
    assert!(cache.is_pending(&key));
    assert_eq!(cache.pending_len(), 1);

    gate.add_permits(1);
    let (a, b) = tokio::join!(first, second);

    let a = a.expect("first resolve failed");
    let b = b.expect("second resolve failed");
    assert_eq!(a, b);
    assert_eq!(&*a, "<svg data-key=\"mdi:home:\"></svg>");
    assert_eq!(cache.client().fetches(), 1);
    assert!(!cache.is_pending(&key));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_hit_resolves_without_suspending() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let key = key("home");

    let markup = cache.resolve(&key).await.expect("resolve failed");

    let hit = cache.resolve(&key);
    assert!(matches!(hit, Either::Left(_)));
    let again = hit.now_or_never().expect("hit suspended").expect("hit failed");

    assert_eq!(markup, again);
    assert_eq!(cache.cached(&key), Some(markup));
    assert_eq!(cache.client().fetches(), 1);
}

#[tokio::test]
async fn test_blank_options_hit_same_entry() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let omitted = key("home");
    let blank = IconRenderKey::new(
        "mdi",
        "home",
        IconRequestOptions {
            color: Some(String::new()),
            rotate: Some(" ".to_string()),
            ..Default::default()
        },
    );

    cache.resolve(&omitted).await.expect("resolve failed");
    cache.resolve(&blank).await.expect("resolve failed");

    assert_eq!(cache.client().fetches(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_separator_lookalikes_get_their_own_entries() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let smuggled = IconRenderKey::new(
        "mdi",
        "home",
        IconRequestOptions {
            color: Some("red&flip=horizontal".to_string()),
            ..Default::default()
        },
    );
    let separate = IconRenderKey::new(
        "mdi",
        "home",
        IconRequestOptions {
            color: Some("red".to_string()),
            flip: Some("horizontal".to_string()),
            ..Default::default()
        },
    );

    cache.resolve(&smuggled).await.expect("resolve failed");
    assert!(matches!(cache.resolve(&separate), Either::Right(_)));
    cache.resolve(&separate).await.expect("resolve failed");

    let nested = IconRenderKey::new("a:b", "c", IconRequestOptions::default());
    let split = IconRenderKey::new("a", "b:c", IconRequestOptions::default());
    cache.resolve(&nested).await.expect("resolve failed");
    cache.resolve(&split).await.expect("resolve failed");

    assert_eq!(cache.client().fetches(), 4);
    assert_eq!(cache.len(), 4);
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let cache = IconRenderCache::new(MockRegistry::failing(1));
    let key = key("home");

    let err = cache.resolve(&key).await.expect_err("first fetch should fail");
    assert!(matches!(err, NetworkError::HttpStatus { status: 500, .. }));
    assert!(!cache.is_pending(&key));
    assert!(cache.cached(&key).is_none());

    let markup = cache.resolve(&key).await.expect("retry failed");
    assert!(markup.contains("mdi:home:"));
    assert_eq!(cache.client().fetches(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_coalesced_failure_reaches_every_caller() {
    let gate = Arc::new(Semaphore::new(0));
    let cache = IconRenderCache::new(MockRegistry::gated(Arc::clone(&gate)));
    let key = key("broken");

    let first = cache.resolve(&key);
    let second = cache.resolve(&key);
    gate.add_permits(1);
    let (a, b) = tokio::join!(first, second);

    assert_eq!(a.unwrap_err(), b.unwrap_err());
    assert_eq!(cache.client().fetches(), 1);
    assert_eq!(cache.pending_len(), 0);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_sibling_failure_is_isolated() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let good = key("home");
    let bad = key("broken");

    let (good_result, bad_result) = tokio::join!(cache.resolve(&good), cache.resolve(&bad));

    assert!(good_result.is_ok());
    assert!(bad_result.is_err());
    assert!(cache.cached(&good).is_some());
    assert!(cache.cached(&bad).is_none());
}

#[tokio::test]
async fn test_subscribe_hit_runs_callback_immediately() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let key = key("home");
    cache.resolve(&key).await.expect("resolve failed");

    let received = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&received);
    let handle = cache.subscribe(&key, move |result| {
        *slot.lock() = Some(result);
    });

    assert!(handle.is_settled());
    let result = received.lock().take().expect("callback did not run");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_subscribe_miss_delivers_result() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let key = key("home");

    let (tx, rx) = oneshot::channel();
    let _handle = cache.subscribe(&key, move |result| {
        let _ = tx.send(result);
    });

    let markup = rx.await.expect("callback dropped").expect("fetch failed");
    assert_eq!(cache.cached(&key), Some(markup));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_released_handle_discards_late_result() {
    let gate = Arc::new(Semaphore::new(0));
    let cache = IconRenderCache::new(MockRegistry::gated(Arc::clone(&gate)));
    let key = key("home");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handle = cache.subscribe(&key, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!handle.is_settled());

    handle.release();
    gate.add_permits(1);

    // The fetch itself is not cancelled and still fills the cache.
    wait_until(|| cache.cached(&key).is_some()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(cache.client().fetches(), 1);
}

#[tokio::test]
async fn test_clones_share_state() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let other = cache.clone();
    let key = key("home");

    cache.resolve(&key).await.expect("resolve failed");

    assert!(other.cached(&key).is_some());
    assert_eq!(other.client().fetches(), 1);
}

#[test]
fn test_resolve_outside_runtime() {
    let cache = IconRenderCache::new(MockRegistry::default());
    let key = key("home");

    let markup = runtime::block_on(cache.resolve(&key)).expect("resolve failed");

    assert!(markup.starts_with("<svg"));
    assert_eq!(cache.len(), 1);
}
