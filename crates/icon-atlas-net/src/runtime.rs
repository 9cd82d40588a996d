//! Runtime management for background fetches.
//!
//! Fetches started by the render cache run on the ambient tokio runtime when
//! there is one. Synchronous callers fall back to a small shared runtime that
//! is created on first use.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize the shared runtime.
///
/// Calling this is optional. If not called explicitly, the runtime is created
/// the first time work has to be spawned outside of a tokio context.
pub fn init() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("icon-atlas-net")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Get a reference to the shared runtime.
pub fn get() -> &'static Runtime {
    init()
}

/// Block on a future using the shared runtime.
///
/// # Warning
///
/// Do not call this from within an async context, as it will block the
/// current thread.
pub fn block_on<F: Future>(future: F) -> F::Output {
    get().block_on(future)
}

/// Spawn a future on the current runtime, or on the shared one when the
/// caller is not inside a tokio context.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => handle.spawn(future),
        Err(_) => get().spawn(future),
    }
}
