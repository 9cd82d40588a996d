//! Property system for Icon Atlas.
//!
//! This module provides the reactive building blocks every derived view in
//! the workspace runs on: input properties that track their own revision,
//! and memoized derivations that recompute only when an input they read has
//! changed since their last evaluation.
//!
//! # Types
//!
//! - **Property<T>**: A mutable input value with change detection
//! - **Memo<T>**: A derived value cached against the revisions of its inputs
//! - **Snapshot<T>**: A shared value compared by identity instead of content
//! - **Tracked**: Anything with a revision a `Memo` can depend on
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use icon_atlas_core::{Memo, Property};
//!
//! let search = Arc::new(Property::new(String::from("mdi")));
//! let upper = Memo::new("upper", {
//!     let search = Arc::clone(&search);
//!     move || search.get().to_uppercase()
//! })
//! .depends_on(&search);
//!
//! assert_eq!(upper.get(), "MDI");
//!
//! // Setting an equal value is not a change; nothing recomputes.
//! search.set(String::from("mdi"));
//! assert_eq!(upper.get(), "MDI");
//! assert_eq!(upper.evaluations(), 1);
//!
//! search.set(String::from("tabler"));
//! assert_eq!(upper.get(), "TABLER");
//! assert_eq!(upper.evaluations(), 2);
//! ```
//!
//! # Evaluation model
//!
//! Derivations are pulled, not pushed. Reading a `Memo` first asks each of its
//! inputs for their current revision (which in turn refreshes upstream memos)
//! and only re-runs the computation when one of those revisions moved. The
//! computation runs while the memo's own lock is held, so no reader ever
//! observes a half-updated value. Inputs are fixed at construction, which makes
//! dependency cycles unrepresentable.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::logging::targets;

/// A source of change that memoized derivations can depend on.
///
/// The revision must change whenever the observable value changes and must
/// stay put otherwise.
pub trait Tracked: Send + Sync {
    /// The current revision of the value.
    fn revision(&self) -> u64;
}

/// A reactive input value with change detection.
///
/// `set()` compares the new value with the current one and only records a
/// change (bumping the revision) when they differ. Memos depending on the
/// property recompute on their next read after such a change.
///
/// # Example
///
/// ```
/// use icon_atlas_core::Property;
///
/// let prop = Property::new(42);
/// assert_eq!(prop.get(), 42);
///
/// // Setting same value returns false (no change)
/// assert!(!prop.set(42));
///
/// // Setting different value returns true (changed)
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
    revision: AtomicU64,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            revision: AtomicU64::new(0),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            let old = std::mem::replace(&mut *current, value);
            self.revision.fetch_add(1, Ordering::AcqRel);
            tracing::trace!(target: targets::PROPERTY, "property changed");
            Some(old)
        } else {
            None
        }
    }

    /// Modify the value in place, returning `true` if the result differs from
    /// the value before the update.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut current = self.value.write();
        let mut next = current.clone();
        f(&mut next);
        if *current != next {
            *current = next;
            self.revision.fetch_add(1, Ordering::AcqRel);
            tracing::trace!(target: targets::PROPERTY, "property updated");
            true
        } else {
            false
        }
    }
}

impl<T: Send + Sync> Tracked for Property<T> {
    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .field("revision", &self.revision.load(Ordering::Acquire))
            .finish()
    }
}

/// A shared, immutable value that compares by identity.
///
/// Large inputs that are replaced wholesale (a freshly loaded catalog, say)
/// should not be compared element by element on every `set()`. Wrapping them
/// in a `Snapshot` makes two values equal only when they are the same
/// allocation.
pub struct Snapshot<T>(Arc<T>);

impl<T> Snapshot<T> {
    /// Wrap a value in a new snapshot.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Check whether two snapshots share the same allocation.
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::same(self, other)
    }
}

impl<T> Eq for Snapshot<T> {}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Snapshot<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Snapshot").field(&*self.0).finish()
    }
}

struct Cached<T> {
    stamps: Vec<u64>,
    value: T,
}

/// A memoized derivation over tracked inputs.
///
/// `Memo<T>` caches the result of its computation together with the revision
/// of every input it declared via [`depends_on`](Self::depends_on). A read
/// recomputes only if at least one of those revisions has moved. When a
/// recomputation yields a value equal to the cached one, the memo's own
/// revision stays put, so downstream memos do not recompute either.
///
/// The computation must be a pure function of the declared inputs.
pub struct Memo<T> {
    name: &'static str,
    compute: Box<dyn Fn() -> T + Send + Sync>,
    inputs: Vec<Arc<dyn Tracked>>,
    cached: Mutex<Option<Cached<T>>>,
    revision: AtomicU64,
    evaluations: AtomicUsize,
}

impl<T: Clone + PartialEq + Send + 'static> Memo<T> {
    /// Create a memo with a computation and no inputs yet.
    ///
    /// The computation runs lazily on the first read.
    pub fn new<F>(name: &'static str, compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name,
            compute: Box::new(compute),
            inputs: Vec::new(),
            cached: Mutex::new(None),
            revision: AtomicU64::new(0),
            evaluations: AtomicUsize::new(0),
        }
    }

    /// Declare an input the computation reads.
    pub fn depends_on<D: Tracked + 'static>(mut self, input: &Arc<D>) -> Self {
        self.inputs.push(input.clone() as Arc<dyn Tracked>);
        self
    }

    /// Get the current value, recomputing it first if an input changed.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Access the current value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let mut cached = self.cached.lock();
        f(self.refresh(&mut cached))
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How many times the computation has run.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Acquire)
    }

    fn refresh<'a>(&self, slot: &'a mut Option<Cached<T>>) -> &'a T {
        let stamps: Vec<u64> = self.inputs.iter().map(|input| input.revision()).collect();

        let previous = match slot.take() {
            Some(cached) if cached.stamps == stamps => return &slot.insert(cached).value,
            previous => previous,
        };

        let value = (self.compute)();
        self.evaluations.fetch_add(1, Ordering::AcqRel);

        let changed = previous.is_none_or(|cached| cached.value != value);
        if changed {
            self.revision.fetch_add(1, Ordering::AcqRel);
        }
        tracing::trace!(
            target: targets::PROPERTY,
            memo = self.name,
            changed,
            "memo recomputed"
        );

        &slot.insert(Cached { stamps, value }).value
    }
}

impl<T: Clone + PartialEq + Send + 'static> Tracked for Memo<T> {
    fn revision(&self) -> u64 {
        let mut cached = self.cached.lock();
        self.refresh(&mut cached);
        self.revision.load(Ordering::Acquire)
    }
}

impl<T> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("name", &self.name)
            .field("inputs", &self.inputs.len())
            .field("revision", &self.revision.load(Ordering::Acquire))
            .field("evaluations", &self.evaluations.load(Ordering::Acquire))
            .finish()
    }
}
