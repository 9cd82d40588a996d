//! Core systems for Icon Atlas.
//!
//! This crate provides the foundations the catalog views are built on:
//!
//! - **Property System**: Reactive input values with change detection
//! - **Memoization**: Derived values that recompute only when an input changed
//! - **Collation**: Locale-aware ordering for display strings
//! - **Logging**: `tracing` target names for filtering by subsystem
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use icon_atlas_core::{Memo, Property};
//!
//! let names = Arc::new(Property::new(vec!["b".to_string(), "a".to_string()]));
//! let sorted = Memo::new("sorted", {
//!     let names = Arc::clone(&names);
//!     move || {
//!         let mut list = names.get();
//!         list.sort();
//!         list
//!     }
//! })
//! .depends_on(&names);
//!
//! assert_eq!(sorted.get(), vec!["a", "b"]);
//! ```
//!
//! All recomputation is synchronous: a read either returns the cached value
//! or recomputes it in place before returning.

pub mod collation;
pub mod logging;
pub mod property;

pub use collation::Collation;
pub use property::{Memo, Property, Snapshot, Tracked};
