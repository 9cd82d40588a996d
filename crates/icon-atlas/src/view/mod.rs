//! View-models for the catalog, collection and icon pages.
//!
//! Each view owns its inputs as [`Property`](icon_atlas_core::Property)
//! values and exposes its outputs as [`Memo`](icon_atlas_core::Memo)
//! derivations over them. Readers always see a fully computed value, and a
//! value is only recomputed when something it reads has changed.
//!
//! Loads are asynchronous. A load that completes after a newer one started is
//! dropped without touching the view.

mod catalog;
mod collection;
mod preview;

pub use catalog::{CatalogView, RecomputeCounts};
pub use collection::CollectionView;
pub use preview::{DEFAULT_SIZE, Flip, IconPreview, ROTATE_OPTIONS, SIZE_SAMPLES};

/// Lifecycle of a remote load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed; the message is meant for display.
    Failed(String),
}

impl LoadState {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
