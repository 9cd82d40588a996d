//! Prelude module for Icon Atlas.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use icon_atlas::prelude::*;
//! ```

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::AtlasConfig;
pub use crate::error::{AtlasError, Result};

// ============================================================================
// Catalog Pipeline
// ============================================================================

pub use crate::catalog::{
    AttributionMode, CatalogFilterEngine, CatalogGrouper, CatalogIndex, CollectionGroup,
    CollectionItem, CommercialUseMode, FilterCriteria, PaletteMode, chunk,
};
pub use crate::collection::{CategoryFilter, CollectionMeta, IconEntry, IconFilter, IconSection};

// ============================================================================
// View-Models
// ============================================================================

pub use crate::view::{CatalogView, CollectionView, Flip, IconPreview, LoadState};

// ============================================================================
// Reactive Primitives
// ============================================================================

pub use icon_atlas_core::{Collation, Memo, Property, Snapshot};

// ============================================================================
// Registry and Rendering
// ============================================================================

pub use icon_atlas_net::{
    CollectionEntry, IconRenderCache, IconRenderKey, IconRequestOptions, IconifyClient,
    NetworkError, RemoteCatalogClient, RenderHandle,
};
