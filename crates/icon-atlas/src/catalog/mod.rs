//! The collection catalog and the derivations that run over it.
//!
//! The pipeline is a chain of pure functions:
//!
//! ```text
//! CatalogIndex --filter--> Vec<Arc<CollectionEntry>> --group--> Vec<CollectionGroup>
//! ```
//!
//! plus [`chunk`], which slices per-collection icon lists for incremental
//! rendering. None of these can fail and none of them mutate their inputs.
//! [`CatalogView`](crate::view::CatalogView) wires them into memos so they
//! only rerun when their inputs change.

mod chunk;
mod filter;
mod group;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use icon_atlas_net::CollectionEntry;

pub use chunk::chunk;
pub use filter::{CatalogFilterEngine, LicenseTraits, filter};
pub use group::{CatalogGrouper, CollectionGroup, CollectionItem};

/// The collection index of one catalog load, keyed by collection prefix.
///
/// An index is built once from a registry response and then only read.
/// Reloading the catalog replaces it as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    entries: BTreeMap<String, Arc<CollectionEntry>>,
}

impl CatalogIndex {
    /// Build an index from a registry response, setting each entry's `id` to
    /// its key.
    pub fn from_entries(entries: BTreeMap<String, CollectionEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(id, mut entry)| {
                entry.id.clone_from(&id);
                (id, Arc::new(entry))
            })
            .collect();
        Self { entries }
    }

    /// Look up an entry by prefix.
    pub fn get(&self, id: &str) -> Option<&Arc<CollectionEntry>> {
        self.entries.get(id)
    }

    /// Iterate over `(id, entry)` pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<CollectionEntry>)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no collections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct effective categories, with `sentinel` standing in for
    /// entries without one.
    pub fn categories(&self, sentinel: &str) -> BTreeSet<String> {
        self.entries
            .values()
            .map(|entry| effective_category(entry, sentinel).to_string())
            .collect()
    }
}

impl FromIterator<CollectionEntry> for CatalogIndex {
    fn from_iter<I: IntoIterator<Item = CollectionEntry>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|entry| (entry.id.clone(), Arc::new(entry)))
            .collect();
        Self { entries }
    }
}

/// The category an entry is filed under: its own, or `sentinel`.
pub fn effective_category<'a>(entry: &'a CollectionEntry, sentinel: &'a str) -> &'a str {
    entry.category_label().unwrap_or(sentinel)
}

/// Palette facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaletteMode {
    /// No restriction.
    #[default]
    All,
    /// Only recolorable, monochrome collections.
    Mono,
    /// Only fixed-palette collections.
    Color,
}

/// Commercial-use facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CommercialUseMode {
    /// No restriction.
    #[default]
    All,
    /// Only licenses that allow commercial use.
    Allowed,
    /// Only licenses that forbid commercial use.
    NotAllowed,
}

/// Attribution facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttributionMode {
    /// No restriction.
    #[default]
    All,
    /// Only licenses that require attribution.
    Required,
    /// Only licenses that do not.
    Optional,
}

/// Search text plus facet selections.
///
/// Compared structurally: setting criteria equal to the current ones is not a
/// change and recomputes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text search over name, prefix and category.
    pub search: String,
    /// Palette facet.
    pub palette: PaletteMode,
    /// Commercial-use facet.
    pub commercial_use: CommercialUseMode,
    /// Attribution facet.
    pub attribution: AttributionMode,
    /// Selected categories. Empty means no restriction.
    pub categories: BTreeSet<String>,
}

impl FilterCriteria {
    /// Whether no criterion restricts the result.
    pub fn is_unrestricted(&self) -> bool {
        self.search.trim().is_empty()
            && self.palette == PaletteMode::All
            && self.commercial_use == CommercialUseMode::All
            && self.attribution == AttributionMode::All
            && self.categories.is_empty()
    }
}
