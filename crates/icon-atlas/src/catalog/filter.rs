//! Search and facet filtering over the catalog index.

use std::sync::Arc;

use icon_atlas_core::logging::targets;
use icon_atlas_net::{CollectionEntry, License};

use super::{
    AttributionMode, CatalogIndex, CommercialUseMode, FilterCriteria, PaletteMode,
    effective_category,
};

/// License properties derived from free-text license metadata.
///
/// These are substring heuristics over the lower-cased title and SPDX
/// identifier, not a license taxonomy. `"CC BY-NC 4.0"` forbids commercial
/// use because it contains `nc`; so would any title that happens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseTraits {
    /// Whether the license allows commercial use.
    pub commercial_use: bool,
    /// Whether the license requires attribution.
    pub requires_attribution: bool,
}

const NON_COMMERCIAL_TOKEN: &str = "nc";
const ATTRIBUTION_TOKENS: [&str; 3] = ["cc-by", "by-sa", "attribution"];

impl LicenseTraits {
    /// Derive the traits of a license.
    pub fn of(license: &License) -> Self {
        let text = license.search_text();
        Self {
            commercial_use: !text.contains(NON_COMMERCIAL_TOKEN),
            requires_attribution: ATTRIBUTION_TOKENS.iter().any(|token| text.contains(token)),
        }
    }
}

/// Applies [`FilterCriteria`] to a [`CatalogIndex`].
///
/// An entry passes when it satisfies every predicate. Predicates are checked
/// cheapest first (text, palette, category, then the license facets) and
/// evaluation stops at the first one that fails.
#[derive(Debug, Clone)]
pub struct CatalogFilterEngine {
    sentinel: String,
}

impl CatalogFilterEngine {
    /// Create an engine. `sentinel` is the category of entries without one.
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// The category label used for entries without one.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Entries of `index` that pass `criteria`, in prefix order.
    pub fn filter(&self, index: &CatalogIndex, criteria: &FilterCriteria) -> Vec<Arc<CollectionEntry>> {
        let query = criteria.search.trim().to_lowercase();

        let matched: Vec<_> = index
            .iter()
            .filter(|(_, entry)| self.passes(entry, &query, criteria))
            .map(|(_, entry)| Arc::clone(entry))
            .collect();

        tracing::trace!(
            target: targets::CATALOG,
            total = index.len(),
            matched = matched.len(),
            "filtered catalog"
        );
        matched
    }

    /// Whether a single entry passes `criteria`.
    pub fn matches(&self, entry: &CollectionEntry, criteria: &FilterCriteria) -> bool {
        self.passes(entry, &criteria.search.trim().to_lowercase(), criteria)
    }

    fn passes(&self, entry: &CollectionEntry, query: &str, criteria: &FilterCriteria) -> bool {
        if !matches_text(entry, query) {
            return false;
        }

        match criteria.palette {
            PaletteMode::Mono if entry.palette => return false,
            PaletteMode::Color if !entry.palette => return false,
            _ => {}
        }

        if !criteria.categories.is_empty()
            && !criteria
                .categories
                .contains(effective_category(entry, &self.sentinel))
        {
            return false;
        }

        if criteria.commercial_use == CommercialUseMode::All
            && criteria.attribution == AttributionMode::All
        {
            return true;
        }

        let traits = LicenseTraits::of(&entry.license);

        let commercial_ok = match criteria.commercial_use {
            CommercialUseMode::All => true,
            CommercialUseMode::Allowed => traits.commercial_use,
            CommercialUseMode::NotAllowed => !traits.commercial_use,
        };
        if !commercial_ok {
            return false;
        }

        match criteria.attribution {
            AttributionMode::All => true,
            AttributionMode::Required => traits.requires_attribution,
            AttributionMode::Optional => !traits.requires_attribution,
        }
    }
}

impl Default for CatalogFilterEngine {
    fn default() -> Self {
        Self::new("Uncategorized")
    }
}

/// Case-insensitive substring match on name, prefix or raw category.
/// `query` is already trimmed and lower-cased; an empty query matches all.
fn matches_text(entry: &CollectionEntry, query: &str) -> bool {
    query.is_empty()
        || entry.name.to_lowercase().contains(query)
        || entry.id.to_lowercase().contains(query)
        || entry
            .category
            .as_deref()
            .is_some_and(|category| category.to_lowercase().contains(query))
}

/// Filter `index` by `criteria`, filing uncategorized entries under
/// `sentinel`.
pub fn filter(
    index: &CatalogIndex,
    criteria: &FilterCriteria,
    sentinel: &str,
) -> Vec<Arc<CollectionEntry>> {
    CatalogFilterEngine::new(sentinel).filter(index, criteria)
}
