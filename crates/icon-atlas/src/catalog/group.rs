//! Grouping of filtered collections by category.

use std::collections::BTreeMap;
use std::sync::Arc;

use icon_atlas_core::Collation;
use icon_atlas_core::logging::targets;
use icon_atlas_net::CollectionEntry;

use super::effective_category;

/// One collection as shown in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionItem {
    /// Collection prefix.
    pub id: String,
    /// The full index entry.
    pub entry: Arc<CollectionEntry>,
    /// The first few sample icon names, for a preview strip.
    pub samples: Vec<String>,
}

/// Collections sharing one category, sorted by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionGroup {
    /// Category label.
    pub category: String,
    /// Collections in this category.
    pub items: Vec<CollectionItem>,
}

/// Buckets filtered entries by category and orders the result.
///
/// Groups are sorted by category label and items by display name, both with
/// the configured [`Collation`]. Ties fall back to code point order (then
/// prefix) so that the output is fully deterministic.
#[derive(Debug, Clone)]
pub struct CatalogGrouper {
    sentinel: String,
    sample_limit: usize,
    collation: Arc<Collation>,
}

impl CatalogGrouper {
    /// Create a grouper.
    ///
    /// `sentinel` labels the group of entries without a category and
    /// `sample_limit` caps the samples carried by each item.
    pub fn new(sentinel: impl Into<String>, sample_limit: usize, collation: Arc<Collation>) -> Self {
        Self {
            sentinel: sentinel.into(),
            sample_limit,
            collation,
        }
    }

    /// The label of the group for entries without a category.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Group `entries` into sorted category buckets.
    pub fn group(&self, entries: &[Arc<CollectionEntry>]) -> Vec<CollectionGroup> {
        let mut buckets: BTreeMap<&str, Vec<CollectionItem>> = BTreeMap::new();
        for entry in entries {
            buckets
                .entry(effective_category(entry, &self.sentinel))
                .or_default()
                .push(self.item(entry));
        }

        let mut groups: Vec<CollectionGroup> = buckets
            .into_iter()
            .map(|(category, mut items)| {
                items.sort_by(|a, b| {
                    self.collation
                        .compare(&a.entry.name, &b.entry.name)
                        .then_with(|| a.entry.name.cmp(&b.entry.name))
                        .then_with(|| a.id.cmp(&b.id))
                });
                CollectionGroup {
                    category: category.to_string(),
                    items,
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            self.collation
                .compare(&a.category, &b.category)
                .then_with(|| a.category.cmp(&b.category))
        });

        tracing::trace!(
            target: targets::CATALOG,
            entries = entries.len(),
            groups = groups.len(),
            "grouped catalog"
        );
        groups
    }

    fn item(&self, entry: &Arc<CollectionEntry>) -> CollectionItem {
        CollectionItem {
            id: entry.id.clone(),
            entry: Arc::clone(entry),
            samples: entry.samples.iter().take(self.sample_limit).cloned().collect(),
        }
    }
}

impl Default for CatalogGrouper {
    fn default() -> Self {
        Self::new("Uncategorized", 6, Arc::new(Collation::default()))
    }
}
