//! The catalog page: every collection, filtered and grouped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use icon_atlas_core::logging::targets;
use icon_atlas_core::{Collation, Memo, Property, Snapshot};
use icon_atlas_net::{CollectionEntry, RemoteCatalogClient};

use super::LoadState;
use crate::catalog::{
    AttributionMode, CatalogFilterEngine, CatalogGrouper, CatalogIndex, CollectionGroup,
    CommercialUseMode, FilterCriteria, PaletteMode,
};
use crate::config::AtlasConfig;
use crate::error::Result;

/// How often each derivation of a [`CatalogView`] has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeCounts {
    /// Filter runs.
    pub filtered: usize,
    /// Grouping runs.
    pub groups: usize,
    /// Category facet runs.
    pub categories: usize,
}

/// State of the catalog page.
///
/// Inputs are the loaded index and the filter criteria; outputs are the
/// filtered entries, the category groups, and the category facet values.
///
/// ```ignore
/// let view = CatalogView::new(client, &AtlasConfig::default());
/// view.load().await?;
///
/// view.set_search("mdi");
/// for group in view.groups() {
///     println!("{} ({})", group.category, group.items.len());
/// }
/// ```
pub struct CatalogView<C> {
    client: Arc<C>,
    generation: AtomicU64,
    state: Property<LoadState>,
    index: Arc<Property<Snapshot<CatalogIndex>>>,
    criteria: Arc<Property<FilterCriteria>>,
    filtered: Arc<Memo<Vec<Arc<CollectionEntry>>>>,
    groups: Memo<Vec<CollectionGroup>>,
    categories: Memo<Vec<String>>,
}

impl<C: RemoteCatalogClient> CatalogView<C> {
    /// Create a view with labels, sample size and collation from `config`.
    pub fn new(client: Arc<C>, config: &AtlasConfig) -> Self {
        let collation = Arc::new(config.collation());
        let sentinel = config.uncategorized_collection_label.clone();
        Self::with_parts(
            client,
            CatalogFilterEngine::new(sentinel.clone()),
            CatalogGrouper::new(sentinel, config.sample_limit, Arc::clone(&collation)),
            collation,
        )
    }

    /// Create a view from explicit pipeline stages.
    pub fn with_parts(
        client: Arc<C>,
        engine: CatalogFilterEngine,
        grouper: CatalogGrouper,
        collation: Arc<Collation>,
    ) -> Self {
        let index = Arc::new(Property::new(Snapshot::new(CatalogIndex::default())));
        let criteria = Arc::new(Property::new(FilterCriteria::default()));

        let sentinel = engine.sentinel().to_string();
        let categories = Memo::new("catalog.categories", {
            let index = Arc::clone(&index);
            move || {
                let mut categories: Vec<String> =
                    index.get().categories(&sentinel).into_iter().collect();
                categories.sort_by(|a, b| collation.compare(a, b).then_with(|| a.cmp(b)));
                categories
            }
        })
        .depends_on(&index);

        let filtered = Arc::new(
            Memo::new("catalog.filtered", {
                let index = Arc::clone(&index);
                let criteria = Arc::clone(&criteria);
                move || {
                    let index = index.get();
                    criteria.with(|criteria| engine.filter(&index, criteria))
                }
            })
            .depends_on(&index)
            .depends_on(&criteria),
        );

        let groups = Memo::new("catalog.groups", {
            let filtered = Arc::clone(&filtered);
            move || filtered.with(|entries| grouper.group(entries))
        })
        .depends_on(&filtered);

        Self {
            client,
            generation: AtomicU64::new(0),
            state: Property::new(LoadState::Idle),
            index,
            criteria,
            filtered,
            groups,
            categories,
        }
    }

    /// Fetch the collection index and replace the current one.
    ///
    /// Also serves as the manual retry after a failure. On failure the
    /// previous index stays in place and the state carries the message. A
    /// load overtaken by a newer one is dropped and returns `Ok`.
    pub async fn load(&self) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.set(LoadState::Loading);
        tracing::debug!(target: targets::VIEW, generation, "loading catalog");

        let outcome = self.client.list_collections().await;

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!(target: targets::VIEW, generation, "discarding stale catalog load");
            return Ok(());
        }

        match outcome {
            Ok(entries) => {
                let index = CatalogIndex::from_entries(entries);
                tracing::info!(target: targets::VIEW, collections = index.len(), "catalog loaded");
                self.index.set(Snapshot::new(index));
                self.state.set(LoadState::Ready);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: targets::VIEW, error = %err, "catalog load failed");
                self.state
                    .set(LoadState::Failed(format!("Could not load the collections: {err}")));
                Err(err.into())
            }
        }
    }

    /// Reload the collection index.
    pub async fn refresh(&self) -> Result<()> {
        self.load().await
    }
}

impl<C> CatalogView<C> {
    /// Load lifecycle of the index.
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// The currently loaded index.
    pub fn index(&self) -> Snapshot<CatalogIndex> {
        self.index.get()
    }

    /// Replace the index directly, e.g. with data loaded elsewhere.
    pub fn set_index(&self, index: CatalogIndex) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.index.set(Snapshot::new(index));
        self.state.set(LoadState::Ready);
    }

    /// Current filter criteria.
    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.get()
    }

    /// Set the search text. Returns `true` if it changed.
    pub fn set_search(&self, search: impl Into<String>) -> bool {
        let search = search.into();
        self.criteria.update(|criteria| criteria.search = search)
    }

    /// Set the palette facet.
    pub fn set_palette(&self, palette: PaletteMode) -> bool {
        self.criteria.update(|criteria| criteria.palette = palette)
    }

    /// Set the commercial-use facet.
    pub fn set_commercial_use(&self, mode: CommercialUseMode) -> bool {
        self.criteria.update(|criteria| criteria.commercial_use = mode)
    }

    /// Set the attribution facet.
    pub fn set_attribution(&self, mode: AttributionMode) -> bool {
        self.criteria.update(|criteria| criteria.attribution = mode)
    }

    /// Add `category` to the selection, or remove it if already selected.
    pub fn toggle_category(&self, category: &str) {
        self.criteria.update(|criteria| {
            if !criteria.categories.remove(category) {
                criteria.categories.insert(category.to_string());
            }
        });
    }

    /// Reset every criterion.
    pub fn clear_filters(&self) -> bool {
        self.criteria.set(FilterCriteria::default())
    }

    /// Entries passing the current criteria, in prefix order.
    pub fn filtered(&self) -> Vec<Arc<CollectionEntry>> {
        self.filtered.get()
    }

    /// Filtered entries grouped by category.
    pub fn groups(&self) -> Vec<CollectionGroup> {
        self.groups.get()
    }

    /// Access the groups without cloning them.
    pub fn with_groups<R>(&self, f: impl FnOnce(&[CollectionGroup]) -> R) -> R {
        self.groups.with(|groups| f(groups))
    }

    /// Every category of the loaded index, sorted, for the category facet.
    pub fn available_categories(&self) -> Vec<String> {
        self.categories.get()
    }

    /// How often each derivation has run so far.
    pub fn recompute_counts(&self) -> RecomputeCounts {
        RecomputeCounts {
            filtered: self.filtered.evaluations(),
            groups: self.groups.evaluations(),
            categories: self.categories.evaluations(),
        }
    }
}

impl<C> std::fmt::Debug for CatalogView<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogView")
            .field("state", &self.state.get())
            .field("collections", &self.index.with(|index| index.len()))
            .field("criteria", &self.criteria.get())
            .finish()
    }
}
