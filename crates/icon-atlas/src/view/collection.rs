//! The collection page: one collection's icons by category.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use icon_atlas_core::logging::targets;
use icon_atlas_core::{Collation, Memo, Property, Snapshot};
use icon_atlas_net::{CollectionDetail, RemoteCatalogClient};

use super::LoadState;
use crate::collection::{
    CategoryFilter, CategoryOption, CollectionMeta, IconEntry, IconFilter, IconSection,
    build_icons, category_options, sections,
};
use crate::config::AtlasConfig;
use crate::error::Result;

type Detail = Option<Snapshot<CollectionDetail>>;

/// State of a collection page.
///
/// ```ignore
/// let view = CollectionView::new(client, &AtlasConfig::default());
/// view.load("mdi").await?;
///
/// view.set_search("arrow");
/// for section in view.sections() {
///     for chunk in &section.chunks {
///         // render one chunk at a time as it scrolls into view
///     }
/// }
/// ```
pub struct CollectionView<C> {
    client: Arc<C>,
    generation: AtomicU64,
    prefix: Property<String>,
    state: Property<LoadState>,
    detail: Arc<Property<Detail>>,
    filter: Arc<Property<IconFilter>>,
    icons: Arc<Memo<Snapshot<Vec<IconEntry>>>>,
    meta: Memo<Option<CollectionMeta>>,
    filtered: Arc<Memo<Vec<IconEntry>>>,
    options: Memo<Vec<CategoryOption>>,
    sections: Memo<Vec<IconSection>>,
}

impl<C: RemoteCatalogClient> CollectionView<C> {
    /// Create a view with the sentinel label, chunk size and collation from
    /// `config`.
    pub fn new(client: Arc<C>, config: &AtlasConfig) -> Self {
        Self::with_parts(
            client,
            config.uncategorized_icon_label.clone(),
            config.icons_per_chunk,
            Arc::new(config.collation()),
        )
    }

    /// Create a view from explicit settings.
    pub fn with_parts(
        client: Arc<C>,
        sentinel: String,
        chunk_size: usize,
        collation: Arc<Collation>,
    ) -> Self {
        let detail: Arc<Property<Detail>> = Arc::new(Property::new(None));
        let filter = Arc::new(Property::new(IconFilter::default()));

        let icons = Arc::new(
            Memo::new("collection.icons", {
                let detail = Arc::clone(&detail);
                move || {
                    let icons = detail.with(|detail| {
                        detail
                            .as_ref()
                            .map(|detail| build_icons(detail, &sentinel))
                            .unwrap_or_default()
                    });
                    Snapshot::new(icons)
                }
            })
            .depends_on(&detail),
        );

        let meta = Memo::new("collection.meta", {
            let detail = Arc::clone(&detail);
            let icons = Arc::clone(&icons);
            move || {
                let count = icons.get().len();
                detail.with(|detail| {
                    detail
                        .as_ref()
                        .map(|detail| CollectionMeta::from_detail(detail, count))
                })
            }
        })
        .depends_on(&detail)
        .depends_on(&icons);

        let filtered = Arc::new(
            Memo::new("collection.filtered", {
                let icons = Arc::clone(&icons);
                let filter = Arc::clone(&filter);
                move || {
                    let icons = icons.get();
                    filter.with(|filter| filter.apply(&icons))
                }
            })
            .depends_on(&icons)
            .depends_on(&filter),
        );

        let options = Memo::new("collection.category_options", {
            let detail = Arc::clone(&detail);
            let icons = Arc::clone(&icons);
            let collation = Arc::clone(&collation);
            move || {
                let icons = icons.get();
                detail.with(|detail| match detail {
                    Some(detail) => category_options(&icons, &detail.category_titles, &collation),
                    None => Vec::new(),
                })
            }
        })
        .depends_on(&detail)
        .depends_on(&icons);

        let sections = Memo::new("collection.sections", {
            let detail = Arc::clone(&detail);
            let filtered = Arc::clone(&filtered);
            move || {
                filtered.with(|icons| {
                    detail.with(|detail| match detail {
                        Some(detail) => {
                            sections(icons, &detail.category_titles, chunk_size, &collation)
                        }
                        None => Vec::new(),
                    })
                })
            }
        })
        .depends_on(&detail)
        .depends_on(&filtered);

        Self {
            client,
            generation: AtomicU64::new(0),
            prefix: Property::new(String::new()),
            state: Property::new(LoadState::Idle),
            detail,
            filter,
            icons,
            meta,
            filtered,
            options,
            sections,
        }
    }

    /// Show the collection `prefix`.
    ///
    /// Search text and category selection are reset and the previous icons
    /// are cleared before the manifest is fetched. A load overtaken by a
    /// newer one is dropped and returns `Ok`.
    pub async fn load(&self, prefix: &str) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.prefix.set(prefix.to_string());
        self.filter.set(IconFilter::default());
        self.detail.set(None);
        self.state.set(LoadState::Loading);
        tracing::debug!(target: targets::VIEW, prefix, generation, "loading collection");

        let outcome = self.client.collection_detail(prefix).await;

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!(target: targets::VIEW, prefix, generation, "discarding stale collection load");
            return Ok(());
        }

        match outcome {
            Ok(detail) => {
                self.detail.set(Some(Snapshot::new(detail)));
                self.state.set(LoadState::Ready);
                tracing::info!(
                    target: targets::VIEW,
                    prefix,
                    icons = self.icons.get().len(),
                    "collection loaded"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: targets::VIEW, prefix, error = %err, "collection load failed");
                self.state.set(LoadState::Failed(format!(
                    "Could not load the icons of this collection: {err}"
                )));
                Err(err.into())
            }
        }
    }

    /// Fetch the current collection again. Does nothing before the first
    /// load.
    pub async fn reload(&self) -> Result<()> {
        let prefix = self.prefix.get();
        if prefix.is_empty() {
            return Ok(());
        }
        self.load(&prefix).await
    }
}

impl<C> CollectionView<C> {
    /// Prefix of the collection shown, empty before the first load.
    pub fn prefix(&self) -> String {
        self.prefix.get()
    }

    /// Load lifecycle of the manifest.
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// Current icon filter.
    pub fn filter(&self) -> IconFilter {
        self.filter.get()
    }

    /// Set the search text. Returns `true` if it changed.
    pub fn set_search(&self, search: impl Into<String>) -> bool {
        let search = search.into();
        self.filter.update(|filter| filter.search = search)
    }

    /// Select a category. Returns `true` if the selection changed.
    pub fn select_category(&self, category: CategoryFilter) -> bool {
        self.filter.update(|filter| filter.category = category)
    }

    /// Header information, once loaded.
    pub fn meta(&self) -> Option<CollectionMeta> {
        self.meta.get()
    }

    /// Every icon of the collection.
    pub fn icons(&self) -> Snapshot<Vec<IconEntry>> {
        self.icons.get()
    }

    /// Icons passing the current filter.
    pub fn filtered_icons(&self) -> Vec<IconEntry> {
        self.filtered.get()
    }

    /// Options of the category picker.
    pub fn category_options(&self) -> Vec<CategoryOption> {
        self.options.get()
    }

    /// Filtered icons by category, in render chunks.
    pub fn sections(&self) -> Vec<IconSection> {
        self.sections.get()
    }

    /// Access the sections without cloning them.
    pub fn with_sections<R>(&self, f: impl FnOnce(&[IconSection]) -> R) -> R {
        self.sections.with(|sections| f(sections))
    }

    /// How often the section layout has been computed.
    pub fn section_evaluations(&self) -> usize {
        self.sections.evaluations()
    }
}

impl<C> std::fmt::Debug for CollectionView<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("prefix", &self.prefix.get())
            .field("state", &self.state.get())
            .field("filter", &self.filter.get())
            .finish()
    }
}
