//! Derivations over a single collection's icon manifest.
//!
//! A collection page shows the icons of one collection grouped into
//! category sections, each split into render chunks. Everything here is a
//! pure function of a [`CollectionDetail`] and the page's [`IconFilter`].

use std::collections::{BTreeMap, HashMap};

use icon_atlas_core::Collation;
use icon_atlas_net::{Author, CollectionDetail, License};

use crate::catalog::chunk;

/// One icon of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    /// Icon name, without the collection prefix.
    pub name: String,
    /// Category within the collection.
    pub category: String,
}

/// Flatten a manifest into icons.
///
/// Categorized icons come first, category by category, followed by the
/// uncategorized ones filed under `sentinel`.
pub fn build_icons(detail: &CollectionDetail, sentinel: &str) -> Vec<IconEntry> {
    let categorized = detail.categories.iter().flat_map(|(category, names)| {
        names.iter().map(move |name| IconEntry {
            name: name.clone(),
            category: category.clone(),
        })
    });
    let uncategorized = detail.uncategorized.iter().map(|name| IconEntry {
        name: name.clone(),
        category: sentinel.to_string(),
    });
    categorized.chain(uncategorized).collect()
}

/// Header information of a collection page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMeta {
    /// Collection prefix.
    pub prefix: String,
    /// Display title.
    pub title: String,
    /// Number of icons.
    pub total: u32,
    /// License, when the registry reports one.
    pub license: Option<License>,
    /// Author, when the registry reports one.
    pub author: Option<Author>,
    /// Version string, when the registry reports one.
    pub version: Option<String>,
}

impl CollectionMeta {
    /// Build the header from a manifest.
    ///
    /// The title falls back to the summary name, then the prefix. The total
    /// falls back to the summary total, then `icon_count`.
    pub fn from_detail(detail: &CollectionDetail, icon_count: usize) -> Self {
        let info = detail.info.as_ref();
        Self {
            prefix: detail.prefix.clone(),
            title: detail
                .title
                .clone()
                .or_else(|| info.and_then(|info| info.name.clone()))
                .unwrap_or_else(|| detail.prefix.clone()),
            total: detail
                .total
                .or_else(|| info.and_then(|info| info.total))
                .unwrap_or_else(|| u32::try_from(icon_count).unwrap_or(u32::MAX)),
            license: info.and_then(|info| info.license.clone()),
            author: info.and_then(|info| info.author.clone()),
            version: info.and_then(|info| info.version.clone()),
        }
    }
}

/// Category selection on a collection page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single category, by raw name.
    Only(String),
}

impl CategoryFilter {
    /// Whether icons of `category` are selected.
    pub fn includes(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

/// Search text and category selection on a collection page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconFilter {
    /// Case-insensitive substring over icon names.
    pub search: String,
    /// Selected category.
    pub category: CategoryFilter,
}

impl IconFilter {
    /// Icons passing this filter, in their original order.
    pub fn apply(&self, icons: &[IconEntry]) -> Vec<IconEntry> {
        let query = self.search.trim().to_lowercase();
        icons
            .iter()
            .filter(|icon| {
                (query.is_empty() || icon.name.to_lowercase().contains(&query))
                    && self.category.includes(&icon.category)
            })
            .cloned()
            .collect()
    }
}

/// Display label of a category: its title if the manifest has one.
pub fn category_label<'a>(titles: &'a BTreeMap<String, String>, category: &'a str) -> &'a str {
    titles.get(category).map_or(category, String::as_str)
}

/// One entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Raw category name, as used by [`CategoryFilter::Only`].
    pub value: String,
    /// Display label.
    pub label: String,
    /// Number of icons in the category, regardless of the current filter.
    pub count: usize,
}

/// One option per category of `icons`, sorted by label.
pub fn category_options(
    icons: &[IconEntry],
    titles: &BTreeMap<String, String>,
    collation: &Collation,
) -> Vec<CategoryOption> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for icon in icons {
        *counts.entry(icon.category.as_str()).or_default() += 1;
    }

    let mut options: Vec<CategoryOption> = counts
        .into_iter()
        .map(|(category, count)| CategoryOption {
            value: category.to_string(),
            label: category_label(titles, category).to_string(),
            count,
        })
        .collect();
    options.sort_by(|a, b| {
        collation
            .compare(&a.label, &b.label)
            .then_with(|| a.value.cmp(&b.value))
    });
    options
}

/// Icons of one category, split into render chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSection {
    /// Raw category name.
    pub category: String,
    /// Display label.
    pub label: String,
    /// Number of icons in the section.
    pub total: usize,
    /// Icon names in chunks of at most the configured size.
    pub chunks: Vec<Vec<String>>,
}

/// Group already filtered icons into sections, sorted by label.
pub fn sections(
    filtered: &[IconEntry],
    titles: &BTreeMap<String, String>,
    chunk_size: usize,
    collation: &Collation,
) -> Vec<IconSection> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Vec<String>> = HashMap::new();
    for icon in filtered {
        let bucket = buckets.entry(icon.category.as_str()).or_insert_with(|| {
            order.push(icon.category.as_str());
            Vec::new()
        });
        bucket.push(icon.name.clone());
    }

    let mut sections: Vec<IconSection> = order
        .into_iter()
        .map(|category| {
            let names = buckets.remove(category).unwrap_or_default();
            IconSection {
                category: category.to_string(),
                label: category_label(titles, category).to_string(),
                total: names.len(),
                chunks: chunk(&names, chunk_size),
            }
        })
        .collect();
    sections.sort_by(|a, b| {
        collation
            .compare(&a.label, &b.label)
            .then_with(|| a.category.cmp(&b.category))
    });
    sections
}

/// Stable identity of a render chunk: its first icon name.
pub fn chunk_track(chunk: &[String]) -> Option<&str> {
    chunk.first().map(String::as_str)
}

/// The markup tag that embeds `icon` with default options.
pub fn icon_tag(prefix: &str, icon: &str) -> String {
    format!(r#"<ngx-icon collection="{prefix}" icon="{icon}" />"#)
}
