//! Wire types returned by the icon registry.
//!
//! Every field is defaulted so that sparse or partially populated registry
//! entries still deserialize. Entries are treated as immutable once received.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Author of an icon collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Homepage or repository.
    pub url: Option<String>,
}

/// License metadata of an icon collection, as free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    /// Human readable title, e.g. `"CC BY 4.0"`.
    pub title: String,
    /// SPDX identifier when the registry knows one.
    pub spdx: Option<String>,
    /// Link to the license text.
    pub url: Option<String>,
}

impl License {
    /// Lower-cased title and SPDX identifier, separated by a space.
    ///
    /// This is the text the license facets are matched against.
    pub fn search_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        if let Some(spdx) = &self.spdx {
            text.push(' ');
            text.push_str(&spdx.to_lowercase());
        }
        text
    }
}

/// Pixel height metric. The registry reports either one height or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconHeight {
    /// All icons share one height.
    Single(u32),
    /// Icons come in several heights.
    Multiple(Vec<u32>),
}

/// One entry of the collection index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionEntry {
    /// Collection prefix. Not part of the entry body; filled from the map key.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of icons.
    pub total: u32,
    /// Version string.
    pub version: Option<String>,
    /// Author information.
    pub author: Author,
    /// License information.
    pub license: License,
    /// Sample icon names.
    pub samples: Vec<String>,
    /// Icon height.
    pub height: Option<IconHeight>,
    /// Suggested display height.
    pub display_height: Option<u32>,
    /// Free-text category label.
    pub category: Option<String>,
    /// `true` when icons have a fixed multi-color palette.
    pub palette: bool,
}

impl CollectionEntry {
    /// The raw category, or `None` when absent or blank.
    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
    }
}

/// Collection summary embedded in a detail response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionSummary {
    /// Display name.
    pub name: Option<String>,
    /// Number of icons.
    pub total: Option<u32>,
    /// Version string.
    pub version: Option<String>,
    /// Author information.
    pub author: Option<Author>,
    /// License information.
    pub license: Option<License>,
}

/// Icon manifest of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionDetail {
    /// Collection prefix.
    pub prefix: String,
    /// Number of visible icons.
    pub total: Option<u32>,
    /// Collection title.
    pub title: Option<String>,
    /// Collection summary.
    pub info: Option<CollectionSummary>,
    /// Icons without a category.
    pub uncategorized: Vec<String>,
    /// Icons by category.
    pub categories: BTreeMap<String, Vec<String>>,
    /// Display labels for categories.
    pub category_titles: BTreeMap<String, String>,
    /// Hidden icons.
    pub hidden: Vec<String>,
    /// Alias name to target icon.
    pub aliases: BTreeMap<String, String>,
    /// Character code to icon name.
    pub chars: BTreeMap<String, String>,
}
