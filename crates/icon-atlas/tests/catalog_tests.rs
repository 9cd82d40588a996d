//! Tests for the catalog pipeline: filter, group and chunk.

use std::sync::Arc;

use icon_atlas::catalog::{
    AttributionMode, CatalogFilterEngine, CatalogGrouper, CatalogIndex, CommercialUseMode,
    FilterCriteria, PaletteMode, chunk,
};
use icon_atlas::reactive::Collation;
use icon_atlas::net::{CollectionEntry, License};

const SENTINEL: &str = "Uncategorized";

fn entry(id: &str, name: &str, category: Option<&str>) -> CollectionEntry {
    CollectionEntry {
        id: id.to_string(),
        name: name.to_string(),
        category: category.map(str::to_string),
        samples: (1..=8).map(|n| format!("{id}-{n}")).collect(),
        ..Default::default()
    }
}

fn licensed(id: &str, title: &str, spdx: &str) -> CollectionEntry {
    CollectionEntry {
        license: License {
            title: title.to_string(),
            spdx: Some(spdx.to_string()),
            url: None,
        },
        ..entry(id, id, None)
    }
}

fn ids(entries: &[Arc<CollectionEntry>]) -> Vec<&str> {
    entries.iter().map(|entry| entry.id.as_str()).collect()
}

fn grouper() -> CatalogGrouper {
    CatalogGrouper::new(SENTINEL, 6, Arc::new(Collation::new("en")))
}

#[test]
fn test_license_facets_combine() {
    let index: CatalogIndex = [
        licensed("by", "CC BY 4.0", "CC-BY-4.0"),
        licensed("zero", "CC0 1.0", "CC0-1.0"),
        licensed("by-nc", "CC BY-NC 4.0", "CC-BY-NC-4.0"),
    ]
    .into_iter()
    .collect();
    let engine = CatalogFilterEngine::new(SENTINEL);

    let criteria = FilterCriteria {
        commercial_use: CommercialUseMode::Allowed,
        attribution: AttributionMode::Required,
        ..Default::default()
    };
    assert_eq!(ids(&engine.filter(&index, &criteria)), vec!["by"]);

    let criteria = FilterCriteria {
        commercial_use: CommercialUseMode::NotAllowed,
        attribution: AttributionMode::Required,
        ..Default::default()
    };
    assert_eq!(ids(&engine.filter(&index, &criteria)), vec!["by-nc"]);

    let criteria = FilterCriteria {
        commercial_use: CommercialUseMode::Allowed,
        ..Default::default()
    };
    assert_eq!(ids(&engine.filter(&index, &criteria)), vec!["by", "zero"]);

    let criteria = FilterCriteria {
        commercial_use: CommercialUseMode::NotAllowed,
        ..Default::default()
    };
    assert_eq!(ids(&engine.filter(&index, &criteria)), vec!["by-nc"]);

    let criteria = FilterCriteria {
        attribution: AttributionMode::Optional,
        ..Default::default()
    };
    assert_eq!(ids(&engine.filter(&index, &criteria)), vec!["zero"]);
}

#[test]
fn test_search_matches_prefix_and_name() {
    let index: CatalogIndex = [
        entry("mdi-light", "Material Design Light", None),
        entry("ext", "MDI Extended", None),
        entry("tabler", "Tabler Icons", None),
    ]
    .into_iter()
    .collect();
    let criteria = FilterCriteria {
        search: "mdi".to_string(),
        ..Default::default()
    };

    let matched = CatalogFilterEngine::new(SENTINEL).filter(&index, &criteria);
    assert_eq!(ids(&matched), vec!["ext", "mdi-light"]);
}

#[test]
fn test_filter_is_idempotent() {
    let mut colored = entry("twemoji", "Twemoji", Some("Emoji"));
    colored.palette = true;
    let index: CatalogIndex = [
        colored,
        entry("mdi", "Material Design Icons", Some("General")),
        entry("lucide", "Lucide", None),
    ]
    .into_iter()
    .collect();
    let criteria = FilterCriteria {
        search: "i".to_string(),
        palette: PaletteMode::Mono,
        ..Default::default()
    };
    let engine = CatalogFilterEngine::new(SENTINEL);

    let once = engine.filter(&index, &criteria);
    let again: CatalogIndex = once.iter().map(|entry| (**entry).clone()).collect();
    let twice = engine.filter(&again, &criteria);

    assert_eq!(ids(&once), ids(&twice));
    assert_eq!(ids(&once), vec!["lucide", "mdi"]);
}

#[test]
fn test_category_selection_includes_sentinel() {
    let index: CatalogIndex = [
        entry("a", "A", Some("Finance")),
        entry("b", "B", None),
        entry("c", "C", Some("Emoji")),
    ]
    .into_iter()
    .collect();
    let criteria = FilterCriteria {
        categories: ["Finance".to_string(), SENTINEL.to_string()].into(),
        ..Default::default()
    };

    let matched = CatalogFilterEngine::new(SENTINEL).filter(&index, &criteria);
    assert_eq!(ids(&matched), vec!["a", "b"]);
}

#[test]
fn test_grouping_order() {
    let entries: Vec<Arc<CollectionEntry>> = [
        entry("zeta", "Zeta", Some("Finance")),
        entry("beta", "Beta", Some("")),
        entry("alpha", "Alpha", Some("Finance")),
    ]
    .into_iter()
    .map(Arc::new)
    .collect();

    let groups = grouper().group(&entries);
    let layout: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|group| {
            (
                group.category.as_str(),
                group.items.iter().map(|item| item.entry.name.as_str()).collect(),
            )
        })
        .collect();

    assert_eq!(
        layout,
        vec![("Finance", vec!["Alpha", "Zeta"]), (SENTINEL, vec!["Beta"])]
    );
}

#[test]
fn test_grouping_caps_samples() {
    let entries = vec![Arc::new(entry("mdi", "Material", None))];
    let groups = grouper().group(&entries);

    let item = &groups[0].items[0];
    assert_eq!(item.id, "mdi");
    assert_eq!(item.samples.len(), 6);
    assert_eq!(item.samples[0], "mdi-1");
    assert_eq!(item.entry.samples.len(), 8);
}

#[test]
fn test_grouping_empty_input() {
    assert!(grouper().group(&[]).is_empty());
}

#[test]
fn test_chunking_large_collection() {
    let names: Vec<String> = (0..85).map(|n| format!("icon-{n}")).collect();
    let chunks = chunk(&names, 80);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 80);
    assert_eq!(chunks[1].len(), 5);
    assert_eq!(chunks.concat(), names);
}
