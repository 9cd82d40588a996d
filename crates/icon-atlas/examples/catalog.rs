//! Browse the Iconify catalog from the terminal.
//!
//! Run with: cargo run -p icon-atlas --example catalog -- [search]
//!
//! Set `RUST_LOG=icon_atlas=debug` to see the registry traffic.

use std::sync::Arc;

use icon_atlas::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> icon_atlas::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AtlasConfig::load_or_default()?;
    let client = Arc::new(config.client()?);

    let catalog = CatalogView::new(Arc::clone(&client), &config);
    catalog.load().await?;
    if let Some(search) = std::env::args().nth(1) {
        catalog.set_search(search);
    }

    catalog.with_groups(|groups| {
        for group in groups {
            println!("{} ({})", group.category, group.items.len());
            for item in &group.items {
                println!(
                    "  {:<24} {:>6} icons  {}",
                    item.id,
                    item.entry.total,
                    item.samples.join(" ")
                );
            }
        }
    });

    let Some(first) = catalog.filtered().first().map(|entry| entry.id.clone()) else {
        println!("No collection matches.");
        return Ok(());
    };

    let collection = CollectionView::new(Arc::clone(&client), &config);
    collection.load(&first).await?;
    if let Some(meta) = collection.meta() {
        println!();
        println!("{} [{}]: {} icons", meta.title, meta.prefix, meta.total);
    }
    for section in collection.sections() {
        println!("  {} ({} icons, {} chunks)", section.label, section.total, section.chunks.len());
    }

    let Some(icon) = collection.icons().first().map(|icon| icon.name.clone()) else {
        return Ok(());
    };

    let mut preview = IconPreview::new(first, icon);
    preview.size = 48;
    preview.size_enabled = true;

    let cache = IconRenderCache::with_shared_client(client);
    let markup = cache.resolve(&preview.render_key()).await?;
    println!();
    println!("{}", preview.snippet());
    println!("{} bytes of markup for {}", markup.len(), preview.qualified_name());

    Ok(())
}
