//! Icon Atlas - a searchable, filterable catalog of remote icon collections.
//!
//! This is the main crate; it builds on `icon-atlas-core` for reactive
//! memoization and collation and on `icon-atlas-net` for the registry client
//! and the icon render cache.
//!
//! - [`catalog`]: filtering, grouping and chunking of the collection index
//! - [`collection`]: derivations over one collection's icon manifest
//! - [`view`]: view-models wiring those derivations to remote loads
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use icon_atlas::prelude::*;
//!
//! async fn show() -> icon_atlas::Result<()> {
//!     let config = AtlasConfig::load_or_default()?;
//!     let client = Arc::new(config.client()?);
//!
//!     let catalog = CatalogView::new(Arc::clone(&client), &config);
//!     catalog.load().await?;
//!     catalog.set_palette(PaletteMode::Mono);
//!
//!     for group in catalog.groups() {
//!         println!("{}: {} collections", group.category, group.items.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod collection;
pub mod config;
mod error;
pub mod prelude;
pub mod view;

pub use config::AtlasConfig;
pub use error::{AtlasError, Result};

/// Reactive primitives and collation.
pub mod reactive {
    pub use icon_atlas_core::*;
}

/// Registry client, HTTP transport and render cache.
pub mod net {
    pub use icon_atlas_net::*;
}
