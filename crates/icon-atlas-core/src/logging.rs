//! Logging facilities for Icon Atlas.
//!
//! Icon Atlas uses the `tracing` crate for instrumentation. Library crates
//! never install a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("icon_atlas_net::render_cache=debug"))
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Property and memo recomputation target.
    pub const PROPERTY: &str = "icon_atlas_core::property";
    /// Collation setup target.
    pub const COLLATION: &str = "icon_atlas_core::collation";
    /// HTTP transport target.
    pub const HTTP: &str = "icon_atlas_net::http";
    /// Remote registry client target.
    pub const REGISTRY: &str = "icon_atlas_net::registry";
    /// Icon render cache target.
    pub const RENDER_CACHE: &str = "icon_atlas_net::render_cache";
    /// Catalog filtering and grouping target.
    pub const CATALOG: &str = "icon_atlas::catalog";
    /// Configuration loading target.
    pub const CONFIG: &str = "icon_atlas::config";
    /// View-model load lifecycle target.
    pub const VIEW: &str = "icon_atlas::view";
}

