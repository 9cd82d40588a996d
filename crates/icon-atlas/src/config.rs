//! Configuration for Icon Atlas.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration against the public Iconify API.
//!
//! ```toml
//! api_base_url = "https://api.iconify.design"
//! timeout_secs = 30
//! sample_limit = 6
//! icons_per_chunk = 80
//! uncategorized_collection_label = "Uncategorized"
//! collation_locale = "system"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use icon_atlas_core::Collation;
use icon_atlas_core::logging::targets;
use icon_atlas_net::IconifyClient;

use crate::error::{AtlasError, Result};

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "atlas.toml";

/// Settings for the catalog, the registry client and presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Root of the registry API.
    pub api_base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    /// How many sample icons each catalog item carries.
    pub sample_limit: usize,
    /// Icons per render chunk on a collection page.
    pub icons_per_chunk: usize,
    /// Group label for collections without a category.
    pub uncategorized_collection_label: String,
    /// Category label for icons the registry lists as uncategorized.
    pub uncategorized_icon_label: String,
    /// Locale used to order names and labels. `"system"` asks the OS.
    pub collation_locale: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            api_base_url: icon_atlas_net::registry::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("icon-atlas/{}", env!("CARGO_PKG_VERSION")),
            sample_limit: 6,
            icons_per_chunk: 80,
            uncategorized_collection_label: "Uncategorized".to_string(),
            uncategorized_icon_label: "Uncategorized".to_string(),
            collation_locale: "en".to_string(),
        }
    }
}

impl AtlasConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| AtlasError::io(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Platform location of the user's configuration file, e.g.
    /// `~/.config/icon-atlas/atlas.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "icon-atlas").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the user's configuration file, or the defaults when there is none.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The locale tag to collate with, with `"system"` resolved.
    pub fn resolved_locale(&self) -> String {
        if self.collation_locale.eq_ignore_ascii_case("system") {
            system_locale()
        } else {
            self.collation_locale.clone()
        }
    }

    /// Build the collation for the configured locale.
    pub fn collation(&self) -> Collation {
        Collation::new(&self.resolved_locale())
    }

    /// Build a registry client from these settings.
    pub fn client(&self) -> Result<IconifyClient> {
        Ok(IconifyClient::builder(&self.api_base_url)
            .timeout(self.timeout())
            .user_agent(&self.user_agent)
            .build()?)
    }
}

#[cfg(feature = "system-locale")]
fn system_locale() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string())
}

#[cfg(not(feature = "system-locale"))]
fn system_locale() -> String {
    "en-US".to_string()
}
