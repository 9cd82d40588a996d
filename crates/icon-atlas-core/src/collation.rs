//! Locale-aware string ordering.
//!
//! Display names and category labels are ordered the way a reader of the
//! configured locale expects ("alpha" before "Beta" before "zeta"), not by
//! raw code point. The comparison is backed by ICU4X collation data compiled
//! into the binary.

use std::cmp::Ordering;
use std::fmt;

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;

use crate::logging::targets;

/// A locale-aware comparator for display strings.
pub struct Collation {
    locale: String,
    collator: Option<CollatorBorrowed<'static>>,
}

impl Collation {
    /// Create a collation for a BCP-47 locale tag such as `"en"` or `"es-MX"`.
    ///
    /// An unparseable tag or missing collation data falls back to a
    /// case-insensitive ordering, with a warning.
    pub fn new(locale: &str) -> Self {
        let collator = match locale.parse::<Locale>() {
            Ok(parsed) => match Collator::try_new(parsed.into(), CollatorOptions::default()) {
                Ok(collator) => Some(collator),
                Err(err) => {
                    tracing::warn!(target: targets::COLLATION, locale, %err, "collator unavailable, falling back");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(target: targets::COLLATION, locale, %err, "invalid locale tag, falling back");
                None
            }
        };

        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    /// The locale tag this collation was created for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compare two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}
