use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Runtime settings for the catalog.
///
/// Defaults match the public API contract: pages of 10, at most 100 per page.
/// Searches always return at most [`SEARCH_LIMIT`](crate::search::SEARCH_LIMIT)
/// hits and are not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Capacity of the store actor's mailbox.
    pub mailbox_size: usize,
    /// Page size used when the requested one is out of range.
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// JSON file loaded at startup, if any.
    pub seed_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mailbox_size: 32,
            default_page_size: 10,
            max_page_size: 100,
            seed_path: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `CATALOG_*` environment variables.
    ///
    /// ```bash
    /// CATALOG_MAX_PAGE_SIZE=50 CATALOG_SEED_PATH=data/products.json cargo run
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_with(&lookup, "CATALOG_MAILBOX_SIZE", &mut config.mailbox_size);
        override_with(&lookup, "CATALOG_DEFAULT_PAGE_SIZE", &mut config.default_page_size);
        override_with(&lookup, "CATALOG_MAX_PAGE_SIZE", &mut config.max_page_size);
        if let Some(path) = lookup("CATALOG_SEED_PATH").filter(|p| !p.trim().is_empty()) {
            config.seed_path = Some(PathBuf::from(path));
        }
        config.with_valid_page_sizes()
    }

    /// Puts back usable page sizes: `max_page_size` must be positive and
    /// `default_page_size` must lie in `1..=max_page_size`.
    pub fn with_valid_page_sizes(mut self) -> Self {
        let defaults = Self::default();
        if self.max_page_size == 0 {
            warn!(fallback = defaults.max_page_size, "Ignoring zero max page size");
            self.max_page_size = defaults.max_page_size;
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            let fallback = defaults.default_page_size.min(self.max_page_size);
            warn!(
                default_page_size = self.default_page_size,
                max_page_size = self.max_page_size,
                fallback,
                "Ignoring default page size outside 1..=max"
            );
            self.default_page_size = fallback;
        }
        self
    }
}

fn override_with<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T)
where
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "Ignoring unparsable setting"),
    }
}
