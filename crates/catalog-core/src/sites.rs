use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Storefronts with a built-in extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteId {
    ForeignFortune,
    LeChocolat,
    TraderJoes,
}

impl SiteId {
    pub const ALL: [SiteId; 3] = [SiteId::ForeignFortune, SiteId::LeChocolat, SiteId::TraderJoes];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            SiteId::ForeignFortune => "foreign-fortune",
            SiteId::LeChocolat => "le-chocolat",
            SiteId::TraderJoes => "trader-joes",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SiteId::ForeignFortune => "Foreign Fortune",
            SiteId::LeChocolat => "Le Chocolat Alain Ducasse",
            SiteId::TraderJoes => "Trader Joe's",
        }
    }

    /// Scheme and host that relative links and image paths resolve against.
    #[must_use]
    pub fn origin(self) -> &'static str {
        match self {
            SiteId::ForeignFortune => "https://foreignfortune.com",
            SiteId::LeChocolat => "https://www.lechocolat-alainducasse.com",
            SiteId::TraderJoes => "https://www.traderjoes.com",
        }
    }

    #[must_use]
    pub fn default_output_file(self) -> &'static str {
        match self {
            SiteId::ForeignFortune => "foreignfortune_products.json",
            SiteId::LeChocolat => "lechocolat_products.json",
            SiteId::TraderJoes => "traderjoes.json",
        }
    }

    /// Category listing pages scraped when no site catalog file overrides them.
    #[must_use]
    pub fn default_start_urls(self) -> &'static [&'static str] {
        match self {
            SiteId::ForeignFortune => &[
                "https://foreignfortune.com/collections/frontpage",
                "https://foreignfortune.com/collections/shoes",
                "https://foreignfortune.com/collections/foreign-accesories",
                "https://foreignfortune.com/collections/foreign-kids",
                "https://foreignfortune.com/collections/men-unisex",
                "https://foreignfortune.com/collections/women",
                "https://foreignfortune.com/collections/kids",
                "https://foreignfortune.com/collections/coats-hats",
                "https://foreignfortune.com/collections/small-logo-embroidery-t-shirts-1",
            ],
            SiteId::LeChocolat => &[
                "https://www.lechocolat-alainducasse.com/uk/chocolates",
                "https://www.lechocolat-alainducasse.com/uk/chocolate-bar",
                "https://www.lechocolat-alainducasse.com/uk/breakfast-snacks",
                "https://www.lechocolat-alainducasse.com/uk/simple-pleasures",
                "https://www.lechocolat-alainducasse.com/uk/chocolate-gift",
                "https://www.lechocolat-alainducasse.com/uk/specialty-coffee-beans",
                "https://www.lechocolat-alainducasse.com/uk/specialty-coffee-capsules",
            ],
            SiteId::TraderJoes => &[
                "https://www.traderjoes.com/home/products/category/food-8",
                "https://www.traderjoes.com/home/products/category/beverages-182",
                "https://www.traderjoes.com/home/products/category/flowers-plants-203",
                "https://www.traderjoes.com/home/products/category/everything-else-215",
            ],
        }
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SiteId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteId::ALL
            .into_iter()
            .find(|site| site.slug() == s)
            .ok_or_else(|| ConfigError::UnknownSite(s.to_string()))
    }
}

/// Resolved per-site settings used by a scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site: SiteId,
    pub start_urls: Vec<String>,
    pub output_file: String,
}

impl SiteConfig {
    #[must_use]
    pub fn defaults(site: SiteId) -> Self {
        Self {
            site,
            start_urls: site
                .default_start_urls()
                .iter()
                .map(|u| (*u).to_string())
                .collect(),
            output_file: site.default_output_file().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteEntry>,
}

/// One override entry in the site catalog YAML.
#[derive(Debug, Deserialize)]
pub struct SiteEntry {
    pub site: SiteId,
    pub start_urls: Vec<String>,
    #[serde(default)]
    pub output_file: Option<String>,
}

/// Resolve the site list: built-in defaults, overridden by the YAML catalog
/// at `path` when one is given.
///
/// # Errors
///
/// Returns `ConfigError` if the catalog cannot be read, parsed, or fails validation.
pub fn resolve_sites(path: Option<&Path>) -> Result<Vec<SiteConfig>, ConfigError> {
    let Some(path) = path else {
        return Ok(SiteId::ALL.into_iter().map(SiteConfig::defaults).collect());
    };
    let sites_file = load_sites_file(path)?;
    Ok(merge_sites(sites_file))
}

/// Load and validate a site catalog YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites_file(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SitesFileParse)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn merge_sites(sites_file: SitesFile) -> Vec<SiteConfig> {
    let mut resolved: Vec<SiteConfig> = SiteId::ALL.into_iter().map(SiteConfig::defaults).collect();
    for entry in sites_file.sites {
        if let Some(slot) = resolved.iter_mut().find(|s| s.site == entry.site) {
            slot.start_urls = entry.start_urls;
            if let Some(output_file) = entry.output_file {
                slot.output_file = output_file;
            }
        }
    }
    resolved
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &sites_file.sites {
        if !seen.insert(entry.site) {
            return Err(ConfigError::Validation(format!(
                "duplicate site entry: '{}'",
                entry.site
            )));
        }

        if entry.start_urls.is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' must list at least one start URL",
                entry.site
            )));
        }

        if let Some(bad) = entry
            .start_urls
            .iter()
            .find(|u| !(u.starts_with("http://") || u.starts_with("https://")))
        {
            return Err(ConfigError::Validation(format!(
                "site '{}' has non-HTTP start URL '{bad}'",
                entry.site
            )));
        }

        if entry
            .output_file
            .as_deref()
            .is_some_and(|f| f.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "site '{}' has an empty output_file",
                entry.site
            )));
        }
    }

    Ok(())
}
