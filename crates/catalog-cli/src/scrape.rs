//! Scrape command handlers.
//!
//! Sites run one after another, each with its own browser. A failed site is
//! logged and counted; the remaining sites still run.

use std::path::PathBuf;

use anyhow::Context;
use catalog_core::{AppConfig, SiteConfig, SiteId};

/// Scrape the selected sites (all of them when `filter` is empty).
///
/// # Errors
///
/// Returns an error only if the site catalog cannot be resolved. Per-site
/// failures are logged and reported in the summary line.
pub(crate) async fn run_scrape(
    mut config: AppConfig,
    filter: &[SiteId],
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let sites = select_sites(load_sites(&config)?, filter);
    let site_count = sites.len();
    let mut failed = 0usize;
    let mut total_records = 0usize;

    for site in &sites {
        match catalog_scraper::run_site(&config, site).await {
            Ok(report) => {
                total_records += report.records;
                let failed_urls = report.failed_urls().count();
                println!(
                    "{}: {} products from {} start urls -> {}",
                    report.site,
                    report.records,
                    report.per_url.len(),
                    report.output_path.display()
                );
                if failed_urls > 0 {
                    println!("  {failed_urls} start urls stopped early on an error");
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!(site = %site.site, error = %e, "site run failed");
                println!("{}: failed ({e})", site.site);
            }
        }
    }

    tracing::info!(
        sites = site_count,
        failed,
        records = total_records,
        "scrape finished"
    );
    Ok(())
}

/// Print each site with its start URLs and output file.
///
/// # Errors
///
/// Returns an error if the site catalog cannot be resolved.
pub(crate) fn run_list_sites(config: &AppConfig) -> anyhow::Result<()> {
    for site in load_sites(config)? {
        println!(
            "{} ({}) -> {}",
            site.site.slug(),
            site.site.display_name(),
            config.output_dir.join(&site.output_file).display()
        );
        for url in &site.start_urls {
            println!("  {url}");
        }
    }
    Ok(())
}

fn load_sites(config: &AppConfig) -> anyhow::Result<Vec<SiteConfig>> {
    catalog_core::resolve_sites(config.sites_path.as_deref()).with_context(|| {
        format!(
            "failed to resolve site catalog{}",
            config
                .sites_path
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        )
    })
}

/// Keeps the sites named in `filter`, in catalog order. An empty filter keeps
/// every site.
pub(crate) fn select_sites(all: Vec<SiteConfig>, filter: &[SiteId]) -> Vec<SiteConfig> {
    if filter.is_empty() {
        return all;
    }
    all.into_iter()
        .filter(|s| filter.contains(&s.site))
        .collect()
}
