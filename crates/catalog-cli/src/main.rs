mod scrape;
mod validate;

use std::path::PathBuf;

use catalog_core::SiteId;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Storefront product catalog scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape product listings and write one JSON file per site
    Scrape {
        /// Site to scrape (repeatable). Defaults to every site.
        #[arg(long = "site")]
        sites: Vec<SiteId>,
        /// Directory for output files (overrides `CATALOG_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Check previously written product files
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List supported sites with their start URLs and output files
    Sites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = catalog_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Scrape { sites, output_dir } => {
            scrape::run_scrape(config, &sites, output_dir).await
        }
        Commands::Validate { files } => validate::run_validate(&files),
        Commands::Sites => scrape::run_list_sites(&config),
    }
}
