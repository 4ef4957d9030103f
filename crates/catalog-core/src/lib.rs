pub mod app_config;
pub mod config;
pub mod record;
pub mod sites;
pub mod validation;

pub use app_config::{AppConfig, BrowserSettings, Viewport};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{parse_batch, Field, ModelRecord, ProductRecord};
pub use sites::{load_sites_file, resolve_sites, SiteConfig, SiteEntry, SiteId, SitesFile};
pub use validation::{Check, Validator, Violation};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown site '{0}'")]
    UnknownSite(String),

    #[error("failed to read site catalog {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site catalog: {0}")]
    SitesFileParse(#[source] serde_yaml::Error),

    #[error("site catalog validation failed: {0}")]
    Validation(String),
}
