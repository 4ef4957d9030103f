use std::path::PathBuf;

/// Browser window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Launch options for the controlled browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Browser binary; `None` lets the driver auto-detect an installed Chrome.
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub viewport: Viewport,
    pub navigation_timeout_ms: u64,
    /// Extra command-line flags passed verbatim at launch.
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub browser: BrowserSettings,
    pub selector_timeout_ms: u64,
    pub settle_interval_ms: u64,
    pub max_pages: usize,
    pub output_dir: PathBuf,
    pub sites_path: Option<PathBuf>,
    pub log_level: String,
}
