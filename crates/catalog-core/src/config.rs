use crate::app_config::{AppConfig, BrowserSettings, Viewport};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let executable = lookup("CATALOG_BROWSER_EXECUTABLE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let headless_var = "CATALOG_BROWSER_HEADLESS";
    let headless = parse_bool(&or_default(headless_var, "true"))
        .ok_or_else(|| invalid(headless_var, "expected true or false".to_string()))?;

    let viewport_var = "CATALOG_VIEWPORT";
    let viewport = parse_viewport(&or_default(viewport_var, "1920x1080"))
        .ok_or_else(|| invalid(viewport_var, "expected WIDTHxHEIGHT, e.g. 1920x1080".to_string()))?;

    let extra_args = or_default("CATALOG_BROWSER_ARGS", "")
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    let navigation_timeout_ms = parse_u64("CATALOG_NAVIGATION_TIMEOUT_MS", "30000")?;
    let selector_timeout_ms = parse_u64("CATALOG_SELECTOR_TIMEOUT_MS", "10000")?;
    let settle_interval_ms = parse_u64("CATALOG_SETTLE_INTERVAL_MS", "3000")?;

    let max_pages_var = "CATALOG_MAX_PAGES";
    let max_pages = parse_usize(max_pages_var, "200")?;
    if max_pages == 0 {
        return Err(invalid(max_pages_var, "must be at least 1".to_string()));
    }

    let output_dir = PathBuf::from(or_default("CATALOG_OUTPUT_DIR", "."));
    let sites_path = lookup("CATALOG_SITES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let log_level = or_default("CATALOG_LOG_LEVEL", "info");

    Ok(AppConfig {
        browser: BrowserSettings {
            executable,
            headless,
            viewport,
            navigation_timeout_ms,
            extra_args,
        },
        selector_timeout_ms,
        settle_interval_ms,
        max_pages,
        output_dir,
        sites_path,
        log_level,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_viewport(s: &str) -> Option<Viewport> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    let height = h.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    Some(Viewport { width, height })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
