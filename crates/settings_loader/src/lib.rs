//! # Settings Loader
//!
//! Centralized settings loading for the debt strategy service. Settings come
//! from a `settings.json` file (every field optional, see `models::Settings`)
//! and are then overridden by environment variables.
//!
//! ## Features
//!
//! - Load settings from specified file paths
//! - Load settings from default location (`settings.json`)
//! - Fall back to built-in defaults when no settings file exists
//! - Apply `HOST`, `PORT`, `DATA_DIR`, `INVITE_SECRET` and
//!   `INVITE_VALIDITY_DAYS` overrides
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/my_settings.json")?;
//!
//! // File (or defaults) plus environment, the way the server starts up
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_runtime_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_PATH)
}

/// Tries the provided path, then the default location, then built-in defaults.
///
/// A file that exists but does not parse is an error rather than a silent fallback.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
    }

    if default_settings_exist() {
        return load_default_settings();
    }

    Ok(Settings::default())
}

/// Settings file (or defaults) with environment overrides applied. Reads `.env` first.
pub fn load_runtime_settings(path: Option<&PathBuf>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let from_env = std::env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let path = path.or(from_env.as_ref());

    let mut settings = load_settings_with_fallback(path)?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

/// Overrides settings from a variable lookup (normally `std::env::var`).
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        settings.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        settings.server.port = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    }
    if let Some(dir) = lookup("DATA_DIR") {
        settings.data_dir = PathBuf::from(dir);
    }
    if let Some(secret) = lookup("INVITE_SECRET") {
        settings.invites.secret = secret;
    }
    if let Some(days) = lookup("INVITE_VALIDITY_DAYS") {
        settings.invites.validity_days = days
            .parse()
            .with_context(|| format!("INVITE_VALIDITY_DAYS must be a whole number, got '{}'", days))?;
    }
    Ok(())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_settings_from_file() {
        let file = write_settings(r#"{"server":{"host":"0.0.0.0","port":8081},"payoff":{"max_months":360}}"#);
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.payoff.max_months, 360);
        assert_eq!(settings.invites.validity_days, 7);
    }

    #[test]
    fn test_load_settings_rejects_bad_json() {
        let file = write_settings("{ not json");
        let err = load_settings(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Parsing settings JSON"));
    }

    #[test]
    fn test_fallback_uses_explicit_path() {
        let file = write_settings(r#"{"data_dir":"/srv/finance"}"#);
        let path = file.path().to_path_buf();
        let settings = load_settings_with_fallback(Some(&path)).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/finance"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DATA_DIR", "/tmp/data"),
            ("INVITE_SECRET", "from-env"),
            ("INVITE_VALIDITY_DAYS", "3"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(settings.invites.secret, "from-env");
        assert_eq!(settings.invites.validity_days, 3);
    }

    #[test]
    fn test_env_override_rejects_bad_port() {
        let mut settings = Settings::default();
        let result = apply_env_overrides(&mut settings, |k| (k == "PORT").then(|| "eighty".to_string()));
        assert!(result.is_err());
    }
}
