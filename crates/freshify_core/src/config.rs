//! Endpoint and tuning settings, stored as TOML in the platform config dir.
//!
//! Endpoint priority: `FRESHIFY_ENDPOINT` at runtime, then the config file,
//! then the value baked in at build time, then [`DEFAULT_ENDPOINT`].

use crate::error::ConfigError;
use directories_next::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://web-production-8985.up.railway.app/predict";
pub const ENDPOINT_ENV: &str = "FRESHIFY_ENDPOINT";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    /// Seconds before a request is abandoned; `0` waits indefinitely.
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Outcome of [`Config::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub config: Config,
    /// One entry per source that was present but unusable.
    pub warnings: Vec<String>,
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    log_level: Option<String>,
}

impl Config {
    /// `<config dir>/Freshify/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("app", "Freshify", "Freshify")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Overlay the keys present in `path` onto `base`. A missing file yields `base`.
    pub fn load_over(base: Config, path: &Path) -> Result<Config, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(base),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let file: ConfigFile = toml::from_str(&raw)?;
        let config = Config {
            endpoint: file.endpoint.unwrap_or(base.endpoint),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(base.request_timeout_secs),
            log_level: file.log_level.unwrap_or(base.log_level),
        };
        validate_endpoint(&config.endpoint)?;
        Ok(config)
    }

    /// Full startup resolution. Invalid sources are skipped so the app always
    /// starts with a usable endpoint; why each was skipped is returned in
    /// [`Resolved::warnings`] for the caller to log once logging is up.
    pub fn resolve(
        path: Option<&Path>,
        build_endpoint: Option<&str>,
        env_endpoint: Option<String>,
    ) -> Resolved {
        let mut warnings = Vec::new();
        let mut base = Config::default();
        if let Some(url) = build_endpoint.filter(|u| !u.trim().is_empty()) {
            match validate_endpoint(url) {
                Ok(()) => base.endpoint = url.trim().to_string(),
                Err(e) => warnings.push(format!("Ignoring build-time endpoint: {e}")),
            }
        }

        let mut config = match path {
            Some(path) => match Config::load_over(base.clone(), path) {
                Ok(config) => config,
                Err(e) => {
                    warnings.push(format!("Ignoring config file {}: {e}", path.display()));
                    base
                }
            },
            None => base,
        };

        if let Some(url) = env_endpoint.filter(|u| !u.trim().is_empty()) {
            match validate_endpoint(&url) {
                Ok(()) => config.endpoint = url.trim().to_string(),
                Err(e) => warnings.push(format!("Ignoring {ENDPOINT_ENV}: {e}")),
            }
        }
        Resolved { config, warnings }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        validate_endpoint(&self.endpoint)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Accept only absolute http(s) URLs with a host.
pub fn validate_endpoint(url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn missing_file_keeps_base() -> Result<()> {
        let dir = tempdir()?;
        let config = Config::load_over(Config::default(), &dir.path().join("none.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn partial_file_overlays_base() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 5\n")?;
        let config = Config::load_over(Config::default(), &path)?;
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        Ok(())
    }

    #[test]
    fn save_then_load_preserves_values() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            endpoint: "http://localhost:5000/predict".into(),
            request_timeout_secs: 0,
            log_level: "debug".into(),
        };
        config.save_to(&path)?;
        let loaded = Config::load_over(Config::default(), &path)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.request_timeout(), None);
        Ok(())
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(validate_endpoint("ftp://example.com/predict").is_err());
        assert!(validate_endpoint("not a url").is_err());
        assert!(validate_endpoint("https://example.com/predict").is_ok());
    }

    #[test]
    fn resolve_prefers_env_then_file_then_build() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let built = Config::resolve(Some(&path), Some("https://built.example/predict"), None);
        assert_eq!(built.config.endpoint, "https://built.example/predict");
        assert!(built.warnings.is_empty());

        fs::write(&path, "endpoint = \"https://file.example/predict\"\n")?;
        let from_file = Config::resolve(Some(&path), Some("https://built.example/predict"), None);
        assert_eq!(from_file.config.endpoint, "https://file.example/predict");

        let from_env = Config::resolve(
            Some(&path),
            Some("https://built.example/predict"),
            Some("https://env.example/predict".into()),
        );
        assert_eq!(from_env.config.endpoint, "https://env.example/predict");
        Ok(())
    }

    #[test]
    fn resolve_skips_broken_sources() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = [")?;
        let resolved = Config::resolve(Some(&path), Some("nope"), Some("also nope".into()));
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.warnings.len(), 3);
        assert!(resolved.warnings[0].starts_with("Ignoring build-time endpoint"));
        assert!(resolved.warnings[1].starts_with("Ignoring config file"));
        assert!(resolved.warnings[1].contains("not valid TOML"));
        assert!(resolved.warnings[2].starts_with(&format!("Ignoring {ENDPOINT_ENV}")));
        Ok(())
    }

    #[test]
    fn invalid_endpoint_in_file_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"ftp://example.com/predict\"\n")?;
        let resolved = Config::resolve(Some(&path), None, None);
        assert_eq!(resolved.config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("ftp://example.com/predict"));
        Ok(())
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
    }
}
