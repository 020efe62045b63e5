//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional YAML file named by
//! `TOUR_ADMIN_CONFIG`, then individual environment variables.

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use serde::Deserialize;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE_ENV: &str = "TOUR_ADMIN_CONFIG";
pub const DATA_DIR_ENV: &str = "TOUR_ADMIN_DATA_DIR";
pub const BIND_ENV: &str = "TOUR_ADMIN_BIND";
pub const ALLOWED_ORIGIN_ENV: &str = "TOUR_ADMIN_ALLOWED_ORIGIN";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    /// Single origin the CORS layer admits
    pub allowed_origin: HeaderValue,
}

/// Shape of the optional YAML file; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    data_directory: Option<PathBuf>,
    bind_address: Option<String>,
    allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: DEFAULT_BIND.parse().unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

/// `~/Documents/Tour Admin`, falling back to the working directory
fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Tour Admin")
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let file_path = env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
        Self::load_from(file_path.as_deref(), |key| env::var(key).ok())
    }

    /// Load configuration from an optional file and a variable lookup
    pub fn load_from<F>(file_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = file_path {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let file: FileConfig = serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            info!("Loaded config file {}", path.display());
            config.apply(file.data_directory, file.bind_address, file.allowed_origin)?;
        }

        config.apply(
            lookup(DATA_DIR_ENV).map(PathBuf::from),
            lookup(BIND_ENV),
            lookup(ALLOWED_ORIGIN_ENV),
        )?;

        Ok(config)
    }

    fn apply(
        &mut self,
        data_directory: Option<PathBuf>,
        bind_address: Option<String>,
        allowed_origin: Option<String>,
    ) -> Result<()> {
        if let Some(dir) = data_directory {
            self.data_directory = dir;
        }
        if let Some(bind) = bind_address {
            self.bind_address = bind
                .trim()
                .parse()
                .with_context(|| format!("Invalid bind address '{}'", bind))?;
        }
        if let Some(origin) = allowed_origin {
            self.allowed_origin = parse_allowed_origin(&origin)?;
        }
        Ok(())
    }
}

/// An origin is a `http` or `https` URL that is also a valid header value
fn parse_allowed_origin(origin: &str) -> Result<HeaderValue> {
    let origin = origin.trim();
    if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        bail!("Invalid allowed origin '{}': expected an http or https URL", origin);
    }
    HeaderValue::from_str(origin).with_context(|| format!("Invalid allowed origin '{}'", origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = AppConfig::load_from(None, lookup_from(&[]))?;
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
        assert!(config.data_directory.ends_with("Tour Admin"));
        Ok(())
    }

    #[test]
    fn test_env_overrides_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("config.yaml");
        std::fs::write(
            &file,
            "data_directory: /srv/tour-admin\nbind_address: 0.0.0.0:8000\nallowed_origin: https://admin.example.com\n",
        )?;

        let config = AppConfig::load_from(Some(&file), lookup_from(&[(BIND_ENV, "127.0.0.1:9000")]))?;
        assert_eq!(config.data_directory, PathBuf::from("/srv/tour-admin"));
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:9000");
        assert_eq!(config.allowed_origin, "https://admin.example.com");
        Ok(())
    }

    #[test]
    fn test_invalid_bind_address() {
        let result = AppConfig::load_from(None, lookup_from(&[(BIND_ENV, "not-an-address")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_allowed_origin() {
        for origin in ["localhost:8080", "*", "http://bad\norigin"] {
            let result = AppConfig::load_from(None, lookup_from(&[(ALLOWED_ORIGIN_ENV, origin)]));
            assert!(result.is_err(), "{:?} should be rejected", origin);
        }
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from(Some(Path::new("/definitely/not/here.yaml")), lookup_from(&[]));
        assert!(result.is_err());
    }
}
