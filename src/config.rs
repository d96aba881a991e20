//! Configuration file support for registry-detail.
//!
//! Provides YAML-based configuration through `registry-detail.config.yml`
//! files, plus the merge of file values, command-line overrides and the
//! token environment variable into resolved [`Settings`].

use anyhow::{bail, Context};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::application::controller::DEFAULT_REGISTRY_URL;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "registry-detail.config.yml";

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV_VAR: &str = "REGISTRY_DETAIL_TOKEN";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

const DEFAULT_WATCH_INTERVAL_SECS: u64 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Registry host used in the `docker pull` command
    pub registry_url: Option<String>,
    /// Base URL of the registry REST API
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    /// Offset for build timestamps, e.g. `+09:00`
    pub utc_offset: Option<String>,
    /// Whether the viewer may open build details
    pub can_start_builds: Option<bool>,
    pub watch_interval_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    let size = std::fs::metadata(path)?.len();
    validate_file_size(size, path, MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, value) in [
        ("registry_url", &config.registry_url),
        ("api_url", &config.api_url),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default, or set a URL.",
                field
            );
        }
    }

    if let Some(ref offset) = config.utc_offset {
        parse_utc_offset(offset)?;
    }

    if config.watch_interval_secs == Some(0) {
        bail!(
            "Invalid config: watch_interval_secs must be greater than 0.\n\n\
             💡 Hint: Use a polling interval in seconds, e.g. 10."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Parses `Z`, `UTC`, `+HH:MM` or `-HH:MM`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let invalid = || {
        anyhow::anyhow!(
            "Invalid config: utc_offset '{}' is not a valid offset.\n\n\
             💡 Hint: Use the form +HH:MM or -HH:MM (e.g. \"+09:00\").",
            value
        )
    };

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub registry_url: String,
    pub api_url: String,
    pub auth_token: Option<String>,
    pub utc_offset: FixedOffset,
    pub can_start_builds: bool,
    pub watch_interval: Duration,
}

impl Settings {
    /// Merges command line, config file, environment token and defaults, in
    /// that order of precedence.
    pub fn resolve(
        file: Option<ConfigFile>,
        overrides: Overrides,
        env_token: Option<String>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            bail!(
                "Invalid API URL: {}\n\n💡 Hint: The API URL must start with http:// or https://",
                api_url
            );
        }

        let utc_offset = match file.utc_offset {
            Some(ref offset) => parse_utc_offset(offset)?,
            None => Utc.fix(),
        };

        Ok(Self {
            registry_url: file
                .registry_url
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            api_url,
            auth_token: file
                .auth_token
                .or(env_token)
                .filter(|token| !token.trim().is_empty()),
            utc_offset,
            can_start_builds: file.can_start_builds.unwrap_or(true),
            watch_interval: Duration::from_secs(
                file.watch_interval_secs.unwrap_or(DEFAULT_WATCH_INTERVAL_SECS),
            ),
        })
    }
}
