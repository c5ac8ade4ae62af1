use std::{
    env,
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use reqwest::Url;
use serde::Deserialize;

use crate::{
    domain::toast::{DEFAULT_TOAST_LIMIT, DEFAULT_TOAST_TTL_MILLIS, MAX_TOAST_TTL_MILLIS},
    infra::attachment::MAX_ATTACHMENT_BYTES,
};

pub const CONFIG_ENV: &str = "TICKET_DESK_CONFIG";
pub const API_URL_ENV: &str = "TICKET_DESK_API_URL";
const LOCAL_CONFIG_FILE: &str = "ticket-desk.toml";
const APP_DIR: &str = "ticket-desk";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_attachment_max_bytes")]
    pub attachment_max_bytes: u64,
    pub log_path: Option<String>,
    #[serde(default)]
    pub toasts: ToastConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToastConfig {
    #[serde(default = "default_toast_limit")]
    pub limit: usize,
    #[serde(default = "default_toast_ttl_millis")]
    pub ttl_millis: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            limit: default_toast_limit(),
            ttl_millis: default_toast_ttl_millis(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            request_timeout_seconds: default_request_timeout_seconds(),
            tick_millis: default_tick_millis(),
            attachment_max_bytes: default_attachment_max_bytes(),
            log_path: None,
            toasts: ToastConfig::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn toast_ttl(&self) -> chrono::Duration {
        let millis = i64::try_from(self.toasts.ttl_millis).unwrap_or(i64::MAX);
        chrono::Duration::milliseconds(millis)
    }
}

fn default_request_timeout_seconds() -> u64 {
    25
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_attachment_max_bytes() -> u64 {
    MAX_ATTACHMENT_BYTES
}

fn default_toast_limit() -> usize {
    DEFAULT_TOAST_LIMIT
}

fn default_toast_ttl_millis() -> u64 {
    DEFAULT_TOAST_TTL_MILLIS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathSource {
    Explicit,
    LocalFile,
    Env,
    Default,
}

impl Display for ConfigPathSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Explicit => "--config",
            Self::LocalFile => "./ticket-desk.toml",
            Self::Env => "TICKET_DESK_CONFIG",
            Self::Default => "default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfigPath {
    pub path: PathBuf,
    pub source: ConfigPathSource,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub resolved_path: ResolvedConfigPath,
}

pub fn parse_config(src: &str) -> Result<Config> {
    let cfg = parse_config_unvalidated(src)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn parse_config_unvalidated(src: &str) -> Result<Config> {
    toml::from_str(src).context("failed to parse config TOML")
}

/// Loads, applies `TICKET_DESK_API_URL`, then validates.
///
/// A missing file is tolerated only at the default location and only when the
/// API URL comes from the environment.
pub fn load_config_with_path(path: Option<&Path>) -> Result<LoadedConfig> {
    let resolved_path = resolve_config_path_with_source(path)?;
    let api_url_override = env::var(API_URL_ENV)
        .ok()
        .filter(|raw| !raw.trim().is_empty());

    let mut config = if resolved_path.path.exists() {
        let src = fs::read_to_string(&resolved_path.path).with_context(|| {
            format!("failed to read config: {}", resolved_path.path.display())
        })?;
        parse_config_unvalidated(&src)
            .with_context(|| format!("invalid config: {}", resolved_path.path.display()))?
    } else if resolved_path.source == ConfigPathSource::Default && api_url_override.is_some() {
        Config::default()
    } else {
        return Err(anyhow!(
            "config does not exist: {} (source: {}, run `ticket-desk init` or pass `--config <path>`)",
            resolved_path.path.display(),
            resolved_path.source
        ));
    };

    if let Some(api_url) = api_url_override {
        config.api_url = api_url;
    }
    validate_config(&config)?;

    Ok(LoadedConfig {
        config,
        resolved_path,
    })
}

pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    resolve_config_path_with_source(path).map(|resolved| resolved.path)
}

pub fn resolve_config_path_with_source(path: Option<&Path>) -> Result<ResolvedConfigPath> {
    if let Some(explicit) = path {
        return Ok(ResolvedConfigPath {
            path: explicit.to_path_buf(),
            source: ConfigPathSource::Explicit,
        });
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(ResolvedConfigPath {
            path: local,
            source: ConfigPathSource::LocalFile,
        });
    }

    if let Some(raw) = env::var_os(CONFIG_ENV).filter(|raw| !raw.is_empty()) {
        return Ok(ResolvedConfigPath {
            path: PathBuf::from(raw),
            source: ConfigPathSource::Env,
        });
    }

    Ok(ResolvedConfigPath {
        path: installed_config_path()?,
        source: ConfigPathSource::Default,
    })
}

pub fn installed_config_path() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR).join("config.toml"))
        .ok_or_else(|| anyhow!("could not determine config directory"))
}

fn validate_config(cfg: &Config) -> Result<()> {
    validate_api_url(&cfg.api_url)?;

    if cfg.request_timeout_seconds == 0 {
        return Err(anyhow!("request_timeout_seconds must be >= 1"));
    }

    if cfg.tick_millis == 0 {
        return Err(anyhow!("tick_millis must be >= 1"));
    }

    if cfg.attachment_max_bytes == 0 {
        return Err(anyhow!("attachment_max_bytes must be >= 1"));
    }

    if cfg.toasts.limit == 0 {
        return Err(anyhow!("toasts.limit must be >= 1"));
    }

    if cfg.toasts.ttl_millis == 0 || cfg.toasts.ttl_millis > MAX_TOAST_TTL_MILLIS {
        return Err(anyhow!("toasts.ttl_millis must be between 1 and {MAX_TOAST_TTL_MILLIS}"));
    }

    Ok(())
}

fn validate_api_url(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(anyhow!(
            "api_url missing; set it in the config file or via {API_URL_ENV}"
        ));
    }

    let url = Url::parse(raw.trim()).with_context(|| format!("api_url '{raw}' is not a URL"))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(anyhow!(
            "api_url '{}' is invalid; expected an http(s) URL",
            raw
        ))
    }
}
