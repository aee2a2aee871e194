use crate::error::{AppResult, ConfigErrorKind, InfraError};
use crate::models::types::StatHash;
use crate::services::StatRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding profile.json, definitions/<locale>/ and friends
    pub data_dir: PathBuf,
    pub locale: String,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_filter: String,
    /// Replaces the built-in stat blacklist when set
    pub excluded_stats: Option<Vec<StatHash>>,
    /// Replaces the built-in numerical stat list when set
    pub numerical_stats: Option<Vec<StatHash>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            locale: DEFAULT_LOCALE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            excluded_stats: None,
            numerical_stats: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let config_err = |source| InfraError::Config {
            path: path.to_path_buf(),
            source,
        };

        let data = std::fs::read_to_string(path).map_err(|e| config_err(ConfigErrorKind::Read(e)))?;
        let cfg: Self = toml::from_str(&data).map_err(|e| config_err(ConfigErrorKind::Parse(e)))?;
        Ok(cfg)
    }

    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlay `SETKEEPER_*` variables, as returned by `lookup`, on top of `self`.
    pub fn with_env<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SETKEEPER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(locale) = lookup("SETKEEPER_LOCALE") {
            self.locale = locale;
        }
        if let Some(filter) = lookup("SETKEEPER_LOG") {
            self.log_filter = filter;
        }
        if let Some(list) = lookup("SETKEEPER_EXCLUDED_STATS") {
            self.excluded_stats = Some(parse_stat_list("SETKEEPER_EXCLUDED_STATS", &list)?);
        }
        if let Some(list) = lookup("SETKEEPER_NUMERICAL_STATS") {
            self.numerical_stats = Some(parse_stat_list("SETKEEPER_NUMERICAL_STATS", &list)?);
        }

        Ok(self)
    }

    pub fn stat_rules(&self) -> StatRules {
        let mut rules = StatRules::default();
        if let Some(excluded) = &self.excluded_stats {
            rules.excluded = excluded.iter().copied().collect();
        }
        if let Some(numerical) = &self.numerical_stats {
            rules.numerical = numerical.iter().copied().collect();
        }
        rules
    }
}

fn parse_stat_list(key: &str, list: &str) -> AppResult<Vec<StatHash>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<StatHash>().map_err(|_| {
                InfraError::Env(ConfigErrorKind::InvalidEnv {
                    key: key.to_string(),
                    value: s.to_string(),
                })
                .into()
            })
        })
        .collect()
}
