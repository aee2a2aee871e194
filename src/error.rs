use std::path::PathBuf;
use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A data file could not be read or decoded
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadErrorKind,
    },

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error("read: {0}")]
    Read(std::io::Error),

    #[error("json: {0}")]
    Json(serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(serde_yaml::Error),

    #[error("unsupported file format")]
    UnsupportedFormat,
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("cannot read config: {0}")]
    Read(std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(toml::de::Error),

    /// A `SETKEEPER_*` stat list entry that is not a stat hash
    #[error("{key}: {value:?} is not a stat hash")]
    InvalidEnv { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment: {0}")]
    Env(ConfigErrorKind),
}

impl DomainError {
    pub fn load(path: impl Into<PathBuf>, source: LoadErrorKind) -> Self {
        DomainError::Load {
            path: path.into(),
            source,
        }
    }
}
