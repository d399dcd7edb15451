pub mod kong;
pub mod template;

pub use kong::KongParser;
pub use template::{resolve, resolve_with};

use crate::models::Configuration;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse category of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    NotFound,
    ParseError,
}

/// Failure to load a declarative configuration. Fatal to the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("cannot parse {}: not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::NotFound { .. } => ConfigErrorKind::NotFound,
            ConfigError::Parse { .. } | ConfigError::Encoding { .. } => ConfigErrorKind::ParseError,
        }
    }
}

/// Trait for loading a gateway's declarative route configuration
pub trait ConfigParser {
    /// Read, template and parse the document at `path`
    fn parse(&self, path: &Path) -> Result<Configuration, ConfigError>;
}

/// Load a Kong declarative config with environment templating applied.
pub fn load(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    KongParser.parse(path.as_ref())
}
