// Kong declarative config parser
// Uses serde_yaml; JSON documents parse too since JSON is valid YAML

use super::{template, ConfigError, ConfigParser};
use crate::models::Configuration;
use std::path::Path;

pub struct KongParser;

impl KongParser {
    /// Template and parse an in-memory document. `origin` is only used in errors.
    pub fn parse_str(&self, raw: &str, origin: &Path) -> Result<Configuration, ConfigError> {
        let resolved = template::resolve(raw);
        let config: Configuration =
            serde_yaml::from_str(&resolved).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %origin.display(),
            services = config.services.len(),
            routes = config.services.iter().map(|s| s.routes.len()).sum::<usize>(),
            "Parsed declarative config"
        );
        Ok(config)
    }
}

impl ConfigParser for KongParser {
    fn parse(&self, path: &Path) -> Result<Configuration, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = std::str::from_utf8(&bytes).map_err(|source| ConfigError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(raw, path)
    }
}
