use pgp_keygen::constants::DEFAULT_BUFFER_SIZE;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};

use crate::PgpKeygenClientError;

/// Client configuration with all fields ready to use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Capacity of each direction of the daemon channel.
    pub buffer_size: usize,
    /// Sent to the daemon as `createUids.useDefault`.
    pub use_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            use_default: false,
        }
    }
}

impl Config {
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, PgpKeygenClientError> {
        let config_string = std::fs::read_to_string(&config_path)?;
        let config_file = ConfigFile::from_str(&config_string)?;
        Self::from_config_file(config_file)
    }

    pub fn from_config_file(config: ConfigFile) -> Result<Self, PgpKeygenClientError> {
        if config.buffer_size == 0 {
            return Err(PgpKeygenClientError::InvalidBufferSize);
        }

        Ok(Self {
            buffer_size: config.buffer_size,
            use_default: config.use_default,
        })
    }
}

/// Client configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct ConfigFile {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default)]
    pub use_default: bool,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl FromStr for ConfigFile {
    type Err = PgpKeygenClientError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_str() {
        let config_str = r#"
        buffer_size = 8
        use_default = true
        "#;

        // Destructure so the test breaks when fields are added
        let ConfigFile {
            buffer_size,
            use_default,
        } = ConfigFile::from_str(config_str).unwrap();

        assert_eq!(buffer_size, 8);
        assert!(use_default);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_config_file(ConfigFile::from_str("").unwrap()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert!(!config.use_default);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = ConfigFile::from_str("server_uri = \"https://localhost:1113\"");

        assert!(matches!(result, Err(PgpKeygenClientError::Toml(_))));
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let config_file = ConfigFile::from_str("buffer_size = 0").unwrap();

        assert!(matches!(
            Config::from_config_file(config_file),
            Err(PgpKeygenClientError::InvalidBufferSize)
        ));
    }
}
