use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use calrs_core::models::Timestamp;
use calrs_overlaprs::consts::DEFAULT_BUCKET_SIZE;
use calrs_overlaprs::{FinderType, OverlapError};

pub const DEFAULT_ALGORITHM: FinderType = FinderType::Partition;

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

///
/// Optional defaults read from a TOML file, e.g.
///
/// ```toml
/// algorithm = "bucket"
/// bucket_size = 3600
/// format = "json"
/// ```
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
pub struct CalrsConfig {
    pub algorithm: Option<String>,
    pub bucket_size: Option<Timestamp>,
    pub format: Option<OutputFormat>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid output format: {0}. Valid options are 'tsv' or 'json'")]
    InvalidFormat(String),
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TryFrom<&Path> for CalrsConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        let raw = read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Final settings for a run: command-line flags win over the config file,
/// which wins over the defaults.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub algorithm: FinderType,
    pub bucket_size: Timestamp,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(config: CalrsConfig, matches: &ArgMatches) -> ConfigResult<Self> {
        let algorithm = match flag::<String>(matches, "algorithm").or(config.algorithm) {
            Some(name) => name.parse::<FinderType>()?,
            None => DEFAULT_ALGORITHM,
        };

        let bucket_size = flag::<Timestamp>(matches, "bucket-size")
            .or(config.bucket_size)
            .unwrap_or(DEFAULT_BUCKET_SIZE);

        let format = match flag::<String>(matches, "format") {
            Some(name) => name.parse::<OutputFormat>()?,
            None => config.format.unwrap_or_default(),
        };

        Ok(Settings {
            algorithm,
            bucket_size,
            format,
        })
    }

    /// Load the `--config` file if one was given, then resolve.
    pub fn from_matches(matches: &ArgMatches) -> ConfigResult<Self> {
        let config = match flag::<String>(matches, "config") {
            Some(path) => {
                log::info!("Loading config from {path}");
                CalrsConfig::try_from(Path::new(&path))?
            }
            None => CalrsConfig::default(),
        };
        Self::resolve(config, matches)
    }
}

/// Read an optional argument, tolerating subcommands that do not define it.
fn flag<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}
