//! Settings shared by every subcommand of the binary.
//!
//! Every engine takes its own configuration struct; [`Config`] only knows
//! how to build them from command-line flags or their environment variables
//! (after `.env` is loaded).

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use roadmend_geo::Crs;
use thiserror::Error;

use crate::correct::MatchConfig;
use crate::difference::DifferenceConfig;
use crate::enrich::{DEFAULT_LOOKUP_TIMEOUT, DEFAULT_LOOKUP_URL, EnrichConfig, LookupConfig};
use crate::graph::NetworkMode;

pub const API_KEY: &str = "MAPTILER_API_KEY";
pub const LOOKUP_URL: &str = "ROADMEND_LOOKUP_URL";
pub const BATCH_SIZE: &str = "ROADMEND_BATCH_SIZE";
pub const BATCH_DELAY_SECS: &str = "ROADMEND_BATCH_DELAY_SECS";
pub const LOOKUP_TIMEOUT_SECS: &str = "ROADMEND_LOOKUP_TIMEOUT_SECS";
pub const GRAPH_DIR: &str = "ROADMEND_GRAPH_DIR";
pub const NETWORK_MODE: &str = "ROADMEND_NETWORK_MODE";
pub const LENGTH_CRS: &str = "ROADMEND_LENGTH_CRS";
pub const SNAP_WARNING_M: &str = "ROADMEND_SNAP_WARNING_M";


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: String, value: String },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// MapTiler key for reverse geocoding. Required by `enrich`.
    #[arg(long, env = API_KEY, hide_env_values = true, value_parser = trimmed)]
    pub api_key: Option<String>,

    /// Base URL of the reverse-geocoding service.
    #[arg(long, env = LOOKUP_URL, default_value = DEFAULT_LOOKUP_URL)]
    pub lookup_url: String,

    /// Rows looked up between two pauses.
    #[arg(long, env = BATCH_SIZE, default_value_t = 50, value_parser = positive)]
    pub batch_size: usize,

    /// Pause between two lookup batches, in seconds.
    #[arg(long = "batch-delay-secs", env = BATCH_DELAY_SECS, default_value = "2", value_parser = seconds)]
    pub batch_delay: Duration,

    /// Timeout of a single lookup request, in seconds.
    #[arg(long = "lookup-timeout-secs", env = LOOKUP_TIMEOUT_SECS, default_value = "10", value_parser = seconds)]
    pub lookup_timeout: Duration,

    /// Directory holding `<region>.osm.pbf` street extracts.
    #[arg(long, env = GRAPH_DIR, default_value = ".")]
    pub graph_dir: PathBuf,

    /// Street network kept when building the graph: all, drive or walk.
    #[arg(long, env = NETWORK_MODE, default_value_t = NetworkMode::default(), value_parser = network_mode)]
    pub network_mode: NetworkMode,

    /// Projected system used for `distance(m)`, e.g. `EPSG:32631`.
    #[arg(long, env = LENGTH_CRS)]
    pub length_crs: Option<Crs>,

    /// Endpoint snaps further than this, in metres, are logged.
    #[arg(long = "snap-warning-m", env = SNAP_WARNING_M, default_value_t = 500.0)]
    pub snap_warning_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        let enrich = EnrichConfig::default();

        Config {
            api_key: None,
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            batch_size: enrich.batch_size,
            batch_delay: enrich.delay,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            graph_dir: PathBuf::from("."),
            network_mode: NetworkMode::default(),
            length_crs: None,
            snap_warning_m: MatchConfig::default().snap_warning_m,
        }
    }
}

impl Config {
    /// Settings for the reverse-lookup client. Requires the API key.
    pub fn lookup(&self) -> Result<LookupConfig, ConfigError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| ConfigError::Missing(API_KEY.to_string()))?;

        Ok(LookupConfig {
            base_url: self.lookup_url.clone(),
            api_key,
            timeout: self.lookup_timeout,
        })
    }

    pub fn enrich(&self) -> EnrichConfig {
        EnrichConfig {
            batch_size: self.batch_size,
            delay: self.batch_delay,
            ..EnrichConfig::default()
        }
    }

    pub fn difference(&self) -> DifferenceConfig {
        DifferenceConfig {
            length_crs: self.length_crs,
            ..DifferenceConfig::default()
        }
    }

    pub fn matching(&self) -> MatchConfig {
        MatchConfig {
            snap_warning_m: self.snap_warning_m,
        }
    }
}

fn trimmed(value: &str) -> Result<String, String> {
    match value.trim() {
        "" => Err("must not be blank".to_string()),
        value => Ok(value.to_string()),
    }
}

fn positive(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}

fn seconds(value: &str) -> Result<Duration, String> {
    let secs = value.trim().parse::<f64>().map_err(|err| err.to_string())?;
    Duration::try_from_secs_f64(secs).map_err(|err| err.to_string())
}

fn network_mode(value: &str) -> Result<NetworkMode, String> {
    value
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| format!("expected one of all, drive, walk, got {value:?}"))
}
