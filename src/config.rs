//! Runtime configuration.
//!
//! Built in layers: defaults, then an optional JSON file named by `BLOCKFALL_CONFIG`,
//! then individual `BLOCKFALL_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;

use crate::core::ScoringRules;
use crate::types::FRAME_MS;

pub const ENV_CONFIG: &str = "BLOCKFALL_CONFIG";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_SCORING: &str = "BLOCKFALL_SCORING";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

/// Frame periods outside this range are clamped.
pub const FRAME_MS_RANGE: (u32, u32) = (1, 250);

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("unknown scoring rules {0:?} (expected \"classic\" or \"flat\")")]
    UnknownScoring(String),
}

/// On-disk form. Every field is optional; absent fields keep the lower layer's value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FileConfig {
    pub seed: Option<u32>,
    pub scoring: Option<String>,
    pub frame_ms: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bag seed. `None` picks one from the clock at startup.
    pub seed: Option<u32>,
    pub rules: ScoringRules,
    /// Frame period of the game loop.
    pub frame_ms: u32,
    /// Log file. Without one no subscriber is installed.
    pub log_path: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            rules: ScoringRules::classic(),
            frame_ms: FRAME_MS,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load with `lookup` standing in for the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = var(ENV_CONFIG) {
            config.apply_file(read_file(Path::new(&path))?)?;
        }

        if let Some(v) = var(ENV_SEED) {
            config.seed = Some(parse_u32(ENV_SEED, &v)?);
        }
        if let Some(v) = var(ENV_SCORING) {
            config.rules = parse_rules(&v)?;
        }
        if let Some(v) = var(ENV_FRAME_MS) {
            config.frame_ms = parse_u32(ENV_FRAME_MS, &v)?;
        }
        if let Some(v) = var(ENV_LOG_PATH) {
            config.log_path = Some(PathBuf::from(v));
        }
        if let Some(v) = var(ENV_LOG) {
            config.log_filter = v;
        }
        Ok(config)
    }

    /// Overlay the fields present in `file`.
    pub fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(seed) = file.seed {
            self.seed = Some(seed);
        }
        if let Some(name) = file.scoring {
            self.rules = parse_rules(&name)?;
        }
        if let Some(frame_ms) = file.frame_ms {
            self.frame_ms = frame_ms;
        }
        if let Some(path) = file.log_path {
            self.log_path = Some(path);
        }
        if let Some(filter) = file.log_filter {
            self.log_filter = filter;
        }
        Ok(())
    }

    /// Configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Frame period with `frame_ms` clamped to [`FRAME_MS_RANGE`].
    pub fn frame_period(&self) -> Duration {
        let (lo, hi) = FRAME_MS_RANGE;
        Duration::from_millis(self.frame_ms.clamp(lo, hi) as u64)
    }

    pub fn frame_ms_clamped(&self) -> bool {
        let (lo, hi) = FRAME_MS_RANGE;
        !(lo..=hi).contains(&self.frame_ms)
    }
}

/// Parse a config file.
pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_u32(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_rules(name: &str) -> Result<ScoringRules, ConfigError> {
    ScoringRules::from_name(name).ok_or_else(|| ConfigError::UnknownScoring(name.to_string()))
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so seeds differ across runs started within the same second.
    (nanos ^ (nanos >> 32)) as u32
}
