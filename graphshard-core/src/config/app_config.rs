use crate::{
    config::{aggregation_config::AggregationConfig, log_config::LoggingConfig},
    utils::errors::PartitionError,
};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for code working with edge partitions.
///
/// There is no process-wide instance: load one with [`load_config`] and pass it to whatever
/// needs it.
#[derive(Debug, Deserialize, PartialEq, Clone, Serialize, Default)]
pub struct ShardConfig {
    pub logging: LoggingConfig,
    pub aggregation: AggregationConfig,
}

pub struct ShardConfigBuilder {
    logging: LoggingConfig,
    aggregation: AggregationConfig,
}

impl From<ShardConfig> for ShardConfigBuilder {
    fn from(config: ShardConfig) -> Self {
        Self {
            logging: config.logging,
            aggregation: config.aggregation,
        }
    }
}

impl Default for ShardConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardConfigBuilder {
    pub fn new() -> Self {
        ShardConfig::default().into()
    }

    pub fn with_log_level(mut self, log_level: String) -> Self {
        self.logging.log_level = log_level;
        self
    }

    pub fn with_index_scan_threshold(mut self, threshold: f32) -> Self {
        self.aggregation.index_scan_threshold = threshold;
        self
    }

    pub fn build(self) -> ShardConfig {
        ShardConfig {
            logging: self.logging,
            aggregation: self.aggregation,
        }
    }
}

// Order of precedence of config loading: config file >> given config >> config default
pub fn load_config(
    shard_config: Option<ShardConfig>,
    config_path: Option<PathBuf>,
) -> Result<ShardConfig, PartitionError> {
    let shard_config = shard_config.unwrap_or_default();
    let json = serde_json::to_string(&shard_config)?;
    let mut builder = Config::builder().add_source(File::from_str(&json, FileFormat::Json));
    if let Some(config_path) = config_path {
        builder = builder.add_source(File::from(config_path));
    }
    Ok(builder.build()?.try_deserialize::<ShardConfig>()?)
}
