use serde::{Deserialize, Serialize};

use crate::domain::RemovalStamp;

/// Stores embedder-configurable behaviour of the entity layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive applied by [`crate::init_with_config`].
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    /// Whether removing an absent transaction still stamps the owner.
    #[serde(default)]
    pub removal_stamp: RemovalStamp,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: Self::default_log_filter(),
            removal_stamp: RemovalStamp::default(),
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        "financial_entities=info".into()
    }
}
