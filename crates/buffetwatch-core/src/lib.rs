pub mod app_config;
pub mod config;
pub mod records;
pub mod registry;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{ErrorRecord, PriceRecord, ResultRecord};
pub use registry::{load_registry, BranchConfig, Registry, SlotConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read registry file {path}: {source}")]
    RegistryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry file: {0}")]
    RegistryFileParse(#[from] serde_yaml::Error),

    #[error("registry validation failed: {0}")]
    Validation(String),
}
