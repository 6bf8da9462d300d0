use std::path::PathBuf;

/// Runtime configuration for a collection run.
///
/// Every field has a default so the binary runs with zero configuration;
/// see `config.rs` for the environment variables that override them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub branches_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Total number of POST attempts per slot, including the first.
    pub max_attempts: u32,
    /// Base delay for linear retry backoff: the sleep before attempt n+1
    /// is `retry_backoff_base_ms * n`.
    pub retry_backoff_base_ms: u64,
    pub inter_slot_delay_ms: u64,
    pub inter_branch_delay_ms: u64,
}
