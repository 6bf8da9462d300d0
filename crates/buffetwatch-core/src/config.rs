use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an override value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an override value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = or_default("BUFFETWATCH_API_BASE_URL", "https://www.barbequenation.com");
    let branches_path = PathBuf::from(or_default(
        "BUFFETWATCH_BRANCHES_PATH",
        "./config/branches.yaml",
    ));
    let output_path = PathBuf::from(or_default("BUFFETWATCH_OUTPUT_PATH", "./buffet_data.json"));
    let log_level = or_default("BUFFETWATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("BUFFETWATCH_REQUEST_TIMEOUT_SECS", "20")?;
    let user_agent = or_default(
        "BUFFETWATCH_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    );
    let max_attempts = parse_u32("BUFFETWATCH_MAX_ATTEMPTS", "3")?;
    let retry_backoff_base_ms = parse_u64("BUFFETWATCH_RETRY_BACKOFF_BASE_MS", "2000")?;
    let inter_slot_delay_ms = parse_u64("BUFFETWATCH_INTER_SLOT_DELAY_MS", "1200")?;
    let inter_branch_delay_ms = parse_u64("BUFFETWATCH_INTER_BRANCH_DELAY_MS", "4000")?;

    Ok(AppConfig {
        api_base_url,
        branches_path,
        output_path,
        log_level,
        request_timeout_secs,
        user_agent,
        max_attempts,
        retry_backoff_base_ms,
        inter_slot_delay_ms,
        inter_branch_delay_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.api_base_url, "https://www.barbequenation.com");
        assert_eq!(cfg.branches_path.to_str(), Some("./config/branches.yaml"));
        assert_eq!(cfg.output_path.to_str(), Some("./buffet_data.json"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 20);
        assert_eq!(cfg.user_agent, "Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 2000);
        assert_eq!(cfg.inter_slot_delay_ms, 1200);
        assert_eq!(cfg.inter_branch_delay_ms, 4000);
    }

    #[test]
    fn build_app_config_base_url_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_API_BASE_URL", "http://127.0.0.1:9999");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn build_app_config_max_attempts_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_MAX_ATTEMPTS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_attempts, 5);
    }

    #[test]
    fn build_app_config_max_attempts_invalid() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_MAX_ATTEMPTS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BUFFETWATCH_MAX_ATTEMPTS"),
            "expected InvalidEnvVar(BUFFETWATCH_MAX_ATTEMPTS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_backoff_base_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_RETRY_BACKOFF_BASE_MS", "500");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.retry_backoff_base_ms, 500);
    }

    #[test]
    fn build_app_config_inter_slot_delay_invalid() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_INTER_SLOT_DELAY_MS", "1.2");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BUFFETWATCH_INTER_SLOT_DELAY_MS"),
            "expected InvalidEnvVar(BUFFETWATCH_INTER_SLOT_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_REQUEST_TIMEOUT_SECS", "15");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 15);
    }

    #[test]
    fn build_app_config_user_agent_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
    }

    #[test]
    fn build_app_config_output_path_override() {
        let mut map = HashMap::new();
        map.insert("BUFFETWATCH_OUTPUT_PATH", "/tmp/out.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.output_path.to_str(), Some("/tmp/out.json"));
    }
}
