//! Application shell configuration
//!
//! Read from the environment (a `.env` file is loaded first by the binary).

use roster_client::ClientConfig;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Record store connection
    pub client: ClientConfig,
    /// Log level when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON log lines
    pub log_json: bool,
    /// Directory for rotating log files
    pub log_dir: Option<String>,
    /// Use the in-memory demo store instead of HTTP
    pub offline: bool,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            log_level: std::env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_flag("ROSTER_LOG_JSON"),
            log_dir: std::env::var("ROSTER_LOG_DIR").ok().filter(|s| !s.is_empty()),
            offline: env_flag("ROSTER_OFFLINE"),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            offline: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().is_some_and(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
