use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Path of the JSON data file. Relative paths resolve against the working directory.
    pub const DATA_FILE: &str = "COURSEMATE_DATA_FILE";
    /// Base URL of the local Ollama server.
    pub const OLLAMA_HOST: &str = "OLLAMA_HOST";
    /// Model used when the data file has no `aiModel` yet.
    pub const OLLAMA_MODEL: &str = "OLLAMA_MODEL";
    /// Request timeout for generation calls, in seconds.
    pub const OLLAMA_TIMEOUT_SECS: &str = "OLLAMA_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const DATA_FILE: &str = "Coursemate_data.json";
    pub const OLLAMA_HOST: &str = "http://localhost:11434";
    pub const OLLAMA_MODEL: &str = "llama3";
    pub const OLLAMA_TIMEOUT_SECS: u64 = 180;
    /// Health checks must answer quickly or the bridge is treated as unavailable.
    pub const HEALTH_TIMEOUT_SECS: u64 = 3;
}

/// Get the data file path
pub fn data_file_path() -> PathBuf {
    env::var(env_vars::DATA_FILE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(defaults::DATA_FILE))
}

/// Get the Ollama host without a trailing slash
pub fn ollama_host() -> String {
    env::var(env_vars::OLLAMA_HOST)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| defaults::OLLAMA_HOST.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get the model name seeded into fresh settings
pub fn default_ai_model() -> String {
    env::var(env_vars::OLLAMA_MODEL)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| defaults::OLLAMA_MODEL.to_string())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_file: PathBuf,
    pub ollama_host: String,
    pub ollama_timeout: Duration,
    pub health_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let timeout_secs = match env::var(env_vars::OLLAMA_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!(
                    "[CONFIG] {} is not a number ({:?}), using {}s",
                    env_vars::OLLAMA_TIMEOUT_SECS,
                    raw,
                    defaults::OLLAMA_TIMEOUT_SECS
                );
                defaults::OLLAMA_TIMEOUT_SECS
            }),
            Err(_) => defaults::OLLAMA_TIMEOUT_SECS,
        };

        Self {
            data_file: data_file_path(),
            ollama_host: ollama_host(),
            ollama_timeout: Duration::from_secs(timeout_secs.max(1)),
            health_timeout: Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(defaults::DATA_FILE),
            ollama_host: defaults::OLLAMA_HOST.to_string(),
            ollama_timeout: Duration::from_secs(defaults::OLLAMA_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_local_ollama() {
        let config = Config::default();
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.data_file, PathBuf::from("Coursemate_data.json"));
        assert!(config.health_timeout < config.ollama_timeout);
    }
}
