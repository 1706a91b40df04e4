use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub dataforseo: DataForSeoConfig,

    pub gemini: GeminiConfig,

    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/blogforge.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header carrying the user id issued by the upstream identity provider.
    pub user_id_header: String,

    /// Shared secret the fronting proxy must present in `X-Api-Key`.
    /// When unset, the identity header alone is trusted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_id_header: "x-clerk-user-id".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataForSeoConfig {
    pub base_url: String,

    pub login: String,

    #[serde(skip_serializing)]
    pub password: String,

    pub request_timeout_seconds: u64,
}

impl Default for DataForSeoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dataforseo.com".to_string(),
            login: String::new(),
            password: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,

    #[serde(skip_serializing)]
    pub api_key: String,

    pub model: String,

    pub request_timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.0-flash-exp".to_string(),
            request_timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,

    pub cache_prune_interval_minutes: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_prune_interval_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Secrets are usually injected through the environment rather than the
    /// config file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("BLOGFORGE_DATABASE_PATH") {
            self.general.database_path = v;
        }
        if let Some(v) = lookup("BLOGFORGE_DATAFORSEO_LOGIN") {
            self.dataforseo.login = v;
        }
        if let Some(v) = lookup("BLOGFORGE_DATAFORSEO_PASSWORD") {
            self.dataforseo.password = v;
        }
        if let Some(v) = lookup("BLOGFORGE_GEMINI_API_KEY") {
            self.gemini.api_key = v;
        }
        if let Some(v) = lookup("BLOGFORGE_API_KEY") {
            self.auth.api_key = Some(v);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("blogforge").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".blogforge").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.auth.user_id_header.trim().is_empty() {
            anyhow::bail!("auth.user_id_header cannot be empty");
        }

        if self.dataforseo.request_timeout_seconds == 0 {
            anyhow::bail!("dataforseo.request_timeout_seconds must be > 0");
        }

        if self.gemini.request_timeout_seconds == 0 {
            anyhow::bail!("gemini.request_timeout_seconds must be > 0");
        }

        if self.scheduler.enabled && self.scheduler.cache_prune_interval_minutes == 0 {
            anyhow::bail!("scheduler.cache_prune_interval_minutes must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dataforseo.request_timeout_seconds, 30);
        assert_eq!(config.auth.user_id_header, "x-clerk-user-id");
        assert!(config.auth.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_hides_secrets() {
        let mut config = Config::default();
        config.dataforseo.password = "hunter2".to_string();
        config.gemini.api_key = "secret-key".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[dataforseo]"));
        assert!(!toml_str.contains("hunter2"));
        assert!(!toml_str.contains("secret-key"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [dataforseo]
            request_timeout_seconds = 10
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.dataforseo.request_timeout_seconds, 10);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            "BLOGFORGE_GEMINI_API_KEY" => Some("g-key".to_string()),
            "BLOGFORGE_API_KEY" => Some("proxy".to_string()),
            _ => None,
        });

        assert_eq!(config.gemini.api_key, "g-key");
        assert_eq!(config.auth.api_key.as_deref(), Some("proxy"));
        assert!(config.dataforseo.login.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_prune_interval() {
        let mut config = Config::default();
        config.scheduler.cache_prune_interval_minutes = 0;
        assert!(config.validate().is_err());
        config.scheduler.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.dataforseo.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
