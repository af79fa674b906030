//! TOML-based configuration for Triad
//!
//! Configuration lives in `triad.toml`. Every field has a default, so a
//! missing file yields a working template-only server. After parsing, a small
//! set of environment variables override file values (see
//! [`TriadConfig::apply_env_overrides`]).

use crate::types::AgentKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Root configuration structure loaded from triad.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriadConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub agents: AgentsConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Allow any origin (permissive CORS)
    #[serde(default = "default_true")]
    pub cors: bool,

    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            cors: true,
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model identifier sent to the provider and reported in metadata
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_openai_base")]
    pub api_base: String,

    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Upper bound on a single provider call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
            api_base: default_openai_base(),
            ollama_url: default_ollama_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Variant used by explicit creates without a type and by implicit creates
    #[serde(default)]
    pub default_kind: AgentKind,
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {0}: {1}")]
    ReadError(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl TriadConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. The fallback is not logged here; callers report it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text (no validation)
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from file, apply process environment overrides, then validate
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `API_HOST` / `API_PORT` overrides from the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("API_PORT '{}' is not a valid port", port))
            })?;
        }
        Ok(())
    }

    /// Resolve the provider API key through `llm.api_key_env`
    pub fn api_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.llm.api_key_env).filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate_with<F>(&self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "llm.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be greater than 0".to_string(),
            ));
        }

        // Template-only deployments never touch the provider.
        if self.agents.default_kind == AgentKind::Completion
            && self.llm.provider == ProviderKind::OpenAI
            && self.api_key(&lookup).is_none()
        {
            return Err(ConfigError::MissingEnvVar(self.llm.api_key_env.clone()));
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_document() {
        let config = TriadConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.llm.provider, ProviderKind::OpenAI);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.agents.default_kind, AgentKind::Template);
        assert!(config.validate_with(env(&[])).is_ok());
    }

    #[test]
    fn test_parse_full_document() {
        let config = TriadConfig::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            log_format = "json"

            [llm]
            provider = "ollama"
            model = "llama3.2"
            temperature = 0.2
            max_tokens = 256

            [agents]
            default_kind = "completion"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.llm.provider, ProviderKind::Ollama);
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.agents.default_kind, AgentKind::Completion);
        // Ollama needs no API key even for completion defaults
        assert!(config.validate_with(env(&[])).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TriadConfig::default();
        config
            .apply_env_overrides(env(&[("API_HOST", "10.0.0.1"), ("API_PORT", "8123")]))
            .unwrap();
        assert_eq!(config.bind_address(), "10.0.0.1:8123");

        let err = config
            .apply_env_overrides(env(&[("API_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_completion_default_requires_api_key() {
        let mut config = TriadConfig::default();
        config.agents.default_kind = AgentKind::Completion;

        let err = config.validate_with(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "OPENAI_API_KEY"));

        assert!(config
            .validate_with(env(&[("OPENAI_API_KEY", "sk-test")]))
            .is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = TriadConfig::default();
        config.llm.temperature = 3.5;
        assert!(config.validate_with(env(&[])).is_err());

        let mut config = TriadConfig::default();
        config.llm.max_tokens = 0;
        assert!(config.validate_with(env(&[])).is_err());

        let mut config = TriadConfig::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate_with(env(&[])).is_err());
    }

    #[test]
    fn test_api_key_ignores_blank_values() {
        let config = TriadConfig::default();
        assert_eq!(config.api_key(env(&[("OPENAI_API_KEY", "  ")])), None);
        assert_eq!(
            config.api_key(env(&[("OPENAI_API_KEY", "sk-1")])),
            Some("sk-1".to_string())
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TriadConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_file_fallback_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            TriadConfig::load(dir.path().join("absent.toml"))
        })
        .unwrap();

        assert_eq!(config.server.port, 8000);
        let output = String::from_utf8(logs.0.lock().clone()).unwrap();
        assert!(!output.contains("not found"), "unexpected log: {}", output);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triad.toml");
        fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let config = TriadConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = TriadConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
