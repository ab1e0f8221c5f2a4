use std::env;
use std::path::Path;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{NutriError, Result};
use crate::planner::AiSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Gemini API key; requests fail over to the deterministic fallbacks without it.
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub menu_model: String,
    pub timeout_secs: u64,
    pub response_language: String,
}

impl AiConfig {
    pub fn settings(&self) -> AiSettings {
        AiSettings {
            model: self.model.clone(),
            menu_model: self.menu_model.clone(),
            response_language: self.response_language.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in meals.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (GEMINI_API_KEY, PORT)
    /// 2. Environment variables (NUTRI__AI__MODEL, etc.)
    /// 3. Config file given by path or NUTRI_CONFIG
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> std::result::Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default(
                "ai.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("ai.model", "gemini-2.0-flash")?
            .set_default("ai.menu_model", "gemini-1.5-flash")?
            .set_default("ai.timeout_secs", 30)?
            .set_default("ai.response_language", "Vietnamese")?;

        let config_file_path = config_path
            .or_else(|| env::var("NUTRI_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("NUTRI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            builder = builder.set_override("ai.api_key", api_key)?;
        }
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(NutriError::InvalidInput(
                "Server port must be greater than 0".to_string(),
            ));
        }
        if self.ai.timeout_secs == 0 {
            return Err(NutriError::InvalidInput(
                "AI timeout must be at least 1 second".to_string(),
            ));
        }
        if self.ai.model.trim().is_empty() || self.ai.menu_model.trim().is_empty() {
            return Err(NutriError::InvalidInput(
                "AI model names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            ai: AiConfig {
                api_key: None,
                base_url: "http://localhost".to_string(),
                model: "gemini-2.0-flash".to_string(),
                menu_model: "gemini-1.5-flash".to_string(),
                timeout_secs: 30,
                response_language: "Vietnamese".to_string(),
            },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_validation_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = config();
        config.ai.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_model() {
        let mut config = config();
        config.ai.menu_model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[ai]\nmodel = \"custom-model\"\nresponse_language = \"English\"\n\n[logging]\njson = true"
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_string_lossy().into_owned())).unwrap();
        assert_eq!(config.ai.model, "custom-model");
        assert_eq!(config.ai.response_language, "English");
        assert_eq!(config.ai.menu_model, "gemini-1.5-flash");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }
}
