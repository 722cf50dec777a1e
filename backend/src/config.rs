//! Configuration management for the Mycoforage server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with MYCO__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Allowed browser origins
    pub cors: CorsConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Foraging evaluation settings
    pub foraging: ForagingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiration in seconds
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl CorsConfig {
    /// `None` means any origin
    pub fn origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo base URL
    pub api_endpoint: String,

    /// Request timeout
    pub timeout_seconds: u64,

    /// Evaluate fixed fallback samples when the weather API fails
    pub use_fallback: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForagingSettings {
    /// Trailing window length in days, today included
    pub window_days: u32,
}

impl ForagingSettings {
    /// Open-Meteo serves at most 92 past days plus today
    pub const MAX_WINDOW_DAYS: u32 = 93;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 {
            return Err(ConfigError::Message(
                "foraging.window_days must be at least 1".to_string(),
            ));
        }
        if self.window_days > Self::MAX_WINDOW_DAYS {
            return Err(ConfigError::Message(format!(
                "foraging.window_days must be at most {}",
                Self::MAX_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MYCO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.access_token_expiry", 3600)?
            .set_default("jwt.refresh_token_expiry", 604800)?
            .set_default("cors.allowed_origins", "*")?
            .set_default("weather.api_endpoint", "https://api.open-meteo.com")?
            .set_default("weather.timeout_seconds", 10)?
            .set_default("weather.use_fallback", true)?
            .set_default(
                "foraging.window_days",
                shared::foraging::DEFAULT_WINDOW_DAYS as i64,
            )?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MYCO_ prefix)
            .add_source(
                Environment::with_prefix("MYCO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.foraging.validate()?;
        if self.is_production() && self.jwt.secret.len() < 32 {
            return Err(ConfigError::Message(
                "jwt.secret must be at least 32 bytes in production".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_wildcard() {
        let cors = CorsConfig {
            allowed_origins: "*".to_string(),
        };
        assert_eq!(cors.origins(), None);
    }

    #[test]
    fn test_window_days_bounds() {
        let window = |window_days| ForagingSettings { window_days }.validate();
        assert!(window(0).is_err());
        assert!(window(1).is_ok());
        assert!(window(7).is_ok());
        assert!(window(ForagingSettings::MAX_WINDOW_DAYS).is_ok());
        assert!(window(ForagingSettings::MAX_WINDOW_DAYS + 1).is_err());
    }

    #[test]
    fn test_cors_list() {
        let cors = CorsConfig {
            allowed_origins: "https://app.example.org, http://localhost:5173,".to_string(),
        };
        assert_eq!(
            cors.origins(),
            Some(vec![
                "https://app.example.org".to_string(),
                "http://localhost:5173".to_string(),
            ])
        );
    }
}
