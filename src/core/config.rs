use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_DATABASE_URL: &str = "sqlite://bright_aid.db?mode=rwc";
const DEFAULT_GATEWAY_BASE_URL: &str = "http://localhost:8081/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
            DEFAULT_DATABASE_URL.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            max_connections,
            app_env,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Logga la configurazione (nascondendo le credenziali)
    pub fn print_info(&self) {
        info!(
            environment = %self.app_env,
            address = %self.bind_address(),
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            "Server configuration loaded"
        );
    }

    /// Maschera l'URL del database per il logging
    pub(crate) fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        // sqlite URLs carry no credentials
        if url.starts_with("sqlite:") {
            return url.to_string();
        }
        "***".to_string()
    }
}

/// Settings for [`crate::client::GatewayClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let base_url =
            env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_BASE_URL.to_string());

        let timeout_secs = env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid GATEWAY_TIMEOUT_SECS: must be a positive number".to_string())?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_url_hides_credentials() {
        assert_eq!(
            Config::mask_url("mysql://root:secret@db:3306/app"),
            "mysql://***@db:3306/app"
        );
        assert_eq!(
            Config::mask_url("sqlite://bright_aid.db?mode=rwc"),
            "sqlite://bright_aid.db?mode=rwc"
        );
        assert_eq!(Config::mask_url("garbage"), "***");
    }

    #[test]
    fn client_config_defaults_to_local_gateway() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081/api");
        assert_eq!(config.timeout, Duration::from_secs(10));

        let custom = ClientConfig::new("http://gateway:9000/api");
        assert_eq!(custom.base_url, "http://gateway:9000/api");
        assert_eq!(custom.timeout, Duration::from_secs(10));
    }
}
