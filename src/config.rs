use std::env;

/// Which row store backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
    Google,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            "google" => Ok(StoreBackend::Google),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleSheetsConfig {
    pub spreadsheet_id: String,
    pub access_token: String,
    pub api_base: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub google_sheets: Option<GoogleSheetsConfig>,
    pub admin_username: String,
    pub admin_password: String,
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_host = var("SERVER_HOST", "127.0.0.1");

        let server_port = var("SERVER_PORT", "3000")
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let store_backend: StoreBackend = var("STORE_BACKEND", "sqlite").parse()?;

        let database_url = var("DATABASE_URL", "sqlite://hotelier.db?mode=rwc");

        let google_sheets = if store_backend == StoreBackend::Google {
            Some(GoogleSheetsConfig {
                spreadsheet_id: lookup("GOOGLE_SHEETS_ID")
                    .ok_or(ConfigError::MissingVar("GOOGLE_SHEETS_ID"))?,
                access_token: lookup("GOOGLE_ACCESS_TOKEN")
                    .ok_or(ConfigError::MissingVar("GOOGLE_ACCESS_TOKEN"))?,
                api_base: lookup("GOOGLE_SHEETS_API_BASE"),
            })
        } else {
            None
        };

        let admin_username = var("ADMIN_USERNAME", "admin");
        let admin_password = var("ADMIN_PASSWORD", "admin");

        let metrics_port = match lookup("METRICS_PORT") {
            Some(port) => Some(port.parse().map_err(|_| ConfigError::InvalidPort)?),
            None => None,
        };

        Ok(Config {
            server_host,
            server_port,
            store_backend,
            database_url,
            google_sheets,
            admin_username,
            admin_password,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("Invalid store backend: {0} (expected sqlite, memory or google)")]
    InvalidBackend(String),

    #[error("Invalid port number")]
    InvalidPort,
}
