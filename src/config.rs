use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub github: GithubConfig,
    pub seal: SealConfig,
}

/// GitHub App credentials and API location
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Numeric App identifier, used as the `iss` claim of the app assertion
    pub app_id: u64,
    /// Path to the PEM-encoded App private key, read once at startup
    pub private_key_path: String,
    /// Base URL of the platform REST API (overridable for tests)
    pub api_base: String,
}

/// Certificate service that receives the final verdict
#[derive(Debug, Clone)]
pub struct SealConfig {
    pub endpoint_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            github: GithubConfig::from_env()?,
            seal: SealConfig::from_env()?,
        })
    }
}

impl GithubConfig {
    /// Load GitHub App configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_id = env::var("GITHUB_APP_ID")
            .map_err(|_| ConfigError::MissingAppId)?
            .parse()
            .map_err(|_| ConfigError::InvalidAppId)?;

        let api_base = env::var("GITHUB_API_BASE")
            .unwrap_or_else(|_| "https://api.github.com".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            app_id,
            private_key_path: env::var("GITHUB_PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "./private-key.pem".to_string()),
            api_base,
        })
    }
}

impl SealConfig {
    /// Load seal endpoint configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint_url = env::var("SEAL_ENDPOINT_URL").map_err(|_| ConfigError::MissingSealEndpoint)?;

        // Catch obviously broken endpoints at startup instead of on the
        // first webhook delivery
        let parsed = url::Url::parse(&endpoint_url).map_err(|_| ConfigError::InvalidSealEndpoint)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidSealEndpoint);
        }

        Ok(Self { endpoint_url })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    MissingAppId,
    InvalidAppId,
    MissingSealEndpoint,
    InvalidSealEndpoint,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::MissingAppId => {
                write!(f, "GITHUB_APP_ID environment variable is required")
            }
            ConfigError::InvalidAppId => write!(f, "GITHUB_APP_ID must be a numeric App identifier"),
            ConfigError::MissingSealEndpoint => {
                write!(f, "SEAL_ENDPOINT_URL environment variable is required")
            }
            ConfigError::InvalidSealEndpoint => {
                write!(f, "SEAL_ENDPOINT_URL must be a valid http(s) URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
