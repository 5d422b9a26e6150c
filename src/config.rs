use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins (comma separated)
    pub cors_origins: Option<String>,

    /// Streaming platform project ID
    pub project_id: Option<String>,

    /// Bearer token for the streaming platform API
    pub platform_token: Option<String>,

    /// Base URL of the auth backend
    pub backend_endpoint: Option<String>,

    /// Per-connection outbound queue capacity before a peer
    /// is treated as a slow consumer and evicted
    #[serde(default = "default_send_queue_capacity")]
    pub send_queue_capacity: usize,

    /// Capacity of the broadcast hub's event intake
    #[serde(default = "default_hub_queue_capacity")]
    pub hub_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        // Load from environment variables using envy
        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check whether the platform relay endpoints can be served
    pub fn has_platform_credentials(&self) -> bool {
        self.project_id.is_some() && self.platform_token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            project_id: None,
            platform_token: None,
            backend_endpoint: None,
            send_queue_capacity: default_send_queue_capacity(),
            hub_queue_capacity: default_hub_queue_capacity(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3005
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_send_queue_capacity() -> usize {
    32
}

fn default_hub_queue_capacity() -> usize {
    256
}
