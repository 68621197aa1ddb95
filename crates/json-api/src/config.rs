//! Server configuration module

use clap::Parser;

/// Bazaar JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bazaar-json", about = "Bazaar JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8680")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Credential verifier address
    #[arg(long, env = "VERIFIER_ADDR")]
    pub verifier_addr: String,

    /// Credential verifier API key
    #[arg(long, env = "VERIFIER_API_KEY", hide_env_values = true)]
    pub verifier_api_key: String,

    /// Media host address
    #[arg(long, env = "MEDIA_ADDR")]
    pub media_addr: String,

    /// Media host API key
    #[arg(long, env = "MEDIA_API_KEY", hide_env_values = true)]
    pub media_api_key: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
