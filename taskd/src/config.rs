//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The file path defaults to `config.yaml` but can be specified
//! via the `-f` flag or the `TASKD_CONFIG` environment variable.
//!
//! ## Loading Priority
//!
//! Sources are merged in order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `TASKD_`
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested values, use double underscores in environment variables, e.g.
//! `TASKD_AUTH__TOKEN_TTL=15m` sets `auth.token_ttl`.
//!
//! The signing secret (`secret_key`) is required: the service refuses to
//! start without one. Rotating it invalidates every previously issued token.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simple CLI args - just for specifying the config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "TASKD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Secret key for signing access tokens (required to start)
    pub secret_key: Option<String>,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Todo visibility configuration
    pub todos: TodosConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database: DatabaseConfig::default(),
            secret_key: None,
            auth: AuthConfig::default(),
            todos: TodosConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection URL; the file is created if missing
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://taskd.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Lifetime of issued access tokens (humantime format, e.g. "30m")
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
    /// Password length bounds enforced at registration
    pub password: PasswordConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(30 * 60),
            password: PasswordConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TodosConfig {
    /// When true (the default), list and get only return the caller's own
    /// todos and a foreign todo is indistinguishable from a missing one.
    /// When false, reads span all owners; writes stay owner-scoped either
    /// way.
    pub scope_reads: bool,
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self { scope_reads: true }
    }
}

impl Config {
    /// Load configuration from the YAML file and environment overrides.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("TASKD_").split("__"));

        // DATABASE_URL is conventional enough to honor without a prefix
        if let Ok(url) = std::env::var("DATABASE_URL") {
            figment = figment.merge(("database.url", url));
        }

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.secret_key.as_deref().unwrap_or_default().is_empty() {
            anyhow::bail!("secret_key is required (set it in the config file or via TASKD_SECRET_KEY)");
        }
        if self.auth.password.min_length > self.auth.password.max_length {
            anyhow::bail!(
                "auth.password.min_length ({}) exceeds max_length ({})",
                self.auth.password.min_length,
                self.auth.password.max_length
            );
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
