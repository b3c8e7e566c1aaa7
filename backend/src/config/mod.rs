//! Application configuration management

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Deployment environment. Drives cookie security flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Qa,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Qa => "qa",
            Environment::Production => "production",
        }
    }

    /// `qa` and `production` share the hardened cookie policy.
    pub fn is_deployed(&self) -> bool {
        !matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "qa" => Ok(Environment::Qa),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("Unknown ENVIRONMENT '{}'", other),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (for generating URLs)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// SQLite connection URL
    pub database_url: String,

    /// Maximum pool size
    pub database_max_connections: u32,

    /// Deployment environment
    pub environment: Environment,

    /// Shared-subdomain cookie domain (e.g. `.ecomarket.app`), used outside development
    pub cookie_domain: Option<String>,

    /// Secret for access tokens
    pub access_token_secret: String,

    /// Secret for refresh tokens
    pub refresh_token_secret: String,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,

    /// Bcrypt cost factor
    pub bcrypt_cost: u32,

    /// Bootstrap admin, created at startup when no admin exists
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the first admin account
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

pub const DEFAULT_ACCESS_TOKEN_LIFETIME: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_LIFETIME: i64 = 7 * 24 * 60 * 60;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = match env::var("ENVIRONMENT") {
            Ok(v) => v.parse()?,
            Err(_) => Environment::default(),
        };

        let database_url = env::var("DATABASE_PATH")
            .map(|p| format!("sqlite://{}?mode=rwc", p))
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "sqlite://./data/ecomarket.db?mode=rwc".to_string());

        let cookie_domain = env::var("COOKIE_DOMAIN").ok().filter(|d| !d.trim().is_empty());
        if environment.is_deployed() && cookie_domain.is_none() {
            bail!("COOKIE_DOMAIN is required when ENVIRONMENT={}", environment);
        }

        let access_token_secret = secret_from_env("ACCESS_TOKEN_SECRET", environment)?;
        let refresh_token_secret = secret_from_env("REFRESH_TOKEN_SECRET", environment)?;
        if access_token_secret == refresh_token_secret {
            bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ");
        }

        let bootstrap_admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(BootstrapAdmin {
                email,
                password,
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            host: env::var("HOST").ok(),

            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            environment,
            cookie_domain,
            access_token_secret,
            refresh_token_secret,

            access_token_lifetime: env::var("ACCESS_TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME),

            refresh_token_lifetime: env::var("REFRESH_TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TOKEN_LIFETIME),

            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),

            bootstrap_admin,
        })
    }
}

/// Read a signing secret. Development falls back to a random per-process secret.
fn secret_from_env(key: &str, environment: Environment) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ if environment.is_deployed() => bail!("{} is required when ENVIRONMENT={}", key, environment),
        _ => {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(32)
                .map(char::from)
                .collect();
            Ok(format!("dev-secret-{}", suffix))
        }
    }
}
