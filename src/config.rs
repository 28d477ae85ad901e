use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::repository::DecodePolicy;

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_HTTP_HOST: &str = "localhost";
const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("environment variable `{0}` must be set")]
    MissingVar(&'static str),

    #[error("environment variable `{name}` has an invalid value: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// libpq key/value connection string.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            quote(&self.host),
            self.port,
            quote(&self.user),
            quote(&self.password),
            quote(&self.name)
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

// Single-quoted libpq value with `'` and `\` escaped.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Settings read once at startup and handed to the components that need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub decode_policy: DecodePolicy,
}

impl Config {
    /// Loads `path` into the process environment, then reads the settings
    /// from it. Variables already set in the environment take precedence.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_filename(path)?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let database = DatabaseConfig {
            host: required("DB_HOST")?,
            port: parse("DB_PORT", &required("DB_PORT")?)?,
            user: required("DB_USER")?,
            password: required("DB_PASS")?,
            name: required("DB_NAME")?,
            pool_size: match lookup("DB_POOL_SIZE") {
                Some(raw) => parse_pool_size(&raw)?,
                None => DEFAULT_POOL_SIZE,
            },
        };

        let mut server = ServerConfig::default();
        if let Some(host) = lookup("HTTP_HOST") {
            server.host = host;
        }
        if let Some(raw) = lookup("HTTP_PORT") {
            server.port = parse("HTTP_PORT", &raw)?;
        }

        let decode_policy = match lookup("TODO_ROW_DECODE") {
            Some(raw) => raw.parse::<DecodePolicy>().map_err(|reason| ConfigError::InvalidVar {
                name: "TODO_ROW_DECODE",
                reason,
            })?,
            None => DecodePolicy::default(),
        };

        Ok(Config {
            database,
            server,
            decode_policy,
        })
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidVar {
        name,
        reason: err.to_string(),
    })
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    match parse::<u32>("DB_POOL_SIZE", raw)? {
        0 => Err(ConfigError::InvalidVar {
            name: "DB_POOL_SIZE",
            reason: "pool size must be at least 1".to_string(),
        }),
        size => Ok(size),
    }
}
