//! PostgreSQL connection pool for the name catalog

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

/// Database setup errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

/// Default maximum connections in the pool.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Default minimum connections in the pool.
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;

/// Default acquire timeout in seconds.
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_DB_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: Some(600),
            max_lifetime_secs: Some(1800),
        }
    }

    /// Read `DATABASE_URL` and the optional `DB_*` pool settings
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DbError::Config("DATABASE_URL not set".to_string()))?;

        let mut config = Self::new(url);

        if let Some(max) = env_parse("DB_MAX_CONNECTIONS") {
            config.max_connections = max;
        }
        if let Some(min) = env_parse("DB_MIN_CONNECTIONS") {
            config.min_connections = min;
        }
        if let Some(timeout) = env_parse("DB_CONNECT_TIMEOUT") {
            config.connect_timeout_secs = timeout;
        }
        if let Some(idle) = env_parse("DB_IDLE_TIMEOUT") {
            config.idle_timeout_secs = Some(idle);
        }
        if let Some(lifetime) = env_parse("DB_MAX_LIFETIME") {
            config.max_lifetime_secs = Some(lifetime);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DbResult<()> {
        if self.url.is_empty() {
            return Err(DbError::Config("Database URL cannot be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(DbError::Config("max_connections must be greater than 0".to_string()));
        }
        if self.min_connections > self.max_connections {
            return Err(DbError::Config(format!(
                "min_connections ({}) cannot be greater than max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

pub async fn create_pool(config: &DbConfig) -> DbResult<PgPool> {
    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    if let Some(idle_timeout) = config.idle_timeout_secs {
        options = options.idle_timeout(Duration::from_secs(idle_timeout));
    }

    if let Some(max_lifetime) = config.max_lifetime_secs {
        options = options.max_lifetime(Duration::from_secs(max_lifetime));
    }

    let pool = options.connect(&config.url).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Catalog connection pool created"
    );

    Ok(pool)
}

/// Apply the bundled `names` table migrations
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
