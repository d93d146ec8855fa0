//! Configuration management

use anyhow::Context;

use crate::db::DbConfig;
use crate::resolve::{ResolveOptions, DEFAULT_MAX_BATCH_SIZE};

// ============================================================================
// Resolver Configuration Constants
// ============================================================================

/// Environment variable holding the batch bound.
pub const MAX_BATCH_SIZE_ENV: &str = "TAXA_MAX_BATCH_SIZE";

/// Environment variable holding the catalog database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Bound on catalog batches and on resolved sets
    pub max_batch_size: usize,
    /// Present when `DATABASE_URL` is set
    pub database: Option<DbConfig>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            database: None,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from `.env`, the environment, and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let max_batch_size = match std::env::var(MAX_BATCH_SIZE_ENV) {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} must be a positive integer, got '{}'", MAX_BATCH_SIZE_ENV, raw)
                })?,
            Err(_) => DEFAULT_MAX_BATCH_SIZE,
        };

        let database = if std::env::var(DATABASE_URL_ENV).is_ok() {
            Some(DbConfig::from_env().context("Invalid catalog database configuration")?)
        } else {
            None
        };

        let config = ResolverConfig {
            max_batch_size,
            database,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_batch_size == 0 {
            anyhow::bail!("{} must be greater than 0", MAX_BATCH_SIZE_ENV);
        }

        if let Some(database) = &self.database {
            database.validate()?;
        }

        Ok(())
    }

    /// Options with every flag off and the configured batch bound
    pub fn default_options(&self) -> ResolveOptions {
        ResolveOptions::default().max_batch_size(self.max_batch_size)
    }
}
