//! Engine dependencies shared by all domain actions.
//!
//! The engine holds no application-level mutable state; every operation runs
//! against the pool in its own request-scoped transaction.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Dependency container handed to every action.
#[derive(Clone)]
pub struct EngineDeps {
    pub db_pool: PgPool,
}

impl EngineDeps {
    /// Create new EngineDeps with the given pool
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Connect a pool from config and wrap it.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_db_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self { db_pool })
    }
}
