//! MySQL connection pool, liveness probe and embedded migrations

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};

use ouv_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Cloneable handle to the shared SQLx pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect eagerly so a bad URL or unreachable server fails at startup
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = connect_options(config)?;
        tracing::info!(max_connections = config.max_connections, "Connecting to MySQL");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "MySQL connection failed");
                InfrastructureError::Database(e)
            })?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// `SELECT 1` round trip; failures are logged and reported as `false`
    pub async fn ping(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool).await {
            Ok(value) => value == 1,
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                false
            }
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            open: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Apply pending migrations from `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        tracing::info!("Closing database pool");
        self.pool.close().await;
    }
}

/// Statements are logged at debug, slow ones at warn
fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, InfrastructureError> {
    let options = MySqlConnectOptions::from_str(&config.url)
        .map_err(|e| InfrastructureError::Config(format!("invalid database url: {}", e)))?;

    Ok(options.log_statements(LevelFilter::Debug).log_slow_statements(
        LevelFilter::Warn,
        Duration::from_millis(config.slow_query_threshold),
    ))
}

/// Snapshot of pool occupancy, logged at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub open: u32,
    pub idle: usize,
    pub max: u32,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool {}/{} open, {} idle", self.open, self.max, self.idle)
    }
}
