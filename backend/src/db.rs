//! Database access for the Supermarket Inventory backend
//!
//! `Database` wraps a PostgreSQL pool. Each call checks a connection out for
//! its own duration, so a failure in one request never affects the next.
//! Rows are decoded by column name through `sqlx::FromRow`.

use std::time::Duration;

use chrono::NaiveDate;
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgRow},
    query::QueryAs,
    Executor, FromRow, PgPool, Postgres,
};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// A value bound to a `$n` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Date(NaiveDate),
    Text(String),
    /// Bound as SQL NULL when `None`
    OptionalText(Option<String>),
}

/// Handle to the connection pool; cheap to clone
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool and verify connectivity
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let db = Self::connect_lazy(config)?;
        sqlx::query("SELECT 1").execute(&db.pool).await?;
        Ok(db)
    }

    /// Build the pool without opening a connection; the first query connects
    pub fn connect_lazy(config: &DatabaseConfig) -> AppResult<Self> {
        if config.min_connections > config.max_connections {
            return Err(AppError::Configuration(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                config.min_connections, config.max_connections
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns false when the database cannot be reached
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Run an insert, update, delete or DDL statement in its own transaction.
    ///
    /// On failure the transaction is rolled back and the error is returned;
    /// the connection goes back to the pool in a clean state. Returns the
    /// number of affected rows.
    pub async fn execute_statement(&self, statement: &str) -> AppResult<u64> {
        let result = self.run_in_transaction(statement).await;

        if let Err(err) = &result {
            tracing::warn!("Statement failed and was rolled back: {}", err);
        }

        result
    }

    async fn run_in_transaction(&self, statement: &str) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        match (&mut *tx).execute(statement).await {
            Ok(done) => {
                tx.commit().await?;
                Ok(done.rows_affected())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(err.into())
            }
        }
    }

    /// Run a parameterized read returning every matching row
    pub async fn select_all<T>(&self, query: &str, params: &[SqlParam]) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = bind_params(sqlx::query_as::<_, T>(query), params)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), "select_all");
        Ok(rows)
    }

    /// Run a parameterized read returning at most one row
    pub async fn select_one<T>(&self, query: &str, params: &[SqlParam]) -> AppResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let row = bind_params(sqlx::query_as::<_, T>(query), params)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(found = row.is_some(), "select_one");
        Ok(row)
    }
}

fn bind_params<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Date(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.as_str()),
            SqlParam::OptionalText(value) => query.bind(value.as_deref()),
        };
    }
    query
}
