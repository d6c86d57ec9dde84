//! Shared connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async`'s `bb8` pool behind a handle that can be closed
//! explicitly during shutdown. Every clone of a [`DbPool`] sees the same
//! open/closed state, so closing it through one repository closes it for all.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be checked out.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be built or the database could not be reached.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// The pool was shut down.
    #[error("connection pool is closed")]
    Closed,
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Settings for [`DbPool::connect`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for `database_url` with ten connections and a
    /// thirty-second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Closable async connection pool for PostgreSQL.
#[derive(Clone)]
pub struct DbPool {
    inner: Arc<RwLock<Option<Pool<AsyncPgConnection>>>>,
}

impl DbPool {
    /// Build the pool and check out one connection to prove the database is
    /// reachable.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is invalid or no connection
    /// can be established.
    pub async fn connect(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        drop(
            pool.get()
                .await
                .map_err(|err| PoolError::build(err.to_string()))?,
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(Some(pool))),
        })
    }

    /// A handle that is already closed. Every checkout fails with
    /// [`PoolError::Closed`].
    pub fn closed() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Closed`] after [`DbPool::shutdown`] and
    /// [`PoolError::Checkout`] when the checkout times out or fails.
    pub async fn get(&self) -> Result<PooledConnection<'static, AsyncPgConnection>, PoolError> {
        let pool = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PoolError::Closed)?;
        pool.get_owned()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Whether the pool is still open.
    pub fn is_open(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Close the pool. Idle connections are dropped now; connections checked
    /// out elsewhere close when returned. Calling this again is a no-op.
    pub fn shutdown(&self) {
        let previous = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("db closed");
        }
    }
}
