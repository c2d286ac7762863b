//! Database module providing connection management and queries.

pub mod api_keys;
pub mod messages;
pub mod users;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Handle to the SeaORM connection pool.
///
/// Constructed once at startup and injected into handlers through
/// `web::Data`; tests build their own isolated instances with
/// [`DbPool::from_connection`].
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database named by the configuration.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.database_max_connections)
            .sqlx_logging(false);

        let conn = Database::connect(options).await.map_err(AppError::from)?;
        Ok(Self { conn })
    }

    /// Wrap an already established connection. This is the seam test
    /// harnesses use to supply an in-memory store.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Access the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
