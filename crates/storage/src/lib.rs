pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::StorageError;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connection handle shared across the web layer. Cheap to clone; wraps the
/// sqlx pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> error::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> error::Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}
