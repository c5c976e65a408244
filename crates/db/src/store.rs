//! The persistence collaborator used by the API layer.
//!
//! Handlers depend on [`BrokenCarStore`] rather than on the repository
//! directly, so the HTTP surface can be exercised without a database.

use async_trait::async_trait;
use scrapyard_core::broken_car::{BrokenCarChanges, BrokenCarQuery, NewBrokenCar};
use scrapyard_core::types::DbId;

use crate::models::broken_car::BrokenCar;
use crate::repositories::BrokenCarRepo;
use crate::DbPool;

/// Single-operation data access for broken cars. No retries at this layer.
#[async_trait]
pub trait BrokenCarStore: Send + Sync {
    /// Rows matching a validated list plan.
    async fn list(&self, query: &BrokenCarQuery) -> Result<Vec<BrokenCar>, sqlx::Error>;

    /// Insert a record and return its new identifier.
    async fn create(&self, input: &NewBrokenCar) -> Result<DbId, sqlx::Error>;

    /// Apply a change set. `None` if the record does not exist.
    async fn update(&self, changes: &BrokenCarChanges) -> Result<Option<BrokenCar>, sqlx::Error>;

    /// Remove a record. `false` if the record does not exist.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// [`BrokenCarStore`] backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgBrokenCarStore {
    pool: DbPool,
}

impl PgBrokenCarStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrokenCarStore for PgBrokenCarStore {
    async fn list(&self, query: &BrokenCarQuery) -> Result<Vec<BrokenCar>, sqlx::Error> {
        BrokenCarRepo::list(&self.pool, query).await
    }

    async fn create(&self, input: &NewBrokenCar) -> Result<DbId, sqlx::Error> {
        BrokenCarRepo::create(&self.pool, input).await
    }

    async fn update(&self, changes: &BrokenCarChanges) -> Result<Option<BrokenCar>, sqlx::Error> {
        BrokenCarRepo::update(&self.pool, changes).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        BrokenCarRepo::delete(&self.pool, id).await
    }
}
