use sqlx::{SqlitePool, migrate::Migrator};

use crate::cache::CacheService;

/// Compile-time discovered SQLx migrations for the `kestrel-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    cache: CacheService,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            cache: CacheService::disabled("kestrel:prod"),
        }
    }

    /// Create a database handle from an existing pool and cache service.
    pub fn with_cache(pool: SqlitePool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Expose the cache service for query modules.
    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
