//! # Catalog State
//!
//! Holds the catalog every read command queries.
//!
//! ```text
//! startup ─────► load_catalog() ─► CatalogState { v1, Arc<Catalog> }
//!                                         │
//!   list_properties ─── snapshot() ───────┤  (cheap Arc clone, no DB)
//!                                         │
//! admin add/delete ──► reload(db) ────────► CatalogState { v2, Arc<Catalog> }
//! ```
//!
//! Readers keep the snapshot they took even if a reload lands meanwhile.
//! The version lets dependants (the listing memo) notice the swap.
//!
//! Reloads run one at a time, load and swap together, so a slow load can
//! never replace the rows of a later one.

use std::sync::{Arc, Mutex};

use tracing::info;

use dwellnest_core::Catalog;
use dwellnest_db::{Database, DbResult};

/// One catalog generation.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Increases by one on every replace.
    pub version: u64,
    pub catalog: Arc<Catalog>,
}

/// The current catalog snapshot.
#[derive(Debug, Clone)]
pub struct CatalogState {
    current: Arc<Mutex<CatalogSnapshot>>,
    reload_lock: Arc<tokio::sync::Mutex<()>>,
}

impl CatalogState {
    /// Wraps the initial catalog as version 1.
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            current: Arc::new(Mutex::new(CatalogSnapshot {
                version: 1,
                catalog: Arc::new(catalog),
            })),
            reload_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current.lock().expect("Catalog mutex poisoned").clone()
    }

    pub fn version(&self) -> u64 {
        self.current.lock().expect("Catalog mutex poisoned").version
    }

    /// Swaps in a new catalog and returns its version.
    pub fn replace(&self, catalog: Catalog) -> u64 {
        let mut current = self.current.lock().expect("Catalog mutex poisoned");
        current.version += 1;
        current.catalog = Arc::new(catalog);
        current.version
    }

    /// Reloads the catalog from the database and swaps it in.
    ///
    /// Holds the reload lock across load and swap. The snapshot mutex is
    /// only taken for the swap, so readers are never blocked by the load.
    pub async fn reload(&self, db: &Database) -> DbResult<u64> {
        let _reloading = self.reload_lock.lock().await;

        let catalog = db.properties().load_catalog().await?;
        let count = catalog.len();
        let version = self.replace(catalog);
        info!(version, count, "Catalog reloaded");
        Ok(version)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dwellnest_db::DbConfig;

    #[test]
    fn test_replace_bumps_version() {
        let state = CatalogState::new(Catalog::sample().unwrap());
        assert_eq!(state.version(), 1);

        let before = state.snapshot();
        assert_eq!(state.replace(Catalog::empty()), 2);

        // Old snapshot stays intact
        assert_eq!(before.catalog.len(), 8);
        assert_eq!(state.snapshot().catalog.len(), 0);
        assert_eq!(state.snapshot().version, 2);
    }

    #[tokio::test]
    async fn test_reload_from_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.properties().insert_catalog(&Catalog::sample().unwrap()).await.unwrap();

        let state = CatalogState::default();
        assert!(state.snapshot().catalog.is_empty());

        let version = state.reload(&db).await.unwrap();
        assert_eq!(version, 2);
        assert_eq!(state.snapshot().catalog.len(), 8);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reloads_end_on_latest_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.properties().insert_catalog(&Catalog::sample().unwrap()).await.unwrap();
        let state = CatalogState::default();

        let tasks: Vec<_> = (1..=8)
            .map(|id| {
                let (db, state) = (db.clone(), state.clone());
                tokio::spawn(async move {
                    db.properties().delete(id).await.unwrap();
                    state.reload(&db).await.unwrap()
                })
            })
            .collect();

        let mut versions = Vec::new();
        for task in tasks {
            versions.push(task.await.unwrap());
        }
        versions.sort_unstable();

        // Every reload got its own version and the last one saw every delete
        assert_eq!(versions, (2..=9).collect::<Vec<u64>>());
        assert!(state.snapshot().catalog.is_empty());
        assert_eq!(state.version(), 9);
    }
}
