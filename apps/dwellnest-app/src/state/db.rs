//! # Database State
//!
//! Shares the connection pool between commands.

use dwellnest_db::Database;

/// Wrapper around `Database` handed to commands that touch SQLite.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let booking = db_state.inner().bookings().get_by_id(&id).await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
