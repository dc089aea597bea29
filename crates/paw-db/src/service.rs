//! Service layer owning the database handle and the moderation policy.
//!
//! `PawService` wraps `PawDb` (raw database access). Repository methods are
//! implemented as `impl PawService` blocks in `repos/`, and the
//! `RecordStore` trait impl lives in `store.rs`.

use paw_core::policy::ModerationPolicy;

use crate::PawDb;
use crate::error::DatabaseError;

/// System of record for committed points.
pub struct PawService {
    db: PawDb,
    policy: ModerationPolicy,
}

impl PawService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `policy` - Decides the initial status of inserted points.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, policy: ModerationPolicy) -> Result<Self, DatabaseError> {
        let db = PawDb::open_local(db_path).await?;
        Ok(Self { db, policy })
    }

    /// Create from an existing `PawDb` (for testing).
    #[must_use]
    pub const fn from_db(db: PawDb, policy: ModerationPolicy) -> Self {
        Self { db, policy }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PawDb {
        &self.db
    }

    /// The moderation policy applied on insert.
    #[must_use]
    pub const fn moderation_policy(&self) -> ModerationPolicy {
        self.policy
    }
}
