//! Shared setup for repository tests.

use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};

/// A migrated database in a temp directory plus its writer.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub(crate) fn setup_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    (pool, writer, temp_dir)
}
