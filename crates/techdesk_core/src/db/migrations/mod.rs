//! Schema migrations for the key-value table.
//!
//! # Invariants
//! - Steps are listed in strictly increasing version order.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step: target version plus the SQL batch that reaches it.
type Step = (u32, &'static str);

const STEPS: &[Step] = &[(1, include_str!("0001_init.sql"))];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings the connection's schema up to [`latest_version`] in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_version();

    if found > latest {
        return Err(DbError::SchemaTooNew {
            found,
            supported: latest,
        });
    }

    let pending: Vec<&Step> = STEPS.iter().filter(|(version, _)| *version > found).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        info!("event=db_migrate module=db status=ok version={version}");
    }
    tx.commit()?;

    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
