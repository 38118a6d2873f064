//! Schema versioning for the firstaid database.
//!
//! The version lives in the `metadata` table under `schema_version`. Each
//! migration step is applied in order inside its own transaction.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The schema version this build writes.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// Create missing tables and bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if a statement fails, if the stored version cannot be
/// parsed, or if the database was written by a newer build.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for next in (version + 1)..=CURRENT_VERSION {
        run_migration(conn, next)?;
    }

    Ok(())
}

/// Read the stored schema version; 0 for a fresh database.
///
/// # Errors
///
/// Returns an error if the query fails or the stored value is not a number.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match stored {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    match version {
        // Base schema comes from SCHEMA_STATEMENTS
        1 => {}
        _ => {
            return Err(Error::DatabaseMigration {
                message: format!("unknown migration version: {version}"),
            })
        }
    }
    set_schema_version(&tx, version)?;
    tx.commit()?;
    tracing::debug!(version, "Applied schema migration");
    Ok(())
}
