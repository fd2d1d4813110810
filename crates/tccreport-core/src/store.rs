//! Read-only access to the TCC `access` table.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::StoreError;
use crate::models::RawRow;

const ACCESS_QUERY: &str = "SELECT service, client, auth_value, prompt_count, last_modified, \
     indirect_object_identifier FROM access";

/// Read every row of the `access` table in store order.
///
/// The connection and statement only live for this call. The store is opened
/// with `SQLITE_OPEN_READ_ONLY`, so a failed open never turns into a
/// read-write open.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| StoreError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("opened permission store {} read-only", path.display());

    let mut stmt = conn
        .prepare(ACCESS_QUERY)
        .map_err(|source| StoreError::QueryPreparation {
            path: path.to_path_buf(),
            source,
        })?;

    let query_err = |source: rusqlite::Error| StoreError::Query {
        path: path.to_path_buf(),
        source,
    };

    let rows = stmt
        .query_map([], |row| {
            Ok(RawRow {
                service: row.get(0)?,
                client: row.get(1)?,
                auth_value: row.get(2)?,
                prompt_count: row.get(3)?,
                last_modified: row.get(4)?,
                sandbox_id: row.get(5)?,
            })
        })
        .map_err(query_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(query_err)?;

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
