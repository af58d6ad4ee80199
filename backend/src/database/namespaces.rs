//! Queries on the `namespace` table.

use super::{assign_uuid, uuid_column, StoreError};
use common::model::namespace::Namespace;
use rusqlite::params;
use uuid::Uuid;

pub fn list(conn: &rusqlite::Connection) -> Result<Vec<Namespace>, StoreError> {
    let mut stmt = conn.prepare("SELECT uuid, name, url FROM namespace ORDER BY name")?;
    let namespaces = stmt
        .query_map([], |row| {
            Ok(Namespace {
                uuid: uuid_column(row, 0)?,
                name: row.get(1)?,
                url: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(namespaces)
}

pub fn create(conn: &rusqlite::Connection, mut namespace: Namespace) -> Result<Namespace, StoreError> {
    if namespace.name.trim().is_empty() {
        return Err(StoreError::Empty);
    }
    namespace.uuid = assign_uuid(namespace.uuid);

    conn.execute(
        "INSERT INTO namespace (uuid, name, url) VALUES (?1, ?2, ?3)",
        params![namespace.uuid.to_string(), &namespace.name, &namespace.url],
    )?;
    Ok(namespace)
}

pub fn delete(conn: &rusqlite::Connection, uuid: Uuid) -> Result<(), StoreError> {
    let removed = conn.execute("DELETE FROM namespace WHERE uuid = ?1", params![uuid.to_string()])?;
    if removed == 0 {
        return Err(StoreError::NotFound(format!("namespace {uuid}")));
    }
    Ok(())
}
