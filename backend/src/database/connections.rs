//! Queries on the `connection` table. Names are unique; collections refer
//! to a connection by name.

use super::{assign_uuid, uuid_column, StoreError};
use common::model::connection::Connection;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const COLUMNS: &str = "uuid, name, host, port, role, password, database_name";

fn from_row(row: &Row) -> rusqlite::Result<Connection> {
    Ok(Connection {
        uuid: uuid_column(row, 0)?,
        name: row.get(1)?,
        host: row.get(2)?,
        port: row.get(3)?,
        role: row.get(4)?,
        password: row.get(5)?,
        database_name: row.get(6)?,
    })
}

pub fn list(conn: &rusqlite::Connection) -> Result<Vec<Connection>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM connection ORDER BY name"))?;
    let connections = stmt
        .query_map([], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(connections)
}

pub fn get(conn: &rusqlite::Connection, uuid: Uuid) -> Result<Connection, StoreError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM connection WHERE uuid = ?1"),
        params![uuid.to_string()],
        from_row,
    )
        .optional()?
        .ok_or_else(|| StoreError::NotFound(format!("connection {uuid}")))
}

pub fn exists_by_name(conn: &rusqlite::Connection, name: &str) -> Result<bool, StoreError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM connection WHERE name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Stores a new connection and returns it with its assigned uuid.
pub fn create(conn: &rusqlite::Connection, mut connection: Connection) -> Result<Connection, StoreError> {
    if connection.name.trim().is_empty() {
        return Err(StoreError::Empty);
    }
    connection.uuid = assign_uuid(connection.uuid);

    conn.execute(
        &format!("INSERT INTO connection ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            connection.uuid.to_string(),
            &connection.name,
            &connection.host,
            connection.port,
            &connection.role,
            &connection.password,
            &connection.database_name
        ],
    )?;
    Ok(connection)
}

/// Deletes a connection together with every collection read from it.
/// Deletes a connection; the foreign key on `collection` removes the
/// collections read from it.
pub fn delete(conn: &rusqlite::Connection, uuid: Uuid) -> Result<(), StoreError> {
    let removed = conn.execute(
        "DELETE FROM connection WHERE uuid = ?1",
        params![uuid.to_string()],
    )?;
    if removed == 0 {
        return Err(StoreError::NotFound(format!("connection {uuid}")));
    }
    Ok(())
}
