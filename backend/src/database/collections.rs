//! Queries on the `collection` table.
//!
//! The extent, CRS list and date/time field list are stored as JSON text in
//! the `_json` columns and decoded when a row is read. Every write first
//! checks that the referenced connection and license exist, so a bad
//! reference is reported by name instead of as a bare constraint failure.

use super::{assign_uuid, connections, licenses, uuid_column, StoreError};
use common::model::collection::{Collection, Extent};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const COLUMNS: &str = "uuid, id, title, description, connection_name, url, license_title, \
    extent_json, crs_json, storage_crs, storage_crs_coordinate_epoch, \
    date_time_fields_json, selected_date_time_field";

/// Raw row; the `_json` columns are decoded afterwards so serde errors are
/// reported as [`StoreError::Json`] instead of being squeezed into rusqlite's type.
struct CollectionRow {
    collection: Collection,
    extent_json: Option<String>,
    crs_json: String,
    date_time_fields_json: String,
}

fn from_row(row: &Row) -> rusqlite::Result<CollectionRow> {
    let mut collection = Collection::new(
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, String>(4)?,
    );
    collection.uuid = uuid_column(row, 0)?;
    collection.description = row.get(3)?;
    collection.url = row.get(5)?;
    collection.license = row.get(6)?;
    collection.storage_crs = row.get(9)?;
    collection.storage_crs_coordinate_epoch = row.get(10)?;
    collection.selected_date_time_field = row.get(12)?;

    Ok(CollectionRow {
        collection,
        extent_json: row.get(7)?,
        crs_json: row.get(8)?,
        date_time_fields_json: row.get(11)?,
    })
}

impl CollectionRow {
    fn decode(self) -> Result<Collection, StoreError> {
        let mut collection = self.collection;
        collection.extent = self
            .extent_json
            .as_deref()
            .map(|json| serde_json::from_str::<Extent>(json))
            .transpose()?;
        collection.crs = serde_json::from_str(&self.crs_json)?;
        collection.date_time_fields = serde_json::from_str(&self.date_time_fields_json)?;
        Ok(collection)
    }
}

pub fn list(conn: &rusqlite::Connection) -> Result<Vec<Collection>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM collection ORDER BY title"))?;
    let rows = stmt
        .query_map([], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(CollectionRow::decode).collect()
}

pub fn get(conn: &rusqlite::Connection, uuid: Uuid) -> Result<Collection, StoreError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM collection WHERE uuid = ?1"),
        params![uuid.to_string()],
        from_row,
    )
        .optional()?
        .ok_or_else(|| StoreError::NotFound(format!("collection {uuid}")))?
        .decode()
}

fn check_references(conn: &rusqlite::Connection, collection: &Collection) -> Result<(), StoreError> {
    if collection.id.trim().is_empty() || collection.title.trim().is_empty() {
        return Err(StoreError::Empty);
    }
    if !connections::exists_by_name(conn, &collection.connection)? {
        return Err(StoreError::UnknownReference {
            kind: "connection",
            name: collection.connection.clone(),
        });
    }
    if let Some(license) = &collection.license {
        if licenses::get(conn, license)?.is_none() {
            return Err(StoreError::UnknownReference {
                kind: "license",
                name: license.clone(),
            });
        }
    }
    Ok(())
}

fn write(conn: &rusqlite::Connection, sql: &str, collection: &Collection) -> Result<usize, StoreError> {
    let extent_json = collection
        .extent
        .as_ref()
        .map(|extent| serde_json::to_string(extent))
        .transpose()?;

    let changed = conn.execute(
        sql,
        params![
            collection.uuid.to_string(),
            &collection.id,
            &collection.title,
            &collection.description,
            &collection.connection,
            &collection.url,
            &collection.license,
            extent_json,
            serde_json::to_string(&collection.crs)?,
            &collection.storage_crs,
            collection.storage_crs_coordinate_epoch,
            serde_json::to_string(&collection.date_time_fields)?,
            &collection.selected_date_time_field
        ],
    )?;
    Ok(changed)
}

/// Stores new collections in one transaction; either all are written or none.
pub fn create(
    conn: &mut rusqlite::Connection,
    collections: Vec<Collection>,
) -> Result<Vec<Collection>, StoreError> {
    if collections.is_empty() {
        return Err(StoreError::Empty);
    }

    let tx = conn.transaction()?;
    let mut created = Vec::with_capacity(collections.len());
    for mut collection in collections {
        check_references(&tx, &collection)?;
        collection.uuid = assign_uuid(collection.uuid);
        write(
            &tx,
            &format!(
                "INSERT INTO collection ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            &collection,
        )?;
        created.push(collection);
    }
    tx.commit()?;
    Ok(created)
}

/// Replaces the stored collection with the same uuid.
/// Replaces the stored row with the same uuid.
///
/// # Returns
/// - `Err(StoreError::NotFound)` when no row has the uuid.
/// - `Err(StoreError::UnknownReference)` for an unknown connection or license.
pub fn update(conn: &rusqlite::Connection, collection: &Collection) -> Result<(), StoreError> {
    check_references(conn, collection)?;
    let changed = write(
        conn,
        "UPDATE collection SET id = ?2, title = ?3, description = ?4, connection_name = ?5,
             url = ?6, license_title = ?7, extent_json = ?8, crs_json = ?9, storage_crs = ?10,
             storage_crs_coordinate_epoch = ?11, date_time_fields_json = ?12,
             selected_date_time_field = ?13
         WHERE uuid = ?1",
        collection,
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound(format!("collection {}", collection.uuid)));
    }
    Ok(())
}

pub fn delete(conn: &rusqlite::Connection, uuid: Uuid) -> Result<(), StoreError> {
    let removed = conn.execute("DELETE FROM collection WHERE uuid = ?1", params![uuid.to_string()])?;
    if removed == 0 {
        return Err(StoreError::NotFound(format!("collection {uuid}")));
    }
    Ok(())
}
