//! Queries on the `general_option` table, keyed by option name.

use super::StoreError;
use common::model::general_option::GeneralOption;
use rusqlite::params;

pub fn list(conn: &rusqlite::Connection) -> Result<Vec<GeneralOption>, StoreError> {
    let mut stmt = conn.prepare("SELECT key, value FROM general_option ORDER BY key")?;
    let options = stmt
        .query_map([], |row| {
            Ok(GeneralOption {
                key: row.get(0)?,
                value: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(options)
}

/// Inserts or replaces every given option in one transaction.
/// Writes every option in one transaction, replacing the value of existing keys.
///
/// # Returns
/// - `Err(StoreError::Empty)` for an empty slice; nothing is written.
pub fn upsert(conn: &mut rusqlite::Connection, options: &[GeneralOption]) -> Result<(), StoreError> {
    if options.is_empty() {
        return Err(StoreError::Empty);
    }

    let tx = conn.transaction()?;
    for option in options {
        tx.execute(
            "INSERT OR REPLACE INTO general_option (key, value) VALUES (?1, ?2)",
            params![&option.key, &option.value],
        )?;
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support;

    #[test]
    fn upsert_replaces_existing_values() {
        let (_dir, db) = test_support::database();
        let mut conn = db.open().unwrap();

        upsert(&mut conn, &[GeneralOption::new("service_title", "Rivers API")]).unwrap();

        let options = list(&conn).unwrap();
        assert_eq!(options.len(), 2);
        assert!(options.contains(&GeneralOption::new("service_title", "Rivers API")));
    }

    #[test]
    fn empty_update_is_rejected() {
        let (_dir, db) = test_support::database();
        let mut conn = db.open().unwrap();

        assert!(matches!(upsert(&mut conn, &[]), Err(StoreError::Empty)));
    }
}
