//! Read access to the license catalogue seeded by [`Database::init`](super::Database::init).

use super::StoreError;
use common::model::license::{License, LicenseTitle};
use rusqlite::{params, OptionalExtension};

pub fn titles(conn: &rusqlite::Connection) -> Result<Vec<LicenseTitle>, StoreError> {
    let mut stmt = conn.prepare("SELECT title FROM license ORDER BY title")?;
    let titles = stmt
        .query_map([], |row| Ok(LicenseTitle { title: row.get(0)? }))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(titles)
}

pub fn get(conn: &rusqlite::Connection, title: &str) -> Result<Option<License>, StoreError> {
    let license = conn
        .query_row(
            "SELECT title, url, type, alternative_url, alternative_type FROM license WHERE title = ?1",
            params![title],
            |row| {
                Ok(License {
                    title: row.get(0)?,
                    url: row.get(1)?,
                    media_type: row.get(2)?,
                    alternative_url: row.get(3)?,
                    alternative_type: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(license)
}
