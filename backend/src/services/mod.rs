//! # Data API
//!
//! JSON endpoints the dashboard talks to, grouped under `{base_path}data`:
//!
//! - `connections`: PostgreSQL data sources.
//! - `collections`: published collections and the license catalogue.
//! - `namespaces`: grouping labels.
//! - `options`: general service options.
//!
//! Handlers open the SQLite database from the shared [`Database`] app data and
//! turn a [`StoreError`] into a status code with [`error_response`].

pub mod collections;
pub mod connections;
pub mod namespaces;
pub mod options;

use crate::database::{Database, StoreError};
use actix_web::web::scope;
use actix_web::{HttpResponse, Scope};
use log::error;

/// Path of the data scope for a dashboard mounted at `base_path`.
pub fn data_path(base_path: &str) -> String {
    format!("{}/data", base_path.trim_end_matches('/'))
}

/// Configures and returns the Actix `Scope` holding every data endpoint.
pub fn configure_routes(base_path: &str) -> Scope {
    scope(&data_path(base_path))
        .service(connections::configure_routes())
        .service(collections::configure_routes())
        .service(namespaces::configure_routes())
        .service(options::configure_routes())
}

pub(crate) fn error_response(e: &StoreError) -> HttpResponse {
    match e {
        StoreError::Empty | StoreError::Invalid(_) => HttpResponse::BadRequest().body(e.to_string()),
        StoreError::NotFound(_) => HttpResponse::NotFound().body(e.to_string()),
        _ if e.is_conflict() => HttpResponse::Conflict().body(e.to_string()),
        _ => {
            error!("Error while processing request: {}", e);
            HttpResponse::InternalServerError().body("Internal server error")
        }
    }
}

/// Runs `op` on a fresh connection to `db`.
pub(crate) fn with_connection<T>(
    db: &Database,
    op: impl FnOnce(&mut rusqlite::Connection) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut conn = db.open()?;
    op(&mut conn)
}
