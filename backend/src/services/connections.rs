//! # Connection Service
//!
//! Endpoints for the PostgreSQL connections collections are read from.
//!
//! ## Workflow
//!
//! 1.  **Create**: the dashboard posts a `Connection`. It gets a uuid if it has
//!     none and is stored in the `connection` table, whose `name` is unique.
//! 2.  **Read**: connections are listed or fetched by uuid, including the
//!     password as it was entered.
//! 3.  **Delete**: removing a connection cascades to every collection whose
//!     `connection` names it, through the foreign key on `collection`.

use super::{error_response, with_connection};
use crate::database::{connections, Database};
use actix_web::web::{self, delete, get, post, resource, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::connection::Connection;
use log::{debug, info};
use uuid::Uuid;

/// Configures the `/connections` routes:
///
/// * `GET /` lists every stored connection.
/// * `POST /` stores a new connection and returns it with its uuid.
/// * `GET /{uuid}` returns one connection.
/// * `DELETE /{uuid}` removes a connection and every collection read from it.
pub fn configure_routes() -> Scope {
    scope("/connections")
        .service(resource("").route(get().to(list)).route(post().to(create)))
        .service(resource("/{uuid}").route(get().to(fetch)).route(delete().to(remove)))
}

/// Handler for `GET /connections`.
///
/// # Returns
/// - `200 OK` with every stored `Connection` as a JSON array.
/// - `500 Internal Server Error` if the database cannot be read.
async fn list(db: web::Data<Database>) -> impl Responder {
    match with_connection(&db, |conn| connections::list(conn)) {
        Ok(connections) => HttpResponse::Ok().json(connections),
        Err(e) => error_response(&e),
    }
}

/// Handler for `POST /connections`.
///
/// # Arguments
/// * `payload` - The connection to store. A nil or missing uuid is replaced by a fresh one.
///
/// # Returns
/// - `201 Created` with the stored connection.
/// - `400 Bad Request` when the name is blank.
/// - `409 Conflict` when another connection already uses the name.
async fn create(db: web::Data<Database>, payload: web::Json<Connection>) -> impl Responder {
    debug!("Creating connection {}@{}:{}", payload.name, payload.host, payload.port);
    match with_connection(&db, |conn| connections::create(conn, payload.into_inner())) {
        Ok(connection) => {
            info!("Connection {} stored as {}", connection.name, connection.uuid);
            HttpResponse::Created().json(connection)
        }
        Err(e) => error_response(&e),
    }
}

/// Handler for `GET /connections/{uuid}`.
///
/// # Returns
/// - `200 OK` with the connection.
/// - `404 Not Found` when no connection has this uuid.
async fn fetch(db: web::Data<Database>, uuid: web::Path<Uuid>) -> impl Responder {
    match with_connection(&db, |conn| connections::get(conn, *uuid)) {
        Ok(connection) => HttpResponse::Ok().json(connection),
        Err(e) => error_response(&e),
    }
}

/// Handler for `DELETE /connections/{uuid}`. Collections read from the
/// connection are deleted with it.
///
/// # Returns
/// - `204 No Content` on success.
/// - `404 Not Found` when no connection has this uuid.
async fn remove(db: web::Data<Database>, uuid: web::Path<Uuid>) -> impl Responder {
    match with_connection(&db, |conn| connections::delete(conn, *uuid)) {
        Ok(()) => {
            info!("Connection {} deleted", uuid);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}
