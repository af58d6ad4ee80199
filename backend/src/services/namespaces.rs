//! # Namespace Service
//!
//! Namespaces are named URLs the features API uses to qualify identifiers.
//! They have no references to other tables, so deleting one never cascades.

use super::{error_response, with_connection};
use crate::database::{namespaces, Database};
use actix_web::web::{self, delete, get, post, resource, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::namespace::Namespace;
use uuid::Uuid;

/// `GET /namespaces`, `POST /namespaces` and `DELETE /namespaces/{uuid}`.
pub fn configure_routes() -> Scope {
    scope("/namespaces")
        .service(resource("").route(get().to(list)).route(post().to(create)))
        .route("/{uuid}", delete().to(remove))
}

/// # Returns
/// - `200 OK` with every namespace as a JSON array.
async fn list(db: web::Data<Database>) -> impl Responder {
    match with_connection(&db, |conn| namespaces::list(conn)) {
        Ok(namespaces) => HttpResponse::Ok().json(namespaces),
        Err(e) => error_response(&e),
    }
}

/// # Arguments
/// * `payload` - The namespace to store; its uuid is assigned when nil.
///
/// # Returns
/// - `201 Created` with the stored namespace.
/// - `400 Bad Request` when the name is blank.
async fn create(db: web::Data<Database>, payload: web::Json<Namespace>) -> impl Responder {
    match with_connection(&db, |conn| namespaces::create(conn, payload.into_inner())) {
        Ok(namespace) => HttpResponse::Created().json(namespace),
        Err(e) => error_response(&e),
    }
}

async fn remove(db: web::Data<Database>, uuid: web::Path<Uuid>) -> impl Responder {
    match with_connection(&db, |conn| namespaces::delete(conn, *uuid)) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}
