//! # Collection Service
//!
//! Endpoints for the collections published by the features API.
//!
//! ## Workflow
//!
//! 1.  **Payload**: every body is read through [`LegacyCollection`], so
//!     dashboards still sending the minimal record or the flattened extent
//!     fields (`bbox`, `interval`, ...) keep working.
//! 2.  **Migration**: the payload is converted to the current [`Collection`],
//!     with a nested extent.
//! 3.  **Checks**: the referenced connection and license must exist, otherwise
//!     the request conflicts.
//! 4.  **Response**: collections are always returned in the current shape.

use super::{error_response, with_connection};
use crate::database::{collections, licenses, Database, StoreError};
use actix_web::web::{self, delete, get, patch, post, resource, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::collection::{Collection, LegacyCollection};
use log::info;
use serde::Deserialize;
use uuid::Uuid;

/// A single collection or a batch of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionsPayload {
    Many(Vec<LegacyCollection>),
    One(Box<LegacyCollection>),
}

impl CollectionsPayload {
    fn into_collections(self) -> Vec<Collection> {
        match self {
            CollectionsPayload::Many(many) => many.into_iter().map(Collection::from).collect(),
            CollectionsPayload::One(one) => vec![Collection::from(*one)],
        }
    }
}

/// Configures the `/collections` routes:
///
/// * `GET /` lists every collection.
/// * `POST /` creates one collection, or a batch when given an array.
/// * `PATCH /` replaces the collection with the payload's uuid.
/// * `GET /licenses` lists the license titles a collection may reference.
/// * `GET /{uuid}` returns one collection with all of its details.
/// * `DELETE /{uuid}` removes a collection.
pub fn configure_routes() -> Scope {
    scope("/collections")
        .service(
            resource("")
                .route(get().to(list))
                .route(post().to(create))
                .route(patch().to(update)),
        )
        .route("/licenses", get().to(license_titles))
        .service(resource("/{uuid}").route(get().to(fetch)).route(delete().to(remove)))
}

async fn list(db: web::Data<Database>) -> impl Responder {
    match with_connection(&db, |conn| collections::list(conn)) {
        Ok(collections) => HttpResponse::Ok().json(collections),
        Err(e) => error_response(&e),
    }
}

/// Handler for `POST /collections`.
///
/// # Arguments
/// * `payload` - One collection or an array of them, in any historical shape.
///
/// # Returns
/// - `201 Created` with the stored collections in their current shape.
/// - `400 Bad Request` for an empty array.
/// - `409 Conflict` when a collection names an unknown connection or license,
///   or reuses an existing `id`.
async fn create(db: web::Data<Database>, payload: web::Json<CollectionsPayload>) -> impl Responder {
    let new_collections = payload.into_inner().into_collections();
    match with_connection(&db, |conn| collections::create(conn, new_collections)) {
        Ok(created) => {
            info!("{} collection(s) created", created.len());
            HttpResponse::Created().json(created)
        }
        Err(e) => error_response(&e),
    }
}

/// Handler for `PATCH /collections`.
///
/// # Arguments
/// * `payload` - The full collection, identified by its uuid.
///
/// # Returns
/// - `200 OK` with the collection as stored.
/// - `400 Bad Request` when the payload has no uuid.
/// - `404 Not Found` when no collection has this uuid.
async fn update(db: web::Data<Database>, payload: web::Json<LegacyCollection>) -> impl Responder {
    let collection = Collection::from(payload.into_inner());
    if collection.uuid.is_nil() {
        return error_response(&StoreError::Invalid("a collection update needs its uuid".to_string()));
    }
    match with_connection(&db, |conn| collections::update(conn, &collection)) {
        Ok(()) => HttpResponse::Ok().json(collection),
        Err(e) => error_response(&e),
    }
}

async fn fetch(db: web::Data<Database>, uuid: web::Path<Uuid>) -> impl Responder {
    match with_connection(&db, |conn| collections::get(conn, *uuid)) {
        Ok(collection) => HttpResponse::Ok().json(collection),
        Err(e) => error_response(&e),
    }
}

async fn remove(db: web::Data<Database>, uuid: web::Path<Uuid>) -> impl Responder {
    match with_connection(&db, |conn| collections::delete(conn, *uuid)) {
        Ok(()) => {
            info!("Collection {} deleted", uuid);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

async fn license_titles(db: web::Data<Database>) -> impl Responder {
    match with_connection(&db, |conn| licenses::titles(conn)) {
        Ok(titles) => HttpResponse::Ok().json(titles),
        Err(e) => error_response(&e),
    }
}
