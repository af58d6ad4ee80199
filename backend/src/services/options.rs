//! # General Options Service
//!
//! Key/value settings of the published service, such as its title and
//! description. The defaults are seeded when the database is created.

use super::{error_response, with_connection};
use crate::database::{options, Database};
use actix_web::web::{self, get, put, resource, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::general_option::GeneralOption;
use log::info;

/// `GET /options` returns every general option, `PUT /options` upserts a
/// non-empty list of them.
pub fn configure_routes() -> Scope {
    scope("/options")
        .service(resource("").route(get().to(list)).route(put().to(update)))
}

async fn list(db: web::Data<Database>) -> impl Responder {
    match with_connection(&db, |conn| options::list(conn)) {
        Ok(options) => HttpResponse::Ok().json(options),
        Err(e) => error_response(&e),
    }
}

/// Handler for `PUT /options`.
///
/// # Arguments
/// * `payload` - The options to write. Each one replaces the stored value for
///   its key, or adds the key when it is new. `data` is accepted for `value`.
///
/// # Returns
/// - `201 Created` once every option is written, in a single transaction.
/// - `400 Bad Request` for an empty list.
async fn update(db: web::Data<Database>, payload: web::Json<Vec<GeneralOption>>) -> impl Responder {
    match with_connection(&db, |conn| options::upsert(conn, &payload)) {
        Ok(()) => {
            info!("{} general options updated", payload.len());
            HttpResponse::Created().body("General options updated")
        }
        Err(e) => error_response(&e),
    }
}
