use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::{
    errors::{Fields, ServerError},
    service::NoteService,
};

pub mod note;

pub async fn index(service: web::Data<NoteService>) -> impl actix_web::Responder {
    HttpResponse::Ok().json(json!({
        "name": "API de Notas",
        "version": env!("CARGO_PKG_VERSION"),
        "store": service.store_kind(),
    }))
}

/// Bodies that fail to decode are reported like any other invalid input.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected request body: {err}");
    ServerError::UserError(vec![Fields::Body(err.to_string())]).into()
}
