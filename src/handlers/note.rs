use actix_web::{web, HttpResponse};

use crate::{
    errors::ServerError,
    models::note::{NewNote, NotePatch},
    service::NoteService,
};

pub async fn new(
    input: web::Json<NewNote>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let note = service.create(input.into_inner())?;
    Ok(HttpResponse::Created().json(note))
}

pub async fn list(service: web::Data<NoteService>) -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(service.list()?))
}

pub async fn get(
    note_id: web::Path<String>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(service.get(&note_id)?))
}

pub async fn update(
    note_id: web::Path<String>,
    input: web::Json<NotePatch>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let note = service.update(&note_id, input.into_inner())?;
    Ok(HttpResponse::Ok().json(note))
}

pub async fn delete(
    note_id: web::Path<String>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    service.delete(&note_id)?;
    Ok(HttpResponse::NoContent().finish())
}
