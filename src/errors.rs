use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_derive::Serialize;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    DieselError,
    EnvironmentError,
    R2D2Error,
    MigrationError,
    LockError,
    #[display(fmt = "invalid request")]
    UserError(Vec<Fields>),
    #[display(fmt = "note {} was not found", _0)]
    NotFound(String),
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommonError {
    Missing,
    Empty,
    TooLong,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "error", rename_all = "snake_case")]
pub enum Fields {
    Title(CommonError),
    Body(String),
}

impl From<r2d2::Error> for ServerError {
    fn from(e: r2d2::Error) -> ServerError {
        log::error!("connection pool: {e}");
        ServerError::R2D2Error
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(e: diesel::result::Error) -> ServerError {
        log::error!("diesel: {e}");
        ServerError::DieselError
    }
}

impl<T> From<std::sync::PoisonError<T>> for ServerError {
    fn from(_: std::sync::PoisonError<T>) -> ServerError {
        log::error!("note store lock was poisoned by a panicking request");
        ServerError::LockError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::UserError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            ServerError::DieselError => json!("Library Error: Diesel Error."),
            ServerError::EnvironmentError => {
                json!("Server Error: Use of an uninitialized environment variable.")
            }
            ServerError::R2D2Error => json!("Server Error: Pooling Error."),
            ServerError::MigrationError => json!("Server Error: Schema bootstrap failed."),
            ServerError::LockError => json!("Server Error: Note store is unavailable."),
            ServerError::UserError(fields) => json!(fields),
            ServerError::NotFound(id) => json!(format!("note id: {} was not found", id)),
        };

        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::MessageBody, ResponseError};

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            ServerError::NotFound("n1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::UserError(vec![Fields::Title(CommonError::Missing)]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServerError::DieselError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_detail_lists_fields() {
        let res = ServerError::UserError(vec![Fields::Title(CommonError::TooLong)]).error_response();
        let bytes = res.into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "detail": [{ "field": "title", "error": "too_long" }] })
        );
    }
}
