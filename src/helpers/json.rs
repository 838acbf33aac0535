use crate::forms::FieldErrors;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

/// Envelope of every JSON answer the server gives.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub status: String,
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

pub struct JsonResponseBuilder<T> {
    id: Option<String>,
    item: Option<T>,
    errors: Option<FieldErrors>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            errors: None,
        }
    }
}

impl<T: Serialize> JsonResponseBuilder<T> {
    pub fn set_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    fn into_body(self, code: StatusCode, message: String) -> JsonResponse<T> {
        let message = if message.trim().is_empty() {
            code.canonical_reason().unwrap_or("").to_string()
        } else {
            message
        };

        JsonResponse {
            status: if code.is_success() { "OK" } else { "Error" }.to_string(),
            message,
            code: code.as_u16(),
            id: self.id,
            item: self.item,
            errors: self.errors,
        }
    }

    fn respond(self, code: StatusCode, message: String) -> HttpResponse {
        HttpResponse::build(code).json(self.into_body(code, message))
    }

    fn fail(self, code: StatusCode, message: String) -> actix_web::Error {
        let response = self.respond(code, message.clone());
        InternalError::from_response(message, response).into()
    }

    pub fn ok(self, msg: impl Into<String>) -> HttpResponse {
        self.respond(StatusCode::OK, msg.into())
    }

    pub fn created(self, msg: impl Into<String>) -> HttpResponse {
        self.respond(StatusCode::CREATED, msg.into())
    }

    pub fn bad_request(self, msg: impl Into<String>) -> actix_web::Error {
        self.fail(StatusCode::BAD_REQUEST, msg.into())
    }

    pub fn form_error(self, errors: FieldErrors) -> actix_web::Error {
        let msg = format!("Invalid data received: {}", errors);
        self.set_errors(errors).fail(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(self, msg: impl Into<String>) -> actix_web::Error {
        self.fail(StatusCode::UNAUTHORIZED, msg.into())
    }

    pub fn not_found(self, msg: impl Into<String>) -> actix_web::Error {
        self.fail(StatusCode::NOT_FOUND, msg.into())
    }

    /// The upstream service failed; `msg` is its own message.
    pub fn bad_gateway(self, msg: impl Into<String>) -> actix_web::Error {
        self.fail(StatusCode::BAD_GATEWAY, msg.into())
    }

    pub fn internal_server_error(self, msg: impl Into<String>) -> actix_web::Error {
        self.fail(StatusCode::INTERNAL_SERVER_ERROR, msg.into())
    }
}
