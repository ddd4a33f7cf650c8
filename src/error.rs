use std::collections::BTreeMap;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::client::ApiError;
use crate::session::SESSION_COOKIE;

pub const LOGIN_VIEW: &str = "/auth/login";

/// Field name to message.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors a portal handler can answer with. Each maps to a JSON body of the
/// form `{ "error": ... }`.
#[derive(Debug, Display)]
pub enum PortalError {
    #[display(fmt = "Datos inválidos")]
    Validation(FieldErrors),

    #[display(fmt = "{}", _0)]
    Forbidden(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// The backend rejected the session. Only the request that cleared it
    /// redirects to the login view.
    #[display(fmt = "Sesión expirada")]
    SessionExpired { redirect: bool },

    #[display(fmt = "{}", message)]
    Backend { status: u16, message: String },

    #[display(fmt = "No se pudo contactar al servidor: {}", _0)]
    Unavailable(String),

    #[display(fmt = "{}", _0)]
    Internal(String),
}

impl PortalError {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(name.to_string(), message.into());
        PortalError::Validation(fields)
    }
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::SessionExpired { redirect: true } => StatusCode::SEE_OTHER,
            PortalError::SessionExpired { redirect: false } => StatusCode::UNAUTHORIZED,
            PortalError::Backend { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            PortalError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            PortalError::Validation(fields) => HttpResponse::build(self.status_code())
                .json(json!({ "error": self.to_string(), "fields": fields })),
            PortalError::SessionExpired { redirect: true } => {
                let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
                removal.make_removal();
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, LOGIN_VIEW))
                    .cookie(removal)
                    .json(json!({ "error": self.to_string(), "redirect": LOGIN_VIEW }))
            }
            PortalError::Internal(message) => {
                error!(error = %message, "Internal error");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Error interno del servidor" }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() })),
        }
    }
}

impl From<ApiError> for PortalError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { first } => PortalError::SessionExpired { redirect: first },
            ApiError::Status { status, message } => PortalError::Backend { status, message },
            ApiError::Request(e) => {
                error!(error = %e, "Backend request failed");
                PortalError::Unavailable(e.to_string())
            }
            ApiError::Decode(e) => {
                error!(error = %e, "Backend payload could not be decoded");
                PortalError::Unavailable("respuesta inválida".to_string())
            }
        }
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
