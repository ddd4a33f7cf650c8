use actix_web::{HttpResponse, web};
use serde_json::json;
use uuid::Uuid;

use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationAnswer, ConfirmationGate};
use crate::error::PortalError;

/// Answers a pending confirmation. Only the session that asked may answer,
/// and only once.
#[utoipa::path(
    post,
    path = "/api/confirmations/{id}",
    params(("id" = String, Path, description = "Confirmation id")),
    request_body = ConfirmationAnswer,
    responses(
        (status = 200, description = "Answer delivered"),
        (status = 404, description = "Unknown or expired confirmation")
    ),
    security(("session_cookie" = [])),
    tag = "Confirmations"
)]
pub async fn answer(
    session: AuthSession,
    path: web::Path<Uuid>,
    body: web::Json<ConfirmationAnswer>,
    gate: web::Data<ConfirmationGate>,
) -> Result<HttpResponse, PortalError> {
    let id = path.into_inner();
    if !gate.answer(session.context().id(), id, body.confirmed) {
        return Err(PortalError::NotFound(
            "La confirmación no existe o ha expirado".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({ "confirmed": body.confirmed })))
}
