use actix_web::{HttpResponse, web};

use crate::api::catalog::{self, NameForm};
use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationGate, PendingConfirmation};
use crate::error::PortalError;
use crate::model::contract_type::ContractType;
use crate::notify::NotificationCenter;

#[utoipa::path(
    get,
    path = "/api/contract-types",
    responses((status = 200, body = [ContractType])),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn list_contract_types(session: AuthSession) -> Result<HttpResponse, PortalError> {
    catalog::list::<ContractType>(&session).await
}

#[utoipa::path(
    post,
    path = "/api/contract-types",
    request_body = NameForm,
    responses(
        (status = 201, body = ContractType),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn create_contract_type(
    session: AuthSession,
    form: web::Json<NameForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::create::<ContractType, _>(&session, form.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/contract-types/{id}",
    params(("id" = u64, Path, description = "Contract type id")),
    request_body = NameForm,
    responses((status = 200, body = ContractType)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn update_contract_type(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<NameForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::update::<ContractType, _>(&session, path.into_inner(), form.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/contract-types/{id}",
    params(("id" = u64, Path, description = "Contract type id")),
    responses((status = 202, description = "Awaiting confirmation", body = PendingConfirmation)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn delete_contract_type(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    catalog::delete::<ContractType>(&session, &gate, &notices, path.into_inner())
}
