use actix_web::{HttpResponse, web};

use crate::api::catalog::{self, NameForm};
use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationGate, PendingConfirmation};
use crate::error::PortalError;
use crate::model::payroll_type::PayrollType;
use crate::notify::NotificationCenter;

#[utoipa::path(
    get,
    path = "/api/payroll-types",
    responses((status = 200, body = [PayrollType])),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn list_payroll_types(session: AuthSession) -> Result<HttpResponse, PortalError> {
    catalog::list::<PayrollType>(&session).await
}

#[utoipa::path(
    post,
    path = "/api/payroll-types",
    request_body = NameForm,
    responses(
        (status = 201, body = PayrollType),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn create_payroll_type(
    session: AuthSession,
    form: web::Json<NameForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::create::<PayrollType, _>(&session, form.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/payroll-types/{id}",
    params(("id" = u64, Path, description = "Payroll type id")),
    request_body = NameForm,
    responses((status = 200, body = PayrollType)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn update_payroll_type(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<NameForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::update::<PayrollType, _>(&session, path.into_inner(), form.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/payroll-types/{id}",
    params(("id" = u64, Path, description = "Payroll type id")),
    responses((status = 202, description = "Awaiting confirmation", body = PendingConfirmation)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn delete_payroll_type(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    catalog::delete::<PayrollType>(&session, &gate, &notices, path.into_inner())
}
