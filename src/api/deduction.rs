use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::catalog;
use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationGate, PendingConfirmation};
use crate::error::PortalError;
use crate::model::deduction::Deduction;
use crate::notify::NotificationCenter;
use crate::utils::{de, forms::not_blank};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeductionForm {
    #[validate(custom(function = "not_blank", message = "El nombre es requerido"))]
    #[schema(example = "IGSS")]
    pub deduction_name: String,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[validate(
        required(message = "El porcentaje es requerido"),
        range(min = 0.0, max = 100.0, message = "El porcentaje debe estar entre 0 y 100")
    )]
    #[schema(example = 4.83)]
    pub deduction_percentage: Option<f64>,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[validate(range(min = 0.0, message = "El monto fijo no puede ser negativo"))]
    #[schema(example = 0.0)]
    pub deduction_fixed_amount: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/deductions",
    responses((status = 200, body = [Deduction])),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn list_deductions(session: AuthSession) -> Result<HttpResponse, PortalError> {
    catalog::list::<Deduction>(&session).await
}

#[utoipa::path(
    post,
    path = "/api/deductions",
    request_body = DeductionForm,
    responses(
        (status = 201, body = Deduction),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn create_deduction(
    session: AuthSession,
    form: web::Json<DeductionForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::create::<Deduction, _>(&session, form.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/deductions/{id}",
    params(("id" = u64, Path, description = "Deduction id")),
    request_body = DeductionForm,
    responses(
        (status = 200, body = Deduction),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn update_deduction(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<DeductionForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::update::<Deduction, _>(&session, path.into_inner(), form.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/deductions/{id}",
    params(("id" = u64, Path, description = "Deduction id")),
    responses((status = 202, description = "Awaiting confirmation", body = PendingConfirmation)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn delete_deduction(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    catalog::delete::<Deduction>(&session, &gate, &notices, path.into_inner())
}
